//! Contract and lattice parameters of a vanilla option.
//!
//! An [`OptionSpec`] is validated when it is built and immutable afterwards;
//! "changing" a parameter produces a new spec. Its lattice geometry is
//! derived once at construction and shared with every pricer that values
//! the option.

use mg_core::{ensure_valid, Error, Rate, Real, Result, Size, Time, Volatility};
use mg_methods::LatticeGeometry;

/// Immutable option parameters together with their lattice geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionSpec {
    strike_price: Real,
    strike_price_down: Option<Real>,
    geometry: LatticeGeometry,
}

impl OptionSpec {
    /// Validate the parameters and derive the lattice.
    ///
    /// # Example
    /// ```
    /// use mg_instruments::OptionSpec;
    /// let spec = OptionSpec::new(60.0, 62.0, 0.06, 0.5, 0.13, 5).unwrap();
    /// assert!((spec.delta_t() - 0.1).abs() < 1e-15);
    /// assert!(OptionSpec::new(60.0, 62.0, 0.06, 0.5, 0.13, 0).is_err());
    /// ```
    pub fn new(
        stock_price: Real,
        strike_price: Real,
        rate: Rate,
        maturity: Time,
        volatility: Volatility,
        steps: Size,
    ) -> Result<Self> {
        Self::builder()
            .with_stock_price(stock_price)
            .with_strike_price(strike_price)
            .with_rate(rate)
            .with_maturity(maturity)
            .with_volatility(volatility)
            .with_steps(steps)
            .build()
    }

    /// Start building a spec field by field.
    pub fn builder() -> OptionSpecBuilder {
        OptionSpecBuilder::default()
    }

    /// A builder pre-filled with this spec's parameters.
    pub fn to_builder(&self) -> OptionSpecBuilder {
        OptionSpecBuilder {
            stock_price: Some(self.stock_price()),
            strike_price: Some(self.strike_price),
            strike_price_down: self.strike_price_down,
            rate: Some(self.rate()),
            maturity: Some(self.maturity()),
            volatility: Some(self.volatility()),
            steps: Some(self.steps()),
        }
    }

    /// The same contract with a different strike.
    pub fn with_strike(&self, strike_price: Real) -> Result<Self> {
        self.to_builder().with_strike_price(strike_price).build()
    }

    /// The same contract on a lattice with a different number of steps.
    pub fn with_steps(&self, steps: Size) -> Result<Self> {
        self.to_builder().with_steps(steps).build()
    }

    /// Spot price of the underlying.
    pub fn stock_price(&self) -> Real {
        self.geometry.spot()
    }

    /// Strike price.
    pub fn strike_price(&self) -> Real {
        self.strike_price
    }

    /// Secondary (lower) strike of asymmetric contracts; vanilla payoffs
    /// ignore it.
    pub fn strike_price_down(&self) -> Option<Real> {
        self.strike_price_down
    }

    /// Continuously compounded risk-free rate.
    pub fn rate(&self) -> Rate {
        self.geometry.rate()
    }

    /// Time to maturity in years.
    pub fn maturity(&self) -> Time {
        self.geometry.maturity()
    }

    /// Volatility of the underlying.
    pub fn volatility(&self) -> Volatility {
        self.geometry.volatility()
    }

    /// Number of lattice steps.
    pub fn steps(&self) -> Size {
        self.geometry.steps()
    }

    /// Length of one lattice step, `maturity / steps`.
    pub fn delta_t(&self) -> Time {
        self.geometry.dt()
    }

    /// Up factor `u = 1 + σ√Δt`.
    pub fn up(&self) -> Real {
        self.geometry.up()
    }

    /// Down factor `d = 1 − σ√Δt`.
    pub fn down(&self) -> Real {
        self.geometry.down()
    }

    /// Risk-neutral up-probability.
    pub fn probability(&self) -> Real {
        self.geometry.probability()
    }

    /// Underlying price at node `(j, m)`.
    pub fn stock_price_at(&self, j: Size, m: Size) -> Result<Real> {
        mg_methods::LatticeNode::new(j, m).check(self.steps())?;
        Ok(self.geometry.stock_price(j, m))
    }

    /// The lattice this contract is priced on.
    pub fn geometry(&self) -> &LatticeGeometry {
        &self.geometry
    }
}

/// Field-by-field construction of an [`OptionSpec`].
///
/// # Example
/// ```
/// use mg_instruments::OptionSpec;
/// let spec = OptionSpec::builder()
///     .with_stock_price(100.0)
///     .with_strike_price(110.0)
///     .with_strike_price_down(90.0)
///     .with_rate(0.05)
///     .with_maturity(1.0)
///     .with_volatility(0.2)
///     .with_steps(50)
///     .build()
///     .unwrap();
/// assert_eq!(spec.strike_price_down(), Some(90.0));
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionSpecBuilder {
    stock_price: Option<Real>,
    strike_price: Option<Real>,
    strike_price_down: Option<Real>,
    rate: Option<Rate>,
    maturity: Option<Time>,
    volatility: Option<Volatility>,
    steps: Option<Size>,
}

impl OptionSpecBuilder {
    /// Spot price of the underlying.
    pub fn with_stock_price(mut self, stock_price: Real) -> Self {
        self.stock_price = Some(stock_price);
        self
    }

    /// Strike price.
    pub fn with_strike_price(mut self, strike_price: Real) -> Self {
        self.strike_price = Some(strike_price);
        self
    }

    /// Secondary (lower) strike.
    pub fn with_strike_price_down(mut self, strike_price_down: Real) -> Self {
        self.strike_price_down = Some(strike_price_down);
        self
    }

    /// Continuously compounded risk-free rate.
    pub fn with_rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Time to maturity in years.
    pub fn with_maturity(mut self, maturity: Time) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Volatility of the underlying.
    pub fn with_volatility(mut self, volatility: Volatility) -> Self {
        self.volatility = Some(volatility);
        self
    }

    /// Number of lattice steps.
    pub fn with_steps(mut self, steps: Size) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Validate and build.
    ///
    /// Every field except the secondary strike is required; missing or
    /// invalid fields are reported as `InvalidParameters`.
    pub fn build(self) -> Result<OptionSpec> {
        let stock_price = required(self.stock_price, "stock_price")?;
        let strike_price = required(self.strike_price, "strike_price")?;
        let rate = required(self.rate, "rate")?;
        let maturity = required(self.maturity, "maturity")?;
        let volatility = required(self.volatility, "volatility")?;
        let steps = required(self.steps, "steps")?;

        ensure_valid!(
            strike_price.is_finite() && strike_price >= 0.0,
            "strike price must be finite and non-negative, got {strike_price}"
        );
        if let Some(down) = self.strike_price_down {
            ensure_valid!(
                down.is_finite() && down >= 0.0,
                "lower strike must be finite and non-negative, got {down}"
            );
        }
        let geometry = LatticeGeometry::new(stock_price, rate, maturity, volatility, steps)?;

        Ok(OptionSpec {
            strike_price,
            strike_price_down: self.strike_price_down,
            geometry,
        })
    }
}

fn required<T>(value: Option<T>, name: &str) -> Result<T> {
    value.ok_or_else(|| Error::InvalidParameters(format!("{name} not set")))
}
