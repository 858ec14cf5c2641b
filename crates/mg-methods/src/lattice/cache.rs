//! Write-once store of lattice node values.
//!
//! Node `(j, m)` lives at slot `m(m + 1)/2 + j` of a flat vector, so the
//! triangle `0 <= j <= m <= steps` is stored without gaps and looked up in
//! O(1). Unset slots hold `None`.

use super::LatticeNode;
use mg_core::{ensure_post, Real, Result, Size};

/// Triangular cache of node values for one lattice.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCache {
    steps: Size,
    slots: Vec<Option<Real>>,
    filled: Size,
}

impl PriceCache {
    /// An empty cache for a lattice with `steps` steps.
    pub fn new(steps: Size) -> Self {
        Self {
            steps,
            slots: vec![None; (steps + 1) * (steps + 2) / 2],
            filled: 0,
        }
    }

    /// Number of steps of the lattice this cache covers.
    pub fn steps(&self) -> Size {
        self.steps
    }

    /// Number of slots (all nodes of the lattice).
    pub fn capacity(&self) -> Size {
        self.slots.len()
    }

    /// Number of nodes whose value has been stored.
    pub fn len(&self) -> Size {
        self.filled
    }

    /// `true` if no node value has been stored.
    pub fn is_empty(&self) -> bool {
        self.filled == 0
    }

    /// `true` once every node of the lattice has a value.
    pub fn is_full(&self) -> bool {
        self.filled == self.slots.len()
    }

    /// Stored value of `node`, if any.
    ///
    /// Nodes outside the lattice are reported as absent.
    pub fn get(&self, node: LatticeNode) -> Option<Real> {
        self.slot(node).and_then(|i| self.slots[i])
    }

    /// `true` if `node` has a stored value.
    pub fn contains(&self, node: LatticeNode) -> bool {
        self.get(node).is_some()
    }

    /// Store the value of `node`.
    ///
    /// Fails with `IndexOutOfRange` for nodes outside the lattice and with a
    /// postcondition error if the node already holds a value.
    pub fn insert(&mut self, node: LatticeNode, value: Real) -> Result<()> {
        node.check(self.steps)?;
        let i = Self::index(node);
        ensure_post!(
            self.slots[i].is_none(),
            "node {node} already holds a value; cache entries are written once"
        );
        self.slots[i] = Some(value);
        self.filled += 1;
        Ok(())
    }

    /// Forget every stored value.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.filled = 0;
    }

    fn slot(&self, node: LatticeNode) -> Option<usize> {
        node.check(self.steps).ok().map(Self::index)
    }

    #[inline]
    fn index(node: LatticeNode) -> usize {
        node.m * (node.m + 1) / 2 + node.j
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mg_core::Error;

    #[test]
    fn starts_empty() {
        let cache = PriceCache::new(3);
        assert_eq!(cache.capacity(), 10);
        assert!(cache.is_empty());
        assert_eq!(cache.get(LatticeNode::root()), None);
    }

    #[test]
    fn exact_key_lookup() {
        let mut cache = PriceCache::new(3);
        cache.insert(LatticeNode::new(1, 2), 4.5).unwrap();
        assert_eq!(cache.get(LatticeNode::new(1, 2)), Some(4.5));
        assert_eq!(cache.get(LatticeNode::new(2, 1)), None);
        assert_eq!(cache.get(LatticeNode::new(0, 2)), None);
        assert_eq!(cache.get(LatticeNode::new(2, 2)), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn slots_do_not_alias() {
        let steps = 6;
        let mut cache = PriceCache::new(steps);
        for m in 0..=steps {
            for j in 0..=m {
                cache.insert(LatticeNode::new(j, m), (100 * m + j) as Real).unwrap();
            }
        }
        assert!(cache.is_full());
        for m in 0..=steps {
            for j in 0..=m {
                assert_eq!(cache.get(LatticeNode::new(j, m)), Some((100 * m + j) as Real));
            }
        }
    }

    #[test]
    fn second_write_is_rejected() {
        let mut cache = PriceCache::new(2);
        cache.insert(LatticeNode::root(), 1.0).unwrap();
        let err = cache.insert(LatticeNode::root(), 2.0).unwrap_err();
        assert!(matches!(err, Error::Postcondition(_)), "{err}");
        assert_eq!(cache.get(LatticeNode::root()), Some(1.0));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn out_of_range_write_is_rejected() {
        let mut cache = PriceCache::new(2);
        assert_eq!(
            cache.insert(LatticeNode::new(0, 3), 1.0),
            Err(Error::IndexOutOfRange { j: 0, m: 3, steps: 2 })
        );
        assert!(cache.insert(LatticeNode::new(2, 1), 1.0).is_err());
    }

    #[test]
    fn clear_resets() {
        let mut cache = PriceCache::new(2);
        cache.insert(LatticeNode::new(0, 1), 1.0).unwrap();
        cache.clear();
        assert!(cache.is_empty());
        cache.insert(LatticeNode::new(0, 1), 2.0).unwrap();
        assert_eq!(cache.get(LatticeNode::new(0, 1)), Some(2.0));
    }
}
