//! Patterns sub-module: lazy_object.

pub mod lazy_object;
