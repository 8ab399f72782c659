//! Weighted random selection.
//!
//! Items are inserted with a positive integer weight and [`Selector::select`] hands one back at
//! random, each with a chance proportional to its weight. [`WeightedSelector`] resolves draws
//! against an ordered block index in O(log n); [`LinearSelector`] is the plain scan.
pub mod selector;
pub mod strategy;
pub mod tally;

pub use selector::{LinearSelector, Selector, SelectorError, SelectorResult, WeightedSelector};
pub use strategy::Strategy;
pub use tally::Tally;
