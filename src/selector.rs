pub mod block_index;
pub mod error;
pub mod linear;
pub mod weighted_random;

pub use block_index::{EntryRef, WeightedSelector};
pub use error::{SelectorError, SelectorResult};
pub use linear::LinearSelector;

use rand::Rng;

///
/// A container that hands back items at random, weighted by the share each was inserted with.
///
/// Weights are positive integers. An item's chance of being selected is its weight divided by
/// [`Selector::total_probability`]. The same item may be inserted more than once, each insert
/// being its own entry with its own weight.
///
/// Implementations are single-owner. Sharing one across threads needs external locking.
///
pub trait Selector<T> {
    /// Number of entries, counting duplicates.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, item: &T) -> bool;

    /// Adds an entry. Fails with [`SelectorError::InvalidWeight`] if `weight` is zero, in which
    /// case nothing changes.
    fn insert(&mut self, item: T, weight: u32) -> SelectorResult<()>;

    /// Removes all entries equal to `item`. Returns whether any were present.
    fn remove(&mut self, item: &T) -> bool;

    fn clear(&mut self);

    /// Picks an item using the given random source.
    fn select_with<R: Rng + ?Sized>(&self, rng: &mut R) -> SelectorResult<&T>;

    /// Picks an item using the thread-local random source.
    fn select(&self) -> SelectorResult<&T> {
        self.select_with(&mut rand::thread_rng())
    }

    /// Sum of all entries' weights.
    fn total_probability(&self) -> u64;
}
