use super::error::{check_weight, SelectorError, SelectorResult};
use super::weighted_random::weighted_random;
use super::Selector;
use log::trace;
use rand::Rng;

///
/// The simple alternative to [`super::WeightedSelector`]: a flat list kept sorted by weight,
/// heaviest first, and scanned on every selection.
///
/// Mutations re-sort the list, and selection walks it until the drawn number falls inside an
/// item's block. Putting the heavy items first keeps the average scan short, which makes this a
/// reasonable choice for small collections.
///
#[derive(Debug, Clone)]
pub struct LinearSelector<T> {
    items: Vec<(T, u32)>,
    total_weight: u64,
}

impl<T> Default for LinearSelector<T> {
    fn default() -> Self {
        LinearSelector {
            items: vec![],
            total_weight: 0,
        }
    }
}

impl<T: PartialEq> LinearSelector<T> {
    pub fn new() -> LinearSelector<T> {
        Self::default()
    }

    pub fn try_from_iter<I>(entries: I) -> SelectorResult<LinearSelector<T>>
    where
        I: IntoIterator<Item = (T, u32)>,
    {
        let mut selector = Self::new();
        selector.extend_weighted(entries)?;
        Ok(selector)
    }

    /// Adds a batch of entries with a single re-sort. Nothing is added unless all weights are
    /// valid.
    pub fn extend_weighted<I>(&mut self, entries: I) -> SelectorResult<()>
    where
        I: IntoIterator<Item = (T, u32)>,
    {
        let entries: Vec<(T, u32)> = entries.into_iter().collect();
        for (_, weight) in entries.iter() {
            check_weight(*weight)?;
        }
        self.items.extend(entries);
        self.update_state();
        Ok(())
    }

    /// Entries in scan order, heaviest first.
    pub fn entries(&self) -> &[(T, u32)] {
        &self.items
    }

    fn update_state(&mut self) {
        self.total_weight = self.items.iter().map(|(_, weight)| u64::from(*weight)).sum();
        // Stable, so equal weights keep insertion order
        self.items.sort_by(|a, b| b.1.cmp(&a.1));
    }
}

impl<T: PartialEq> Selector<T> for LinearSelector<T> {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn contains(&self, item: &T) -> bool {
        self.items.iter().any(|(existing, _)| existing == item)
    }

    fn insert(&mut self, item: T, weight: u32) -> SelectorResult<()> {
        let weight = check_weight(weight)?;
        self.items.push((item, weight));
        self.update_state();
        trace!("Inserted weight {} (total {})", weight, self.total_weight);
        Ok(())
    }

    /// Removes every entry equal to `item`.
    fn remove(&mut self, item: &T) -> bool {
        let before = self.items.len();
        self.items.retain(|(existing, _)| existing != item);
        if self.items.len() == before {
            return false;
        }
        self.update_state();
        true
    }

    fn clear(&mut self) {
        self.items.clear();
        self.total_weight = 0;
    }

    fn select_with<R: Rng + ?Sized>(&self, rng: &mut R) -> SelectorResult<&T> {
        weighted_random(&self.items, self.total_weight, rng).ok_or(SelectorError::EmptyCollection)
    }

    fn total_probability(&self) -> u64 {
        self.total_weight
    }
}
