use super::error::{check_weight, SelectorError, SelectorResult};
use super::Selector;
use log::{debug, trace};
use rand::Rng;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

#[derive(Debug, Clone)]
struct Entry<T> {
    item: T,
    weight: u32,
}

/// A borrowed view of one entry and the block of `[1, total_probability]` it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRef<'a, T> {
    pub item: &'a T,
    pub weight: u32,
    pub block: RangeInclusive<u64>,
}

///
/// Selects items at random, with each item's chance proportional to its weight.
///
/// Every entry owns a "block" of the range `[1, total_probability]` with a length equal to its
/// weight. Blocks start at 1 and are laid end to end, e.g. weights 5, 5, 4, 1, 1 give blocks
/// 1-5, 6-10, 11-14, 15, 16. Only the start of each block is stored, as the key of an ordered
/// map, so selecting is a uniform draw followed by a floor lookup.
///
/// Insertion appends a block at the end and is O(log n). Removal re-packs every remaining block
/// and is O(n). Selection is O(log n).
///
#[derive(Debug, Clone)]
pub struct WeightedSelector<T> {
    blocks: BTreeMap<u64, Entry<T>>,
    total_weight: u64,
}

impl<T> Default for WeightedSelector<T> {
    fn default() -> Self {
        WeightedSelector {
            blocks: BTreeMap::new(),
            total_weight: 0,
        }
    }
}

impl<T: PartialEq> WeightedSelector<T> {
    pub fn new() -> WeightedSelector<T> {
        Self::default()
    }

    /// Builds a selector from (item, weight) pairs, rejecting the lot if any weight is zero.
    pub fn try_from_iter<I>(entries: I) -> SelectorResult<WeightedSelector<T>>
    where
        I: IntoIterator<Item = (T, u32)>,
    {
        let mut selector = Self::new();
        selector.extend_weighted(entries)?;
        Ok(selector)
    }

    /// Inserts every (item, weight) pair in order. Nothing is inserted unless all weights are
    /// valid.
    pub fn extend_weighted<I>(&mut self, entries: I) -> SelectorResult<()>
    where
        I: IntoIterator<Item = (T, u32)>,
    {
        let entries: Vec<(T, u32)> = entries.into_iter().collect();
        for (_, weight) in entries.iter() {
            check_weight(*weight)?;
        }
        for (item, weight) in entries {
            self.push(item, weight);
        }
        Ok(())
    }

    /// Entries in block order.
    pub fn iter(&self) -> impl Iterator<Item = EntryRef<'_, T>> {
        self.blocks.iter().map(|(start, entry)| EntryRef {
            item: &entry.item,
            weight: entry.weight,
            block: *start..=(start + u64::from(entry.weight) - 1),
        })
    }

    fn push(&mut self, item: T, weight: u32) {
        let block_start = self.total_weight + 1;
        self.blocks.insert(block_start, Entry { item, weight });
        self.total_weight += u64::from(weight);
        trace!("Inserted block {}..={}", block_start, self.total_weight);
    }

    /// The entry whose block contains `point`.
    fn locate(&self, point: u64) -> Option<&Entry<T>> {
        let (start, entry) = self.blocks.range(..=point).next_back()?;
        debug_assert!(point < start + u64::from(entry.weight));
        Some(entry)
    }
}

impl<T: PartialEq> Selector<T> for WeightedSelector<T> {
    fn len(&self) -> usize {
        self.blocks.len()
    }

    fn contains(&self, item: &T) -> bool {
        self.blocks.values().any(|entry| entry.item == *item)
    }

    fn insert(&mut self, item: T, weight: u32) -> SelectorResult<()> {
        let weight = check_weight(weight)?;
        self.push(item, weight);
        Ok(())
    }

    /// Removes *every* entry equal to `item`, not just the first. Repeated inserts of an item
    /// accumulate its share, and a single remove takes all of it back out.
    ///
    /// The remaining blocks are re-packed from 1 so the freed range can't be drawn.
    fn remove(&mut self, item: &T) -> bool {
        if !self.contains(item) {
            return false;
        }

        let mut removed_count = 0usize;
        let mut removed_weight = 0u64;
        let mut next_start = 1u64;
        self.blocks = std::mem::take(&mut self.blocks)
            .into_values()
            .filter(|entry| {
                if entry.item == *item {
                    removed_count += 1;
                    removed_weight += u64::from(entry.weight);
                    false
                } else {
                    true
                }
            })
            .map(|entry| {
                let block_start = next_start;
                next_start += u64::from(entry.weight);
                (block_start, entry)
            })
            .collect();

        self.total_weight -= removed_weight;
        debug_assert_eq!(self.total_weight, next_start - 1);
        debug!(
            "Removed {} entries with weight {}; {} entries re-packed into 1..={}",
            removed_count,
            removed_weight,
            self.blocks.len(),
            self.total_weight
        );
        true
    }

    fn clear(&mut self) {
        self.blocks.clear();
        self.total_weight = 0;
    }

    fn select_with<R: Rng + ?Sized>(&self, rng: &mut R) -> SelectorResult<&T> {
        if self.blocks.is_empty() {
            return Err(SelectorError::EmptyCollection);
        }
        let random = rng.gen_range(1..=self.total_weight);
        self.locate(random)
            .map(|entry| &entry.item)
            .ok_or(SelectorError::EmptyCollection)
    }

    fn total_probability(&self) -> u64 {
        self.total_weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn blocks<T: PartialEq>(selector: &WeightedSelector<T>) -> Vec<RangeInclusive<u64>> {
        selector.iter().map(|entry| entry.block).collect()
    }

    fn assert_contiguous<T: PartialEq>(selector: &WeightedSelector<T>) {
        let mut expected_start = 1;
        for entry in selector.iter() {
            assert_eq!(*entry.block.start(), expected_start);
            assert_eq!(
                entry.block.end() - entry.block.start() + 1,
                u64::from(entry.weight)
            );
            expected_start = entry.block.end() + 1;
        }
        assert_eq!(selector.total_probability(), expected_start - 1);
    }

    #[test]
    fn test_insert_appends_block() {
        let mut selector = WeightedSelector::new();
        selector.insert("A", 2).unwrap();
        selector.insert("B", 5).unwrap();
        selector.insert("C", 10).unwrap();

        assert_eq!(blocks(&selector), vec![1..=2, 3..=7, 8..=17]);
        assert_eq!(selector.total_probability(), 17);
        assert_contiguous(&selector);
    }

    #[test]
    fn test_insert_leaves_existing_blocks() {
        let mut selector = WeightedSelector::new();
        selector.insert("A", 3).unwrap();
        let before = blocks(&selector);
        selector.insert("B", 4).unwrap();
        assert_eq!(blocks(&selector)[..1], before[..]);
    }

    #[test]
    fn test_zero_weight_leaves_state() {
        let mut selector = WeightedSelector::new();
        selector.insert("A", 3).unwrap();
        assert_eq!(
            selector.insert("B", 0),
            Err(SelectorError::InvalidWeight(0))
        );
        assert_eq!(selector.len(), 1);
        assert_eq!(selector.total_probability(), 3);
        assert!(!selector.contains(&"B"));
        assert_eq!(blocks(&selector), vec![1..=3]);
    }

    #[test]
    fn test_remove_repacks_blocks() {
        let mut selector = WeightedSelector::new();
        selector.insert("A", 10).unwrap();
        selector.insert("B", 10).unwrap();
        selector.insert("C", 10).unwrap();

        assert!(selector.remove(&"B"));
        assert_eq!(selector.len(), 2);
        assert_eq!(selector.total_probability(), 20);
        assert_eq!(blocks(&selector), vec![1..=10, 11..=20]);
        let items: Vec<&str> = selector.iter().map(|entry| *entry.item).collect();
        assert_eq!(items, vec!["A", "C"]);
    }

    #[test]
    fn test_remove_first_shifts_everything() {
        let mut selector = WeightedSelector::new();
        selector.insert("A", 4).unwrap();
        selector.insert("B", 1).unwrap();
        selector.insert("C", 7).unwrap();

        assert!(selector.remove(&"A"));
        assert_eq!(blocks(&selector), vec![1..=1, 2..=8]);
        assert_contiguous(&selector);
    }

    #[test]
    fn test_remove_takes_all_duplicates() {
        let mut selector = WeightedSelector::new();
        selector.insert("A", 1).unwrap();
        selector.insert("B", 2).unwrap();
        selector.insert("A", 3).unwrap();
        selector.insert("C", 4).unwrap();
        selector.insert("A", 5).unwrap();

        assert!(selector.remove(&"A"));
        assert_eq!(selector.len(), 2);
        assert_eq!(selector.total_probability(), 6);
        assert_eq!(blocks(&selector), vec![1..=2, 3..=6]);
        assert!(!selector.contains(&"A"));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut selector = WeightedSelector::new();
        selector.insert("A", 1).unwrap();
        assert!(!selector.remove(&"Z"));
        assert_eq!(blocks(&selector), vec![1..=1]);
    }

    #[test]
    fn test_locate_every_point() {
        let selector = WeightedSelector::try_from_iter(vec![("A", 5), ("B", 5), ("C", 4), ("D", 1)])
            .unwrap();
        let located: String = (1..=selector.total_probability())
            .map(|point| selector.locate(point).unwrap().item)
            .collect();
        assert_eq!(located, "AAAAABBBBBCCCCD");
    }

    #[test]
    fn test_locate_after_remove() {
        let mut selector =
            WeightedSelector::try_from_iter(vec![("A", 2), ("B", 3), ("C", 2)]).unwrap();
        selector.remove(&"B");
        let located: String = (1..=selector.total_probability())
            .map(|point| selector.locate(point).unwrap().item)
            .collect();
        assert_eq!(located, "AACC");
    }

    #[test]
    fn test_select_empty() {
        let selector: WeightedSelector<&str> = WeightedSelector::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            selector.select_with(&mut rng),
            Err(SelectorError::EmptyCollection)
        );
        assert_eq!(selector.select(), Err(SelectorError::EmptyCollection));
        assert_eq!(selector.len(), 0);
        assert_eq!(selector.total_probability(), 0);
    }

    #[test]
    fn test_select_single_large_entry() {
        let mut selector = WeightedSelector::new();
        selector.insert("A", 5_000_000).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            assert_eq!(selector.select_with(&mut rng), Ok(&"A"));
        }
    }

    #[test]
    fn test_try_from_iter_rejects_batch() {
        assert_eq!(
            WeightedSelector::try_from_iter(vec![("A", 1), ("B", 0)]).unwrap_err(),
            SelectorError::InvalidWeight(0)
        );

        let mut selector = WeightedSelector::try_from_iter(vec![("A", 1)]).unwrap();
        assert!(selector
            .extend_weighted(vec![("B", 2), ("C", 0)])
            .is_err());
        assert_eq!(selector.len(), 1);
        assert_eq!(selector.total_probability(), 1);
    }

    #[test]
    fn test_clear_then_reuse() {
        let mut selector = WeightedSelector::try_from_iter(vec![("A", 3), ("B", 4)]).unwrap();
        selector.clear();
        assert!(selector.is_empty());
        assert_eq!(selector.total_probability(), 0);
        selector.insert("C", 2).unwrap();
        assert_eq!(blocks(&selector), vec![1..=2]);
    }
}
