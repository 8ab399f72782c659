use rand::Rng;

/// Picks an item from `items` with probability proportional to its weight.
///
/// `total_weight` must be the sum of the weights in `items`. Draws from `[1, total_weight]` and
/// walks the cumulative block ends, so this is linear in the number of items. Returns `None` if
/// there is nothing to pick from.
pub fn weighted_random<'a, T, R: Rng + ?Sized>(
    items: &'a [(T, u32)],
    total_weight: u64,
    rng: &mut R,
) -> Option<&'a T> {
    if total_weight == 0 {
        return None;
    }
    let random = rng.gen_range(1..=total_weight);
    let mut block_end = 0u64;
    for (item, weight) in items {
        block_end += u64::from(*weight);
        if block_end >= random {
            return Some(item);
        }
    }
    None
}
