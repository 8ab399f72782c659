use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// A caller-supplied weight was not strictly positive.
    #[error("Weight must be greater than 0, got {0}")]
    InvalidWeight(u32),
    /// `select` was called on a selector with no entries.
    #[error("Cannot select an item out of an empty collection")]
    EmptyCollection,
}

pub type SelectorResult<T> = Result<T, SelectorError>;

pub(crate) fn check_weight(weight: u32) -> SelectorResult<u32> {
    if weight == 0 {
        return Err(SelectorError::InvalidWeight(weight));
    }
    Ok(weight)
}
