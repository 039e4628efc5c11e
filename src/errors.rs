/// Errors that can occur when operating on a [`BlockList`](crate::BlockList).
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BlockListError {
    /// The index lies outside the valid interval of the operation that
    /// received it. `size` is the list length at the time of the call.
    #[error("index {index} out of range for list of size {size}")]
    OutOfRange { index: usize, size: usize },

    /// The block (or the node behind a handle) is not in this list.
    #[error("memory block is not in this list")]
    BlockNotFound,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = BlockListError::OutOfRange { index: 4, size: 3 };
        assert_eq!(err.to_string(), "index 4 out of range for list of size 3");
        assert_eq!(
            BlockListError::BlockNotFound.to_string(),
            "memory block is not in this list"
        );
    }
}
