use std::fmt;

/// Stable identifier of a node inside one [`BlockList`](crate::BlockList).
///
/// Ids are never reused, so a handle to a removed node stays dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(pub(crate) usize);

impl Handle {
    /// Returns the raw numeric identifier for debugging or external maps.
    pub fn as_raw(&self) -> usize {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_and_display() {
        let h = Handle(42);
        assert_eq!(h.as_raw(), 42);
        assert_eq!(h.to_string(), "node#42");
    }
}
