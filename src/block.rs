use std::fmt;

/// A contiguous region of simulated memory: `length` words starting at
/// `base_address`.
///
/// Lists hold blocks behind `Rc` and compare them by identity, so two equal
/// blocks are still distinct entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryBlock {
    base_address: usize,
    length: usize,
}

impl MemoryBlock {
    pub fn new(base_address: usize, length: usize) -> Self {
        Self {
            base_address,
            length,
        }
    }

    pub fn base_address(&self) -> usize {
        self.base_address
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl fmt::Display for MemoryBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} , {})", self.base_address, self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_accessors() {
        let b = MemoryBlock::new(10, 5);
        assert_eq!(b.base_address(), 10);
        assert_eq!(b.length(), 5);
        assert_eq!(b.to_string(), "(10 , 5)");
    }
}
