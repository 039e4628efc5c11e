use std::rc::Rc;

use crate::{block::MemoryBlock, handle::Handle};

/// One link of the chain: a shared block descriptor and the id of the
/// node that follows it.
#[derive(Debug)]
pub struct Node {
    pub(crate) id: usize,
    pub(crate) next: Option<usize>,
    pub(crate) block: Rc<MemoryBlock>,
}

impl Node {
    pub(crate) fn new(id: usize, block: Rc<MemoryBlock>) -> Self {
        Self {
            id,
            next: None,
            block,
        }
    }

    pub fn handle(&self) -> Handle {
        Handle(self.id)
    }

    /// The descriptor this node points to.
    pub fn block(&self) -> &Rc<MemoryBlock> {
        &self.block
    }

    /// Handle of the following node, `None` for the tail.
    pub fn next(&self) -> Option<Handle> {
        self.next.map(Handle)
    }
}
