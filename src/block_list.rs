use crate::{block::MemoryBlock, errors::BlockListError, handle::Handle, node::Node};
use std::collections::HashMap;
use std::fmt;
use std::iter::FusedIterator;
use std::rc::Rc;
use tracing::{debug, trace};

/// A singly-linked, index-addressable list of shared memory blocks.
///
/// Nodes live in an arena keyed by id and link to each other by id. Pushing
/// at either end is O(1); positional operations walk from the head in O(n).
///
/// Index bounds differ per operation. [`node`](Self::node) and
/// [`insert`](Self::insert) accept `index == len()`, while
/// [`block`](Self::block) and [`remove`](Self::remove) reject it. Callers
/// depend on each of these contracts, so they are kept apart.
///
/// Blocks are compared by identity ([`Rc::ptr_eq`]), never by value.
pub struct BlockList {
    nodes: HashMap<usize, Node>,
    next_id: usize,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

/// Iterator over the blocks, head to tail.
///
/// Borrows the list, so the list cannot change while it is alive.
pub struct Iter<'a> {
    cur: Option<usize>,
    remaining: usize,
    list: &'a BlockList,
}

/// Iterator over `(Handle, &Rc<MemoryBlock>)`, head to tail.
pub struct IterHandles<'a> {
    inner: Iter<'a>,
}

impl Default for BlockList {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            next_id: 0,
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of blocks in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The head node, or `None` when empty.
    pub fn first(&self) -> Option<&Node> {
        self.head.map(|id| &self.nodes[&id])
    }

    /// The tail node, or `None` when empty.
    pub fn last(&self) -> Option<&Node> {
        self.tail.map(|id| &self.nodes[&id])
    }

    /// Resolve a handle to its node, if it is still in this list.
    pub fn get(&self, h: Handle) -> Option<&Node> {
        self.nodes.get(&h.0)
    }

    /// Walk `index` steps from the head.
    ///
    /// Valid for `index` in `0..=len()`. `index == len()` walks off the end
    /// and yields `Ok(None)`.
    pub fn node(&self, index: usize) -> Result<Option<&Node>, BlockListError> {
        if index > self.len {
            return Err(self.out_of_range(index));
        }
        Ok(self.walk(index).map(|id| &self.nodes[&id]))
    }

    /// Insert `block` so that it ends up at position `index` (`0..=len()`).
    ///
    /// Both ends take the O(1) paths; interior positions walk to the
    /// predecessor.
    pub fn insert(
        &mut self,
        index: usize,
        block: Rc<MemoryBlock>,
    ) -> Result<Handle, BlockListError> {
        if index > self.len {
            return Err(self.out_of_range(index));
        }
        if index == 0 {
            return Ok(self.push_front(block));
        }
        if index == self.len {
            return Ok(self.push_back(block));
        }

        let prev_id = self
            .walk(index - 1)
            .expect("interior index has a predecessor");
        let after = self.nodes[&prev_id].next;
        let id = self.alloc(block, after);
        self.node_mut(prev_id).next = Some(id);
        self.len += 1;

        trace!(index, handle = id, len = self.len, "inserted block");
        Ok(Handle(id))
    }

    /// Append `block` after the tail.
    pub fn push_back(&mut self, block: Rc<MemoryBlock>) -> Handle {
        let id = self.alloc(block, None);
        match self.tail.replace(id) {
            Some(old_tail) => self.node_mut(old_tail).next = Some(id),
            None => self.head = Some(id),
        }
        self.len += 1;

        trace!(handle = id, len = self.len, "pushed block to back");
        Handle(id)
    }

    /// Prepend `block` before the head.
    pub fn push_front(&mut self, block: Rc<MemoryBlock>) -> Handle {
        let id = self.alloc(block, self.head);
        if self.head.replace(id).is_none() {
            self.tail = Some(id);
        }
        self.len += 1;

        trace!(handle = id, len = self.len, "pushed block to front");
        Handle(id)
    }

    /// The block at position `index` (`0..len()`).
    pub fn block(&self, index: usize) -> Result<&Rc<MemoryBlock>, BlockListError> {
        self.node(index)?
            .map(Node::block)
            .ok_or_else(|| self.out_of_range(index))
    }

    /// Position of the first node holding this exact block (by identity).
    pub fn index_of(&self, block: &Rc<MemoryBlock>) -> Option<usize> {
        self.iter().position(|b| Rc::ptr_eq(b, block))
    }

    pub fn contains(&self, block: &Rc<MemoryBlock>) -> bool {
        self.index_of(block).is_some()
    }

    /// Unlink the node at `index` (`0..len()`) and return its block.
    pub fn remove(&mut self, index: usize) -> Result<Rc<MemoryBlock>, BlockListError> {
        if index >= self.len {
            return Err(self.out_of_range(index));
        }

        let id = if index == 0 {
            let id = self.head.expect("non-empty list has a head");
            self.head = self.nodes[&id].next;
            if self.head.is_none() {
                self.tail = None;
            }
            id
        } else {
            let prev_id = self
                .walk(index - 1)
                .expect("index below len has a predecessor");
            let id = self.nodes[&prev_id]
                .next
                .expect("index below len has a node");
            let after = self.nodes[&id].next;
            self.node_mut(prev_id).next = after;
            if self.tail == Some(id) {
                self.tail = Some(prev_id);
            }
            id
        };

        let node = self
            .nodes
            .remove(&id)
            .expect("unlinked node is in the arena");
        self.len -= 1;

        trace!(index, handle = id, len = self.len, "removed block");
        Ok(node.block)
    }

    /// Remove the first position holding the same block as the node behind
    /// `h`.
    ///
    /// Removal goes by block identity. If that block was inserted more than
    /// once, the earliest copy goes, which need not be `h` itself.
    pub fn remove_node(&mut self, h: Handle) -> Result<Rc<MemoryBlock>, BlockListError> {
        let block = match self.nodes.get(&h.0) {
            Some(node) => Rc::clone(&node.block),
            None => {
                debug!(handle = %h, "stale handle");
                return Err(BlockListError::BlockNotFound);
            }
        };
        self.remove_block(&block)
    }

    /// Remove the first position holding `block` (by identity).
    pub fn remove_block(
        &mut self,
        block: &Rc<MemoryBlock>,
    ) -> Result<Rc<MemoryBlock>, BlockListError> {
        match self.index_of(block) {
            Some(index) => self.remove(index),
            None => {
                debug!(%block, "block not in list");
                Err(BlockListError::BlockNotFound)
            }
        }
    }

    /// Iterate blocks in order. Each call starts again from the head.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            cur: self.head,
            remaining: self.len,
            list: self,
        }
    }

    /// Iterate `(Handle, &Rc<MemoryBlock>)` in order.
    pub fn iter_handles(&self) -> IterHandles<'_> {
        IterHandles { inner: self.iter() }
    }

    fn alloc(&mut self, block: Rc<MemoryBlock>, next: Option<usize>) -> usize {
        let id = self.next_id;
        self.next_id += 1;

        let mut node = Node::new(id, block);
        node.next = next;
        self.nodes.insert(id, node);
        id
    }

    fn node_mut(&mut self, id: usize) -> &mut Node {
        self.nodes.get_mut(&id).expect("linked id is in the arena")
    }

    fn walk(&self, index: usize) -> Option<usize> {
        let mut cur = self.head;
        for _ in 0..index {
            cur = self.nodes[&cur?].next;
        }
        cur
    }

    fn out_of_range(&self, index: usize) -> BlockListError {
        let err = BlockListError::OutOfRange {
            index,
            size: self.len,
        };
        debug!(%err, "rejected index");
        err
    }
}

impl fmt::Display for BlockList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for block in self {
            write!(f, "{block} ")?;
        }
        Ok(())
    }
}

impl fmt::Debug for BlockList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl Extend<Rc<MemoryBlock>> for BlockList {
    fn extend<I: IntoIterator<Item = Rc<MemoryBlock>>>(&mut self, iter: I) {
        for block in iter {
            self.push_back(block);
        }
    }
}

impl FromIterator<Rc<MemoryBlock>> for BlockList {
    fn from_iter<I: IntoIterator<Item = Rc<MemoryBlock>>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a> IntoIterator for &'a BlockList {
    type Item = &'a Rc<MemoryBlock>;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> Iter<'a> {
    fn next_node(&mut self) -> Option<&'a Node> {
        let node = &self.list.nodes[&self.cur?];
        self.cur = node.next;
        self.remaining -= 1;
        Some(node)
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Rc<MemoryBlock>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_node().map(Node::block)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}

impl<'a> Iterator for IterHandles<'a> {
    type Item = (Handle, &'a Rc<MemoryBlock>);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next_node().map(|n| (n.handle(), n.block()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for IterHandles<'_> {}
impl FusedIterator for IterHandles<'_> {}
