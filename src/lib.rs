mod block;
mod block_list;
mod errors;
mod handle;
mod node;

pub use block::MemoryBlock;
pub use block_list::{BlockList, Iter, IterHandles};
pub use errors::BlockListError;
pub use handle::Handle;
pub use node::Node;
