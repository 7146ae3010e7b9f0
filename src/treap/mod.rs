//! Ordered set backed by a treap: a binary search tree that keeps randomly drawn priorities in
//! heap order so that its expected height stays logarithmic regardless of insertion order.

mod cursor;
mod node;
mod set;
mod tree;

pub use self::cursor::{Cursor, Position};
pub use self::set::{TreapSet, TreapSetIntoIter, TreapSetIter};
