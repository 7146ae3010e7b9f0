//! Arena-backed collections with explicit positions: an ordered set built on a treap, a
//! separate-chaining hash map, a comparator-driven binary heap and a doubly linked list.

pub mod arena;
pub mod compare;
mod error;
pub mod hashmap;
pub mod heap;
pub mod list;
pub mod treap;

pub use crate::error::{Error, Result};
