//! This crate exposes an ordered map, [`TreeMap`], backed by a plain Binary Search Tree (BST).
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key, the value
//! associated with that key, and sometimes has child `Node`s. The most
//! important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Because the keys are kept in order, a BST can answer questions a hash map can't, like "what is
//! the greatest key not above `x`?" (the _floor_ of `x`) or "what is the least key not below
//! `x`?" (the _ceiling_ of `x`). These take `O(height)` where `height` is the longest path from
//! the root `Node` to a leaf `Node`.
//!
//! The tree in this crate does **not** rebalance itself. Its shape is decided entirely by the
//! order keys are inserted in: random insertion orders give a height around `O(lg N)` but sorted
//! insertion orders give a height of `N`.
//!
//! # Examples
//!
//! ```
//! use treemap::{Error, TreeMap};
//!
//! let mut map = TreeMap::new();
//! map.insert(60, 'A').unwrap();
//! map.insert(30, 'B').unwrap();
//! map.insert(90, 'C').unwrap();
//!
//! assert_eq!(map.floor_key(&89), Ok(&60));
//! assert_eq!(map.ceil_key(&89), Ok(&90));
//! assert_eq!(map.floor_key(&20), Err(Error::KeyOutOfRange));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
mod treemap;

pub use error::{Error, Result};
pub use treemap::TreeMap;
