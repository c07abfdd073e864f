//! This crate exposes a self-balancing Binary Search Tree (an AVL tree).
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert and find stored values. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value no greater than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value no less than its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined
//! as the longest path from the root `Node` to a leaf `Node`). BSTs also naturally
//! support sorted iteration by visiting the left subtree, then the subtree root,
//! then the right subtree.
//!
//! ## AVL Tree
//!
//! Inserting values in sorted order into a plain BST produces a linked list of
//! height `N`. An AVL tree prevents this by storing each `Node`'s height and, after
//! every insert, rotating any `Node` whose subtrees differ in height by more than
//! one. This keeps the height below roughly `1.44 * lg(N + 2)`.
//!
//! See [`balanced::Tree`] for the tree itself.

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod balanced;
mod error;
mod rotation;

pub use balanced::Tree as BalancedTree;
pub use error::InvariantViolation;
