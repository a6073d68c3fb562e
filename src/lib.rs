//! This crate exposes a self-balancing Binary Search Tree (an AVL tree)
//! used as an ordered container of values.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores the value
//! that was inserted and will sometimes have child `Node`s. The most
//! important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value greater than (or, for duplicates, equal to) its own value.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is the
//! longest path from the root `Node` to a leaf `Node`). BSTs also naturally
//! support sorted iteration by visiting the left subtree, then the subtree
//! root, then the right subtree.
//!
//! ## AVL Tree
//!
//! An AVL tree additionally keeps, for every `Node`, the heights of its two
//! subtrees within one of each other. Whenever an insertion or deletion
//! breaks that rule, the offending subtree is rotated back into shape on the
//! way back up to the root. This bounds the height by roughly
//! `1.44 * lg(N)` where `N` is the number of nodes in the tree.
//!
//! # Examples
//!
//! ```
//! use balanced_tree::BalancedTree;
//!
//! let tree: BalancedTree<_> = (0..1000).collect();
//!
//! assert_eq!(tree.len(), 1000);
//! assert!(tree.contains(&900));
//! assert!(!tree.contains(&1230));
//! assert_eq!(tree.height(), 10);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod balanced;

pub use balanced::BalancedTree;
