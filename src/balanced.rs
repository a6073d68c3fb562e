//! A mutable AVL tree storing plain values. Each node owns its children through a `Box` so the
//! tree is a strict hierarchy: no parent pointers, no sharing. Every restructuring operation
//! consumes a subtree root and hands back the (possibly different) node that now roots that
//! subtree.
//!
//! Values that compare equal are all kept. A new value is placed after every value already in
//! the tree that compares equal to it, so equal values are iterated in insertion order.
//!
//! # Examples
//!
//! ```
//! use balanced_tree::BalancedTree;
//!
//! let mut tree = BalancedTree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains(&1));
//!
//! tree.insert(3);
//! tree.insert(1);
//! tree.insert(2);
//! assert!(tree.contains(&1));
//! assert_eq!(tree.len(), 3);
//!
//! // The tree stays balanced.
//! assert_eq!(tree.height(), 2);
//!
//! // Removing reports whether anything was removed.
//! assert!(tree.remove(&1));
//! assert!(!tree.remove(&1));
//!
//! // Iteration is in ascending order.
//! assert_eq!(tree.iter().collect::<Vec<_>>(), vec![&2, &3]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::{FromIterator, FusedIterator};

/// An owned, possibly empty, subtree.
type Link<T> = Option<Box<Node<T>>>;

/// A self-balancing Binary Search Tree (specifically, an AVL tree). This can be used for
/// inserting, finding, and removing values and for visiting them in ascending order.
pub struct BalancedTree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for BalancedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for BalancedTree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            len: self.len,
        }
    }
}

impl<T> fmt::Debug for BalancedTree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Two trees are equal when they hold equal values in the same order. Their shapes may differ.
impl<T> PartialEq for BalancedTree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T> Eq for BalancedTree<T> where T: Eq {}

impl<T> BalancedTree<T> {
    /// Generates a new, empty `BalancedTree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Adds `value` to the tree. Nothing is ever rejected: if the tree already holds values
    /// comparing equal to `value`, the new one is stored after all of them.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_tree::BalancedTree;
    ///
    /// let mut tree = BalancedTree::new();
    /// tree.insert(1);
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, value: T)
    where
        T: Ord,
    {
        self.root = Some(Node::insert(self.root.take(), Node::new_boxed(value)));
        self.len += 1;
    }

    /// Returns whether a value comparing equal to `value` is in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_tree::BalancedTree;
    ///
    /// let mut tree = BalancedTree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.contains(&1));
    /// assert!(!tree.contains(&42));
    /// ```
    pub fn contains(&self, value: &T) -> bool
    where
        T: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return true,
                Ordering::Greater => node.right.as_deref(),
            };
        }

        false
    }

    /// Removes one value comparing equal to `value` from the tree. Returns `false`, leaving the
    /// tree untouched, when there is no such value.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_tree::BalancedTree;
    ///
    /// let mut tree = BalancedTree::new();
    /// tree.insert(1);
    ///
    /// assert!(tree.remove(&1));
    /// assert!(!tree.remove(&1));
    /// assert!(tree.is_empty());
    /// ```
    pub fn remove(&mut self, value: &T) -> bool
    where
        T: Ord,
    {
        let (root, removed) = Node::remove(self.root.take(), value);
        self.root = root;
        if removed {
            self.len -= 1;
        }

        removed
    }

    /// Removes every value from the tree.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// The number of values in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Gets the height of this tree: the number of nodes on the longest path from the root to a
    /// leaf. An empty tree has a height of 0.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// The smallest value in the tree, if any. Of several equal smallest values, this is the
    /// first one inserted.
    pub fn min(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }

        Some(&node.value)
    }

    /// The largest value in the tree, if any. Of several equal largest values, this is the last
    /// one inserted.
    pub fn max(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }

        Some(&node.value)
    }

    /// Returns an iterator over the values of the tree in ascending order. Each call starts a
    /// fresh traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_tree::BalancedTree;
    ///
    /// let tree: BalancedTree<_> = vec![3, 1, 2].into_iter().collect();
    ///
    /// let mut iter = tree.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), Some(&3));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter {
            stack: Vec::with_capacity(self.height()),
            remaining: self.len,
        };
        iter.push_left_spine(self.root.as_deref());
        iter
    }
}

impl<T> FromIterator<T> for BalancedTree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for BalancedTree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a BalancedTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for BalancedTree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let mut iter = IntoIter {
            stack: Vec::with_capacity(self.height()),
            remaining: self.len,
        };
        iter.push_left_spine(self.root.take());
        iter
    }
}

/// An iterator over references to the values of a [`BalancedTree`] in ascending order.
///
/// The traversal keeps its own stack of the nodes whose left subtree is still being visited, so
/// memory use is bounded by the height of the tree rather than by the call stack.
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    fn push_left_spine(&mut self, mut link: Option<&'a Node<T>>) {
        while let Some(node) = link {
            self.stack.push(node);
            link = node.left.as_deref();
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        // Everything on the stack has had its left subtree yielded already.
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

/// An iterator moving the values out of a [`BalancedTree`] in ascending order.
pub struct IntoIter<T> {
    stack: Vec<Box<Node<T>>>,
    remaining: usize,
}

impl<T> IntoIter<T> {
    fn push_left_spine(&mut self, mut link: Link<T>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(node.right.take());
        self.remaining -= 1;
        Some(node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

/// Gets the height of a subtree. A missing subtree has a height of 0.
fn height<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

#[derive(Clone)]
struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,

    /// How many levels are in the subtree rooted at this node.
    /// A node with no children has a height of 1.
    height: usize,
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
            height: 1,
        })
    }

    fn fix_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }

    /// Positive when the left subtree is taller, negative when the right one is.
    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }

    /// Places `new_node` in the subtree rooted at `link` and returns the root of the rebalanced
    /// subtree.
    fn insert(link: Link<T>, new_node: Box<Self>) -> Box<Self>
    where
        T: Ord,
    {
        let Some(mut current) = link else {
            return new_node;
        };

        match new_node.value.cmp(&current.value) {
            Ordering::Less => current.left = Some(Self::insert(current.left.take(), new_node)),
            // Equal values go right so they end up after the values already stored.
            Ordering::Equal | Ordering::Greater => {
                current.right = Some(Self::insert(current.right.take(), new_node))
            }
        }

        current.balance()
    }

    /// Removes one node holding a value equal to `value` from the subtree rooted at `link`.
    /// Returns the new root of the subtree and whether a node was removed.
    fn remove(link: Link<T>, value: &T) -> (Link<T>, bool)
    where
        T: Ord,
    {
        let Some(mut current) = link else {
            return (None, false);
        };

        let removed = match value.cmp(&current.value) {
            Ordering::Less => {
                let (left, removed) = Self::remove(current.left.take(), value);
                current.left = left;
                removed
            }
            Ordering::Greater => {
                let (right, removed) = Self::remove(current.right.take(), value);
                current.right = right;
                removed
            }
            Ordering::Equal => {
                let Node { left, right, .. } = *current;
                let Some(right) = right else {
                    return (left, true);
                };

                // The smallest node on the right takes the removed node's place.
                let (right, mut successor) = right.remove_min();
                successor.left = left;
                successor.right = right;
                return (Some(successor.balance()), true);
            }
        };

        if removed {
            (Some(current.balance()), true)
        } else {
            (Some(current), false)
        }
    }

    /// Detaches the leftmost node of this subtree. Returns what remains of the subtree
    /// (rebalanced) and the detached node, which has no children left.
    fn remove_min(mut self: Box<Self>) -> (Link<T>, Box<Self>) {
        match self.left.take() {
            None => {
                let right = self.right.take();
                (right, self)
            }
            Some(left) => {
                let (left, min) = left.remove_min();
                self.left = left;
                (Some(self.balance()), min)
            }
        }
    }

    /// Restores the AVL invariant at this node, assuming both children already satisfy it and
    /// their heights differ by at most 2. Returns the new root of this subtree.
    ///
    /// See <https://en.wikipedia.org/wiki/AVL_tree#Rebalancing> for terminology.
    fn balance(mut self: Box<Self>) -> Box<Self> {
        self.fix_height();
        let balance_factor = self.balance_factor();
        let root = if balance_factor > 1 {
            if self.left.as_ref().map_or(0, |left| left.balance_factor()) < 0 {
                let left = self.left.take().expect("Left heavy => left child");
                self.left = Some(left.rotate_left());
            }
            self.rotate_right()
        } else if balance_factor < -1 {
            if self.right.as_ref().map_or(0, |right| right.balance_factor()) > 0 {
                let right = self.right.take().expect("Right heavy => right child");
                self.right = Some(right.rotate_right());
            }
            self.rotate_left()
        } else {
            self
        };

        if cfg!(debug_assertions) {
            let left_height = height(&root.left);
            let right_height = height(&root.right);
            assert_eq!(root.height, left_height.max(right_height) + 1);
            assert!(left_height.abs_diff(right_height) <= 1);
        }

        root
    }

    /// Rotate self to the right. This moves the left child up vertically and self down vertically.
    /// Used to rebalance the tree when the left child is too tall. As such, it must only be called
    /// when there _is_ a left child.
    ///
    /// ## Panics
    ///
    /// When called on a node without a left child.
    ///
    /// # Diagram
    ///
    /// ```text
    ///   old_root (i.e. "self")    new_root
    ///    /     \                  /     \
    /// new_root  z     rotate ->  x    old_root
    ///  / \                               /  \
    /// x   y                             y    z
    /// ```
    fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let mut new_root = self.left.take().expect("Rotate right => left child");
        self.left = new_root.right.take();
        self.fix_height();

        new_root.right = Some(self);
        new_root.fix_height();
        new_root
    }

    /// Mirror image of [`Node::rotate_right`]: the right child moves up and self moves down.
    fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let mut new_root = self.right.take().expect("Rotate left => right child");
        self.right = new_root.left.take();
        self.fix_height();

        new_root.left = Some(self);
        new_root.fix_height();
        new_root
    }
}

/// Walks the whole tree checking the cached heights, the AVL balance, the ordering of values
/// and the element count.
#[cfg(test)]
pub(crate) fn assert_invariants<T>(tree: &BalancedTree<T>)
where
    T: Ord + fmt::Debug,
{
    /// Returns the height and the number of nodes of the subtree.
    fn check<T>(link: &Link<T>, lower: Option<&T>, upper: Option<&T>) -> (usize, usize)
    where
        T: Ord + fmt::Debug,
    {
        let Some(node) = link else {
            return (0, 0);
        };

        // Duplicates may end up on either side of an equal value after rotations.
        if let Some(lower) = lower {
            assert!(lower <= &node.value, "{:?} ordered after {:?}", node.value, lower);
        }
        if let Some(upper) = upper {
            assert!(&node.value <= upper, "{:?} ordered before {:?}", node.value, upper);
        }

        let (left_height, left_len) = check(&node.left, lower, Some(&node.value));
        let (right_height, right_len) = check(&node.right, Some(&node.value), upper);
        assert_eq!(node.height, left_height.max(right_height) + 1);
        assert!(left_height.abs_diff(right_height) <= 1);

        (node.height, left_len + right_len + 1)
    }

    let (height, len) = check(&tree.root, None, None);
    assert_eq!(tree.height(), height);
    assert_eq!(tree.len(), len);
    assert_eq!(tree.iter().count(), len);
}
