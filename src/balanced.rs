//! An AVL tree built from owned boxes. Every insert walks down to the insertion point, then on the
//! way back up recomputes each ancestor's height and rotates any ancestor that became too tall on
//! one side. Each step hands the (possibly new) subtree root back to its parent, which overwrites
//! its own child slot with it. No parent pointers are needed.
//!
//! Equal values are kept, not merged: a value equal to a node's value is routed into its right
//! subtree, so the tree behaves like a sorted multiset.
//!
//! # Examples
//!
//! ```
//! use avl::balanced::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.is_empty());
//! assert_eq!(tree.height(), -1);
//! assert!(!tree.contains(&1));
//!
//! // Ascending inserts would make a plain BST a linked list. This one rebalances.
//! for x in 1..=7 {
//!     tree.insert(x);
//! }
//! assert_eq!(tree.height(), 2);
//! assert!(tree.contains(&4));
//!
//! // Duplicates are kept.
//! tree.insert(4);
//! assert_eq!(tree.iter().filter(|&&x| x == 4).count(), 2);
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use crate::error::InvariantViolation;
use crate::rotation::Rotation;

/// Height of an absent subtree. A leaf has height `0`.
const EMPTY_HEIGHT: isize = -1;

type Link<T> = Option<Box<Node<T>>>;

fn height<T>(link: &Link<T>) -> isize {
    link.as_ref().map_or(EMPTY_HEIGHT, |n| n.height)
}

/// A self-balancing Binary Search Tree (specifically, an AVL tree) holding values of type `T`.
///
/// `T`'s [`Ord`] implementation must be a consistent total order. This isn't checked: with an
/// inconsistent ordering nothing panics, but lookups and traversal order are unspecified.
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Tree<T>
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

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Two trees are equal when they hold the same values, regardless of shape.
impl<T> PartialEq for Tree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T> Eq for Tree<T> where T: Eq {}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of values in the tree, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no values.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of edges on the longest path from the root to a leaf. A tree with a single value
    /// has height `0` and an empty tree has height `-1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::balanced::Tree;
    ///
    /// let mut tree = Tree::new();
    /// assert_eq!(tree.height(), -1);
    ///
    /// tree.insert(1);
    /// assert_eq!(tree.height(), 0);
    ///
    /// tree.insert(2);
    /// tree.insert(3);
    /// assert_eq!(tree.height(), 1);
    /// ```
    pub fn height(&self) -> isize {
        height(&self.root)
    }

    /// Removes every value from the tree.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Returns whether the tree holds a value equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::balanced::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(String::from("b"));
    ///
    /// assert!(tree.contains("b"));
    /// assert!(!tree.contains("a"));
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(node.value.borrow()) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return true,
                Ordering::Greater => node.right.as_deref(),
            };
        }
        false
    }

    /// Inserts `value` into the tree. Inserting never fails: a value equal to one already in the
    /// tree is stored alongside it.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::balanced::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(1);
    /// tree.insert(1);
    ///
    /// assert!(tree.contains(&1));
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, value: T)
    where
        T: Ord,
    {
        self.root = Some(Node::insert(self.root.take(), value));
        self.len += 1;
    }

    /// The smallest value in the tree.
    pub fn min(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.value)
    }

    /// The largest value in the tree. If several values compare equal to it, this is the one
    /// inserted last.
    pub fn max(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.value)
    }

    /// Iterates over the values in ascending order. Equal values come out in insertion order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl::balanced::Tree;
    ///
    /// let tree: Tree<_> = [3, 1, 2].into_iter().collect();
    ///
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// The values in pre-order (node, left subtree, right subtree). Mostly useful for looking at
    /// the shape of the tree.
    pub fn pre_order(&self) -> Vec<&T> {
        let mut values = Vec::with_capacity(self.len);
        if let Some(root) = self.root.as_deref() {
            root.pre_order(&mut values);
        }
        values
    }

    /// The values in post-order (left subtree, right subtree, node).
    pub fn post_order(&self) -> Vec<&T> {
        let mut values = Vec::with_capacity(self.len);
        if let Some(root) = self.root.as_deref() {
            root.post_order(&mut values);
        }
        values
    }

    /// Walks the whole tree and checks that values are in order, stored heights are correct,
    /// every node is balanced and the cached length is right.
    ///
    /// `insert` maintains all of these itself. This is for tests and for debugging a suspect
    /// [`Ord`] implementation.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation>
    where
        T: Ord,
    {
        let counted = match self.root.as_deref() {
            Some(root) => root.check(0, None, None).map(|(_, count)| count),
            None => Ok(0),
        };
        let result = counted.and_then(|counted| {
            if counted == self.len {
                Ok(())
            } else {
                Err(InvariantViolation::LengthMismatch {
                    cached: self.len,
                    counted,
                })
            }
        });

        if let Err(violation) = &result {
            tracing::debug!(error = %violation, "tree invariant violated");
        }
        result
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An in-order iterator over the values of a [`Tree`]. Created by [`Tree::iter`].
pub struct Iter<'a, T> {
    /// Nodes whose value hasn't been yielded yet but whose left subtree has been (or is being)
    /// visited. The next value is on top.
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iter<'a, T> {
    fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

#[derive(Clone)]
struct Node<T> {
    value: T,
    /// Edges on the longest path down to a leaf. A node with no children has a height of 0.
    height: isize,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            height: 0,
            left: None,
            right: None,
        })
    }

    /// Inserts `value` into the subtree rooted at `node` and returns the new root of that subtree.
    fn insert(node: Link<T>, value: T) -> Box<Self>
    where
        T: Ord,
    {
        let Some(mut node) = node else {
            return Self::new_boxed(value);
        };

        // Ties go right.
        if value < node.value {
            node.left = Some(Self::insert(node.left.take(), value));
        } else {
            node.right = Some(Self::insert(node.right.take(), value));
        }

        let mut node = Self::balance(node);
        node.fix_height();
        node
    }

    /// Adjusts the height of `self` to be the max of its children's heights + 1.
    fn fix_height(&mut self) {
        self.height = height(&self.left).max(height(&self.right)) + 1;
    }

    /// The difference in height between the left and right subtrees. See [the Wikipedia
    /// page][wiki] for more details.
    ///
    /// [wiki]: https://en.wikipedia.org/wiki/AVL_tree#Balance_factor
    fn balance_factor(&self) -> isize {
        height(&self.left) - height(&self.right)
    }

    /// Rotates `node` if one of its subtrees is two levels taller than the other. The children of
    /// `node` must already be balanced, so its balance factor is somewhere in `-2..=2`.
    fn balance(mut node: Box<Self>) -> Box<Self> {
        let factor = node.balance_factor();
        let child_factor = match factor {
            2 => node.left.as_ref().map_or(0, |n| n.balance_factor()),
            -2 => node.right.as_ref().map_or(0, |n| n.balance_factor()),
            _ => return node,
        };
        let Some(rotation) = Rotation::choose(factor, child_factor) else {
            return node;
        };

        let node = match rotation {
            Rotation::Right => Self::rotate_right(node),
            Rotation::Left => Self::rotate_left(node),
            Rotation::LeftRight => {
                node.left = node.left.take().map(Self::rotate_left);
                Self::rotate_right(node)
            }
            Rotation::RightLeft => {
                node.right = node.right.take().map(Self::rotate_right);
                Self::rotate_left(node)
            }
        };
        tracing::trace!(rotation = %rotation, height = node.height, "rebalanced subtree");

        // In debug builds, assert that we've restored the AVL invariant locally.
        if cfg!(debug_assertions) {
            assert!(node.balance_factor().abs() <= 1);
            assert_eq!(
                node.height,
                height(&node.left).max(height(&node.right)) + 1
            );
        }
        node
    }

    /// Rotate `node` to the left. This moves the right child up and `node` down. If there is no
    /// right child, `node` is returned as-is.
    ///
    /// # Diagram
    ///
    /// ```text
    ///   node                    pivot
    ///   /  \                    /   \
    ///  x   pivot   rotate ->  node   z
    ///      /   \              /  \
    ///     y     z            x    y
    /// ```
    fn rotate_left(mut node: Box<Self>) -> Box<Self> {
        let Some(mut pivot) = node.right.take() else {
            return node;
        };
        node.right = pivot.left.take();
        node.fix_height();

        pivot.left = Some(node);
        pivot.fix_height();
        pivot
    }

    /// Rotate `node` to the right. This moves the left child up and `node` down. If there is no
    /// left child, `node` is returned as-is.
    ///
    /// # Diagram
    ///
    /// ```text
    ///      node            pivot
    ///      /  \            /   \
    ///   pivot  z  rotate -> x   node
    ///   /   \                   /  \
    ///  x     y                 y    z
    /// ```
    fn rotate_right(mut node: Box<Self>) -> Box<Self> {
        let Some(mut pivot) = node.left.take() else {
            return node;
        };
        node.left = pivot.right.take();
        node.fix_height();

        pivot.right = Some(node);
        pivot.fix_height();
        pivot
    }

    fn pre_order<'a>(&'a self, values: &mut Vec<&'a T>) {
        values.push(&self.value);
        if let Some(left) = self.left.as_deref() {
            left.pre_order(values);
        }
        if let Some(right) = self.right.as_deref() {
            right.pre_order(values);
        }
    }

    fn post_order<'a>(&'a self, values: &mut Vec<&'a T>) {
        if let Some(left) = self.left.as_deref() {
            left.post_order(values);
        }
        if let Some(right) = self.right.as_deref() {
            right.post_order(values);
        }
        values.push(&self.value);
    }

    /// Checks the subtree rooted here, whose values must all lie in `lower..=upper`. Returns the
    /// subtree's height and number of nodes.
    ///
    /// Both bounds are inclusive: ties are inserted to the right, but a later rotation can lift a
    /// right descendant above an equal ancestor, leaving that ancestor in its left subtree.
    fn check<'a>(
        &'a self,
        depth: usize,
        lower: Option<&'a T>,
        upper: Option<&'a T>,
    ) -> Result<(isize, usize), InvariantViolation>
    where
        T: Ord,
    {
        let below = lower.is_some_and(|lower| self.value < *lower);
        let above = upper.is_some_and(|upper| self.value > *upper);
        if below || above {
            return Err(InvariantViolation::Unordered { depth });
        }

        let (left_height, left_count) = match self.left.as_deref() {
            Some(left) => left.check(depth + 1, lower, Some(&self.value))?,
            None => (EMPTY_HEIGHT, 0),
        };
        let (right_height, right_count) = match self.right.as_deref() {
            Some(right) => right.check(depth + 1, Some(&self.value), upper)?,
            None => (EMPTY_HEIGHT, 0),
        };

        let computed = left_height.max(right_height) + 1;
        if self.height != computed {
            return Err(InvariantViolation::StaleHeight {
                depth,
                stored: self.height,
                computed,
            });
        }

        let factor = left_height - right_height;
        if factor.abs() > 1 {
            return Err(InvariantViolation::Unbalanced { depth, factor });
        }

        Ok((computed, left_count + right_count + 1))
    }
}
