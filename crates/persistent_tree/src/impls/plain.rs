use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use crate::impls::rb::Color;
use crate::validate::{self, InvariantViolation};
use crate::view::{self, InOrder, StructuralView};

/// Persistent binary search tree without rebalancing.
///
/// Same descent and duplicate policy as [`RedBlackTree`](crate::RedBlackTree),
/// but sorted input degenerates into a chain of height `n`.
#[derive(Debug, PartialEq, Eq)]
pub enum BinaryTree<T> {
    Empty,
    Node(Arc<Node<T>>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<T> {
    value: T,
    left: BinaryTree<T>,
    right: BinaryTree<T>,
}

impl<T> Clone for BinaryTree<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Node(node) => Self::Node(Arc::clone(node)),
        }
    }
}

impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T> StructuralView for Node<T> {
    type Value = T;

    fn color(&self) -> Option<Color> {
        None
    }

    fn value(&self) -> &T {
        &self.value
    }

    fn left(&self) -> Option<&Self> {
        self.left.root()
    }

    fn right(&self) -> Option<&Self> {
        self.right.root()
    }
}

impl<T> BinaryTree<T> {
    pub const fn new() -> Self {
        Self::Empty
    }

    fn from_parts(value: T, left: Self, right: Self) -> Self {
        Self::Node(Arc::new(Node { value, left, right }))
    }

    pub fn root(&self) -> Option<&Node<T>> {
        match self {
            Self::Empty => None,
            Self::Node(node) => Some(node),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn len(&self) -> usize {
        view::count(self.root())
    }

    pub fn height(&self) -> usize {
        view::height(self.root())
    }

    pub fn iter(&self) -> InOrder<'_, Node<T>> {
        InOrder::new(self.root())
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Empty, Self::Empty) => true,
            (Self::Node(a), Self::Node(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl<T: Ord> BinaryTree<T> {
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut tree = self;
        while let Self::Node(node) = tree {
            match Ord::cmp(node.value.borrow(), value) {
                Ordering::Equal => return true,
                Ordering::Less => tree = &node.right,
                Ordering::Greater => tree = &node.left,
            }
        }
        false
    }

    pub fn validate(&self) -> Result<(), InvariantViolation> {
        validate::check_order(self.root())
    }
}

impl<T: Ord + Clone> BinaryTree<T> {
    pub fn insert(&self, value: T) -> Self {
        match self {
            Self::Empty => Self::from_parts(value, Self::Empty, Self::Empty),
            Self::Node(node) => {
                if node.value < value {
                    Self::from_parts(
                        node.value.clone(),
                        node.left.clone(),
                        node.right.insert(value),
                    )
                } else {
                    Self::from_parts(
                        node.value.clone(),
                        node.left.insert(value),
                        node.right.clone(),
                    )
                }
            }
        }
    }

    pub fn insert_mut(&mut self, value: T) {
        *self = self.insert(value);
    }
}

impl<T: Display> Display for BinaryTree<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        view::describe(f, self.root())
    }
}

impl<T: Ord + Clone> FromIterator<T> for BinaryTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord + Clone> Extend<T> for BinaryTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert_mut(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a BinaryTree<T> {
    type Item = &'a T;
    type IntoIter = InOrder<'a, Node<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
