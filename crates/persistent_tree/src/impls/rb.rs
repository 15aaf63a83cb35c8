use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use crate::validate::{self, InvariantViolation};
use crate::view::{self, InOrder, StructuralView};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

/// Persistent red-black tree.
///
/// `insert` returns a new version and leaves `self` untouched. Only the path
/// from the new leaf to the root is allocated; every other subtree is the
/// same `Arc` as in the previous version.
///
/// Values comparing equal to an existing node are routed into its left
/// subtree and kept, so the tree is a multiset.
#[derive(Debug, PartialEq, Eq)]
pub enum RedBlackTree<T> {
    Empty,
    Node(Arc<Node<T>>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node<T> {
    color: Color,
    value: T,
    left: RedBlackTree<T>,
    right: RedBlackTree<T>,
}

/// Double-red shapes under a black node, in the order they are tested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Shape {
    LeftLeft,
    LeftRight,
    RightLeft,
    RightRight,
}

impl Shape {
    fn classify<T>(left: &RedBlackTree<T>, right: &RedBlackTree<T>) -> Option<Self> {
        if let Some(child) = left.red_node() {
            if child.left.is_red() {
                return Some(Self::LeftLeft);
            }
            if child.right.is_red() {
                return Some(Self::LeftRight);
            }
        }
        if let Some(child) = right.red_node() {
            if child.left.is_red() {
                return Some(Self::RightLeft);
            }
            if child.right.is_red() {
                return Some(Self::RightRight);
            }
        }
        None
    }
}

impl<T> Clone for RedBlackTree<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Node(node) => Self::Node(Arc::clone(node)),
        }
    }
}

impl<T> Default for RedBlackTree<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T> StructuralView for Node<T> {
    type Value = T;

    fn color(&self) -> Option<Color> {
        Some(self.color)
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

impl<T> RedBlackTree<T> {
    pub const fn new() -> Self {
        Self::Empty
    }

    pub(crate) fn from_parts(color: Color, value: T, left: Self, right: Self) -> Self {
        Self::Node(Arc::new(Node {
            color,
            value,
            left,
            right,
        }))
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

    /// Number of stored values, duplicates included. Walks the whole tree.
    pub fn len(&self) -> usize {
        view::count(self.root())
    }

    pub fn height(&self) -> usize {
        view::height(self.root())
    }

    /// Black nodes on the leftmost path. Equal on every path of a valid tree.
    pub fn black_height(&self) -> usize {
        let mut tree = self;
        let mut black = 0;
        while let Self::Node(node) = tree {
            black += usize::from(node.color == Color::Black);
            tree = &node.left;
        }
        black
    }

    pub fn iter(&self) -> InOrder<'_, Node<T>> {
        InOrder::new(self.root())
    }

    /// True when both versions are the very same shared root.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Empty, Self::Empty) => true,
            (Self::Node(a), Self::Node(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    fn red_node(&self) -> Option<&Node<T>> {
        self.root().filter(|node| node.color == Color::Red)
    }

    fn is_red(&self) -> bool {
        self.red_node().is_some()
    }
}

impl<T: Ord> RedBlackTree<T> {
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
        validate::check_order(self.root())?;
        if self.is_red() {
            return Err(InvariantViolation::RedRoot);
        }
        validate::check_colors(self.root()).map(|_| ())
    }
}

impl<T: Ord + Clone> RedBlackTree<T> {
    pub fn insert(&self, value: T) -> Self {
        self.insert_inner(value).blacken_root()
    }

    /// Rebinds `self` to `self.insert(value)`. Versions sharing nodes with
    /// `self` are not affected.
    pub fn insert_mut(&mut self, value: T) {
        *self = self.insert(value);
    }

    // May return a red root; `insert` recolors it.
    fn insert_inner(&self, value: T) -> Self {
        match self {
            Self::Empty => Self::from_parts(Color::Red, value, Self::Empty, Self::Empty),
            Self::Node(node) => {
                if node.value < value {
                    Self::balance(
                        node.color,
                        node.value.clone(),
                        node.left.clone(),
                        node.right.insert_inner(value),
                    )
                } else {
                    Self::balance(
                        node.color,
                        node.value.clone(),
                        node.left.insert_inner(value),
                        node.right.clone(),
                    )
                }
            }
        }
    }

    fn blacken_root(self) -> Self {
        match self {
            Self::Node(node) if node.color == Color::Red => {
                let (value, left, right) = Self::Node(node).into_parts();
                Self::from_parts(Color::Black, value, left, right)
            }
            tree => tree,
        }
    }

    /// Splits a black node holding a red child with a red child of its own
    /// into a red `y` over black `x` and `z`. Anything else is rebuilt as is.
    fn balance(color: Color, value: T, left: Self, right: Self) -> Self {
        if color == Color::Red {
            return Self::from_parts(color, value, left, right);
        }
        match Shape::classify(&left, &right) {
            Some(Shape::LeftLeft) => {
                let (y, x, c) = left.into_parts();
                let (x, a, b) = x.into_parts();
                Self::split(x, y, value, [a, b, c, right])
            }
            Some(Shape::LeftRight) => {
                let (x, a, y) = left.into_parts();
                let (y, b, c) = y.into_parts();
                Self::split(x, y, value, [a, b, c, right])
            }
            Some(Shape::RightLeft) => {
                let (z, y, d) = right.into_parts();
                let (y, b, c) = y.into_parts();
                Self::split(value, y, z, [left, b, c, d])
            }
            Some(Shape::RightRight) => {
                let (y, b, z) = right.into_parts();
                let (z, c, d) = z.into_parts();
                Self::split(value, y, z, [left, b, c, d])
            }
            None => Self::from_parts(color, value, left, right),
        }
    }

    fn split(x: T, y: T, z: T, [a, b, c, d]: [Self; 4]) -> Self {
        Self::from_parts(
            Color::Red,
            y,
            Self::from_parts(Color::Black, x, a, b),
            Self::from_parts(Color::Black, z, c, d),
        )
    }

    // Moves out of uniquely owned nodes, clones out of shared ones.
    fn into_parts(self) -> (T, Self, Self) {
        let Self::Node(node) = self else {
            unreachable!("double-red shape always has a node here");
        };
        let Node {
            value, left, right, ..
        } = Arc::unwrap_or_clone(node);
        (value, left, right)
    }
}

impl<T: Display> Display for RedBlackTree<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        view::describe(f, self.root())
    }
}

impl<T: Ord + Clone> FromIterator<T> for RedBlackTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord + Clone> Extend<T> for RedBlackTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert_mut(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a RedBlackTree<T> {
    type Item = &'a T;
    type IntoIter = InOrder<'a, Node<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
