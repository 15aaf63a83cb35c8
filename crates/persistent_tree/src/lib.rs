pub mod impls;
pub mod validate;
pub mod view;

/// Persistent ordered multiset interface.
///
/// - `insert` returns a new version; `self` is never modified.
/// - Values comparing equal are kept, not merged.
/// - `contains` relies on the ordering only.
pub trait PersistentSet: Clone + Default {
    type Value: Ord;
    type Node: StructuralView<Value = Self::Value>;

    fn new() -> Self;

    fn insert(&self, value: Self::Value) -> Self;

    fn insert_mut(&mut self, value: Self::Value) {
        *self = self.insert(value);
    }

    fn contains(&self, value: &Self::Value) -> bool;

    fn root(&self) -> Option<&Self::Node>;

    fn validate(&self) -> Result<(), InvariantViolation>;

    fn len(&self) -> usize {
        view::count(self.root())
    }

    fn is_empty(&self) -> bool {
        self.root().is_none()
    }

    fn height(&self) -> usize {
        view::height(self.root())
    }
}

impl<T: Ord + Clone> PersistentSet for RedBlackTree<T> {
    type Value = T;
    type Node = impls::rb::Node<T>;

    fn new() -> Self {
        RedBlackTree::new()
    }

    fn insert(&self, value: T) -> Self {
        RedBlackTree::insert(self, value)
    }

    fn contains(&self, value: &T) -> bool {
        RedBlackTree::contains(self, value)
    }

    fn root(&self) -> Option<&impls::rb::Node<T>> {
        RedBlackTree::root(self)
    }

    fn validate(&self) -> Result<(), InvariantViolation> {
        RedBlackTree::validate(self)
    }
}

impl<T: Ord + Clone> PersistentSet for BinaryTree<T> {
    type Value = T;
    type Node = impls::plain::Node<T>;

    fn new() -> Self {
        BinaryTree::new()
    }

    fn insert(&self, value: T) -> Self {
        BinaryTree::insert(self, value)
    }

    fn contains(&self, value: &T) -> bool {
        BinaryTree::contains(self, value)
    }

    fn root(&self) -> Option<&impls::plain::Node<T>> {
        BinaryTree::root(self)
    }

    fn validate(&self) -> Result<(), InvariantViolation> {
        BinaryTree::validate(self)
    }
}

pub use impls::{BinaryTree, Color, RedBlackTree};
pub use validate::InvariantViolation;
pub use view::{InOrder, StructuralView};
