use std::fmt::{self, Display, Formatter};

use crate::impls::rb::Color;

/// Read-only structural view of a tree node.
///
/// A renderer needs nothing beyond this: the color tag, a display label for
/// the value, and the two children, recursively.
pub trait StructuralView {
    type Value;

    /// `None` for trees that carry no color tag.
    fn color(&self) -> Option<Color>;

    fn value(&self) -> &Self::Value;

    fn left(&self) -> Option<&Self>;

    fn right(&self) -> Option<&Self>;

    fn label(&self) -> String
    where
        Self::Value: Display,
    {
        self.value().to_string()
    }

    fn is_leaf(&self) -> bool {
        self.left().is_none() && self.right().is_none()
    }
}

pub fn height<V: StructuralView>(node: Option<&V>) -> usize {
    node.map_or(0, |n| 1 + height(n.left()).max(height(n.right())))
}

pub fn count<V: StructuralView>(node: Option<&V>) -> usize {
    node.map_or(0, |n| 1 + count(n.left()) + count(n.right()))
}

/// Writes the parenthesized in-order form: `()` for an empty tree, `(v)` for
/// a leaf and `(left v right)` otherwise. Colors are not shown.
pub fn describe<V>(f: &mut Formatter<'_>, node: Option<&V>) -> fmt::Result
where
    V: StructuralView,
    V::Value: Display,
{
    let Some(node) = node else {
        return f.write_str("()");
    };
    if node.is_leaf() {
        return write!(f, "({})", node.value());
    }
    f.write_str("(")?;
    describe(f, node.left())?;
    write!(f, " {} ", node.value())?;
    describe(f, node.right())?;
    f.write_str(")")
}

/// In-order iterator over the values reachable from a node.
pub struct InOrder<'a, V> {
    stack: Vec<&'a V>,
}

impl<'a, V: StructuralView> InOrder<'a, V> {
    pub fn new(root: Option<&'a V>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a V>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, V: StructuralView> Iterator for InOrder<'a, V> {
    type Item = &'a V::Value;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node.value())
    }
}
