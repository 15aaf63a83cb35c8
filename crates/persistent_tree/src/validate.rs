use thiserror::Error;

use crate::impls::rb::Color;
use crate::view::StructuralView;

/// First broken invariant found by a pre-order walk.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("value at depth {depth} is out of order with respect to an ancestor")]
    OutOfOrder { depth: usize },

    #[error("root node is red")]
    RedRoot,

    #[error("red node at depth {depth} has a red child")]
    RedRed { depth: usize },

    #[error("black height differs below depth {depth}: left {left}, right {right}")]
    BlackHeightMismatch {
        depth: usize,
        left: usize,
        right: usize,
    },
}

/// Checks `left <= node <= right` for every node against all of its
/// ancestors, i.e. that the in-order walk is non-decreasing.
///
/// Equal values are allowed on both sides: insertion sends ties left, but a
/// rotation can lift a tie above its twin.
pub fn check_order<V>(root: Option<&V>) -> Result<(), InvariantViolation>
where
    V: StructuralView,
    V::Value: Ord,
{
    check_bounds(root, None, None, 0)
}

fn check_bounds<V>(
    node: Option<&V>,
    lower: Option<&V::Value>,
    upper: Option<&V::Value>,
    depth: usize,
) -> Result<(), InvariantViolation>
where
    V: StructuralView,
    V::Value: Ord,
{
    let Some(node) = node else {
        return Ok(());
    };
    let value = node.value();
    if lower.is_some_and(|lo| value < lo) || upper.is_some_and(|hi| value > hi) {
        return Err(InvariantViolation::OutOfOrder { depth });
    }
    check_bounds(node.left(), lower, Some(value), depth + 1)?;
    check_bounds(node.right(), Some(value), upper, depth + 1)
}

/// Checks the no-red-red and equal black-height rules and returns the black
/// height of `root`. Uncolored nodes count as black.
pub fn check_colors<V: StructuralView>(root: Option<&V>) -> Result<usize, InvariantViolation> {
    black_height(root, 0)
}

fn black_height<V: StructuralView>(
    node: Option<&V>,
    depth: usize,
) -> Result<usize, InvariantViolation> {
    let Some(node) = node else {
        return Ok(0);
    };
    let red = is_red(Some(node));
    if red && (is_red(node.left()) || is_red(node.right())) {
        return Err(InvariantViolation::RedRed { depth });
    }
    let left = black_height(node.left(), depth + 1)?;
    let right = black_height(node.right(), depth + 1)?;
    if left != right {
        return Err(InvariantViolation::BlackHeightMismatch { depth, left, right });
    }
    Ok(left + usize::from(!red))
}

fn is_red<V: StructuralView>(node: Option<&V>) -> bool {
    node.is_some_and(|n| n.color() == Some(Color::Red))
}
