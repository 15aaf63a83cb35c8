pub mod plain;
pub mod rb;

pub use plain::BinaryTree;
pub use rb::{Color, RedBlackTree};
