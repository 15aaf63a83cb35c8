use std::fmt::{self, Display};

use anyhow::{Context, Result, ensure};
use clap::{Parser, ValueEnum};
use persistent_tree::{BinaryTree, Color, PersistentSet, RedBlackTree, StructuralView};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// Sorted input makes the plain tree a chain; its insert recurses once per level.
const PLAIN_SORTED_LIMIT: u32 = 10_000;

#[derive(Parser, Debug)]
#[command(
    name = "tree_demo",
    about = "Insert a sequence into persistent search trees and print the result"
)]
struct Cli {
    /// Number of values to insert; the values are `0..count`.
    #[arg(long, default_value_t = 10)]
    count: u32,
    /// Order in which the values are inserted.
    #[arg(long, value_enum, default_value_t = Order::Ascending)]
    order: Order,
    /// Seed for `--order shuffled`.
    #[arg(long, default_value_t = 0x5EED_2026)]
    seed: u64,
    /// Which tree to build.
    #[arg(long, value_enum, default_value_t = Variant::Both)]
    variant: Variant,
    /// Also print a sideways outline with color tags.
    #[arg(long)]
    outline: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Order {
    Ascending,
    Descending,
    Shuffled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Variant {
    Balanced,
    Plain,
    Both,
}

fn main() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let build_plain = matches!(cli.variant, Variant::Plain | Variant::Both);
    ensure!(
        !build_plain || cli.order == Order::Shuffled || cli.count <= PLAIN_SORTED_LIMIT,
        "--count {} with sorted input exceeds the plain tree limit of {PLAIN_SORTED_LIMIT}",
        cli.count
    );

    let values = sequence(cli.count, cli.order, cli.seed);
    debug!(?values, "insertion order");

    if matches!(cli.variant, Variant::Balanced | Variant::Both) {
        let tree = build::<RedBlackTree<u32>>("balanced", &values)?;
        info!(black_height = tree.black_height(), "balanced tree black height");
        show("balanced", &tree, cli.outline)?;
    }
    if build_plain {
        let tree = build::<BinaryTree<u32>>("plain", &values)?;
        show("plain", &tree, cli.outline)?;
    }
    Ok(())
}

fn sequence(count: u32, order: Order, seed: u64) -> Vec<u32> {
    let mut values: Vec<u32> = (0..count).collect();
    match order {
        Order::Ascending => {}
        Order::Descending => values.reverse(),
        Order::Shuffled => values.shuffle(&mut StdRng::seed_from_u64(seed)),
    }
    values
}

fn build<S>(name: &str, values: &[u32]) -> Result<S>
where
    S: PersistentSet<Value = u32>,
{
    let tree = values.iter().fold(S::new(), |tree, &value| tree.insert(value));
    tree.validate()
        .with_context(|| format!("{name} tree violates an invariant"))?;
    info!(
        variant = name,
        len = tree.len(),
        height = tree.height(),
        "built tree"
    );
    Ok(tree)
}

fn show<S>(name: &str, tree: &S, outline: bool) -> Result<()>
where
    S: PersistentSet + Display,
    S::Value: Display,
{
    println!("{name}: {tree}");
    if outline {
        let text = render_outline(tree.root())
            .with_context(|| format!("failed to render the {name} outline"))?;
        print!("{text}");
    }
    Ok(())
}

/// Right subtree on top, one level of indentation per depth, `R`/`B` tags
/// for colored nodes.
fn render_outline<V>(root: Option<&V>) -> Result<String, fmt::Error>
where
    V: StructuralView,
    V::Value: Display,
{
    let mut out = String::new();
    write_outline(&mut out, root, 0)?;
    Ok(out)
}

fn write_outline<W, V>(out: &mut W, node: Option<&V>, depth: usize) -> fmt::Result
where
    W: fmt::Write,
    V: StructuralView,
    V::Value: Display,
{
    let Some(node) = node else {
        return Ok(());
    };
    write_outline(out, node.right(), depth + 1)?;
    let tag = match node.color() {
        Some(Color::Red) => "R ",
        Some(Color::Black) => "B ",
        None => "",
    };
    writeln!(out, "{}{tag}{}", "    ".repeat(depth), node.label())?;
    write_outline(out, node.left(), depth + 1)
}

#[cfg(test)]
mod tests {
    use super::{Cli, Order, Variant, render_outline, sequence};
    use clap::Parser;
    use persistent_tree::{BinaryTree, RedBlackTree};

    #[test]
    fn sequences_cover_every_value() {
        assert_eq!(sequence(4, Order::Ascending, 0), vec![0, 1, 2, 3]);
        assert_eq!(sequence(4, Order::Descending, 0), vec![3, 2, 1, 0]);

        let mut shuffled = sequence(100, Order::Shuffled, 7);
        assert_eq!(shuffled, sequence(100, Order::Shuffled, 7));
        shuffled.sort_unstable();
        assert_eq!(shuffled, sequence(100, Order::Ascending, 0));
    }

    #[test]
    fn outline_tags_colors() {
        let tree: RedBlackTree<u32> = [10, 5, 15].into_iter().collect();
        assert_eq!(
            render_outline(tree.root()).as_deref(),
            Ok("    R 15\nB 10\n    R 5\n")
        );

        let tree: BinaryTree<u32> = (0..3).collect();
        assert_eq!(
            render_outline(tree.root()).as_deref(),
            Ok("        2\n    1\n0\n")
        );
    }

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["tree_demo"]);
        assert_eq!(cli.count, 10);
        assert_eq!(cli.order, Order::Ascending);
        assert_eq!(cli.variant, Variant::Both);
        assert!(!cli.outline);

        let cli = Cli::parse_from(["tree_demo", "--order", "shuffled", "--variant", "plain"]);
        assert_eq!(cli.order, Order::Shuffled);
        assert_eq!(cli.variant, Variant::Plain);
    }
}
