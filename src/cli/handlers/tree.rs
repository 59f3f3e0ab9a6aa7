//! Handler for the `tree` command.

use anyhow::{Context, Result};

use crate::cli::TreeArgs;
use crate::cli::output::{OutputFormat, TreeListing, format_tree, print_result};
use crate::export::inspect_source;

/// Handle the `tree` command.
pub fn handle_tree(args: &TreeArgs) -> Result<()> {
    let (tree, index) = inspect_source(&args.source)
        .with_context(|| format!("failed to read {}", args.source.display()))?;

    let mut human = format_tree(&tree);
    if matches!(args.format, OutputFormat::Human) {
        human.push_str(&format!("\nPath index ({} entries):\n", index.len()));
        for (key, target) in index.iter() {
            let path = if key.is_root() { "<root>".to_string() } else { key.to_string() };
            human.push_str(&format!("  {} -> {}\n", path, target.id()));
        }
    }

    print_result(args.format, TreeListing::new(&tree, &index), human.trim_end());
    Ok(())
}
