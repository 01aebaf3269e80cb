use colored::Colorize;

use super::Context;

pub fn run(ctx: &Context) -> Result<(), String> {
    let tree = ctx.load()?;
    tree.validate().map_err(|e| e.to_string())?;

    let reachable = tree
        .top_down(tree.root_id())
        .map_err(|e| e.to_string())?
        .len();
    let detached = tree.entity_count() - reachable;

    println!(
        "  {} {} entities, {} reachable from {}",
        "ok".green().bold(),
        tree.entity_count(),
        reachable,
        tree.root().name()
    );
    if detached > 0 {
        println!("  {} {detached} entities outside the tree", "note".yellow());
    }
    println!("  All checks passed.");

    Ok(())
}
