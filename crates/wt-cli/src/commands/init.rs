use wt_core::ItemCatalog;
use wt_core::starter::starter_world;

use super::Context;

pub fn run(ctx: &Context, force: bool) -> Result<(), String> {
    if ctx.path.exists() && !force {
        return Err(format!(
            "'{}' already exists (use --force to overwrite)",
            ctx.path.display()
        ));
    }

    let tree = starter_world(&ItemCatalog::standard()).map_err(|e| e.to_string())?;
    ctx.save(&tree)?;

    println!(
        "Created world in {} ({} entities)",
        ctx.path.display(),
        tree.entity_count()
    );
    println!();
    println!("Get started:");
    println!("  wt where       # Look around");
    println!("  wt moves       # See where you can go");
    println!("  wt go <place>  # Go there");

    Ok(())
}
