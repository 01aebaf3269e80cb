use colored::Colorize;

use super::Context;

pub fn run(ctx: &Context, name: &str) -> Result<(), String> {
    let tree = ctx.load()?;
    let entity = super::find(&tree, name)?;

    println!(
        "  {} [{}]",
        entity.name().bold(),
        entity.tag().to_lowercase().dimmed()
    );
    println!("  {}", format!("id {}", entity.id).dimmed());
    println!();

    let description = entity.description().trim();
    if !description.is_empty() {
        for line in description.lines() {
            println!("  {}", line.trim());
        }
        println!();
    }

    if let Some(item) = entity.as_item() {
        println!("  type:       {}", item.item_type());
        print_materials(item.materials());
    }

    let chain: Vec<String> = tree
        .ancestors(&entity.id)
        .map_err(|e| e.to_string())?
        .iter()
        .map(|a| a.name().to_string())
        .collect();
    if !chain.is_empty() {
        println!("  in:         {}", chain.join(" < "));
    }

    let children = tree.children(&entity.id).map_err(|e| e.to_string())?;
    if !children.is_empty() {
        let names: Vec<&str> = children.iter().map(|c| c.name()).collect();
        println!("  contains:   {}", names.join(", "));
    }

    if entity.is_location() {
        let materials = tree.materials_in(&entity.id).map_err(|e| e.to_string())?;
        if !materials.is_empty() {
            println!();
            println!("  {}", "Materials here:".dimmed());
            print_materials(&materials);
        }
    }

    Ok(())
}

fn print_materials(materials: &wt_core::MaterialComposition) {
    for (material, amount) in materials {
        println!("    {material}: {amount}");
    }
}
