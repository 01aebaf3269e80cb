use comfy_table::{ContentArrangement, Table};

use super::Context;

pub fn run(ctx: &Context) -> Result<(), String> {
    let tree = ctx.load()?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Type", "Parent", "ID"]);

    for entity in tree.entities() {
        let parent = match tree.parent_id(&entity.id) {
            Some(pid) => tree
                .get(pid)
                .map(|p| p.name().to_string())
                .unwrap_or_else(|_| format!("<missing {pid}>")),
            None if entity.id == *tree.root_id() => "(root)".to_string(),
            None => "—".to_string(),
        };
        table.add_row(vec![
            entity.name(),
            entity.tag(),
            parent.as_str(),
            entity.id.short(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} entities", tree.entity_count());

    Ok(())
}
