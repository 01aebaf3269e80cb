use super::Context;

pub fn run(ctx: &Context, from: Option<&str>) -> Result<(), String> {
    let tree = ctx.load()?;

    let start = match from {
        Some(name) => super::find(&tree, name)?.id.clone(),
        None => tree.root_id().clone(),
    };

    let outline = tree.outline(&start).map_err(|e| e.to_string())?;
    print!("{outline}");
    Ok(())
}
