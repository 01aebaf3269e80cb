use colored::Colorize;
use wt_core::Game;

use super::Context;

fn start(ctx: &Context) -> Result<Game, String> {
    let tree = ctx.load()?;
    Game::new(tree, &ctx.game).map_err(|e| e.to_string())
}

pub fn where_am_i(ctx: &Context) -> Result<(), String> {
    let game = start(ctx)?;
    println!("{}", game.where_am_i().map_err(|e| e.to_string())?);
    Ok(())
}

pub fn moves(ctx: &Context) -> Result<(), String> {
    let game = start(ctx)?;
    let options = game.move_list().map_err(|e| e.to_string())?;

    if options.is_empty() {
        println!("There is nowhere to go from here.");
        return Ok(());
    }
    println!("From here you can move to:");
    for location in options {
        println!("- {}", location.name());
    }
    Ok(())
}

pub fn go(ctx: &Context, target: &str) -> Result<(), String> {
    let mut game = start(ctx)?;
    game.move_to(target).map_err(|e| match e {
        wt_core::WtError::NameNotFound(_) => {
            format!("you cannot go to \"{target}\" from here (try `wt moves`)")
        }
        other => other.to_string(),
    })?;

    println!("{} {target}", "You go to".dimmed());
    println!("{}", game.where_am_i().map_err(|e| e.to_string())?);

    ctx.save(game.tree())
}
