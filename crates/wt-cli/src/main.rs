//! CLI frontend for Weltenbaum save files.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wt_core::{GameConfig, TreeConfig};

#[derive(Parser)]
#[command(
    name = "wt",
    about = "Weltenbaum: explore and edit a text-adventure world tree",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Save file holding the world snapshot
    #[arg(short, long, global = true, default_value = "world.json")]
    world: PathBuf,

    /// Name of the creature you play
    #[arg(long, global = true, default_value = "player")]
    player: String,

    /// Deepest nesting followed when walking the tree
    #[arg(long, global = true, default_value = "256")]
    max_depth: usize,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the starter world to the save file
    Init {
        /// Overwrite an existing save file
        #[arg(short, long)]
        force: bool,
    },

    /// List every entity with its parent
    List,

    /// Print the containment tree
    Tree {
        /// Start from this entity instead of the root
        #[arg(short, long)]
        from: Option<String>,
    },

    /// Show details about an entity
    Show {
        /// Entity name
        name: String,
    },

    /// Describe where the player is
    Where,

    /// List the places the player can move to
    Moves,

    /// Move the player and save the world
    Go {
        /// Name of the destination
        target: String,
    },

    /// Load the save file and verify its structure
    Check,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    let ctx = commands::Context {
        path: cli.global.world,
        tree: TreeConfig::default().with_max_depth(cli.global.max_depth),
        game: GameConfig::default().with_player_name(cli.global.player),
    };

    let result = match cli.command {
        Commands::Init { force } => commands::init::run(&ctx, force),
        Commands::List => commands::list::run(&ctx),
        Commands::Tree { from } => commands::tree::run(&ctx, from.as_deref()),
        Commands::Show { name } => commands::show::run(&ctx, &name),
        Commands::Where => commands::play::where_am_i(&ctx),
        Commands::Moves => commands::play::moves(&ctx),
        Commands::Go { target } => commands::play::go(&ctx, &target),
        Commands::Check => commands::check::run(&ctx),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
