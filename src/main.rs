use anyhow::Result;
use clap::Parser;
use terpmap::cli::{Cli, Commands};
use terpmap::commands::effects::{run_effects, EffectsConfig};
use terpmap::commands::list::{run_list, ListConfig};
use terpmap::commands::tree::{run_tree, TreeConfig};
use terpmap::commands::{init, CommandContext};
use std::path::Path;

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Error);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let output = dispatch(cli.command, cli.config.as_deref(), cli.plain)?;

    print!("{output}");
    Ok(())
}

// `init` runs without loading a config, so a broken one can be replaced.
fn dispatch(command: Commands, config: Option<&Path>, plain: bool) -> Result<String> {
    let context = || CommandContext::load(config, plain);

    match command {
        Commands::Init { force } => init::init_config(force),
        Commands::List {
            catalog,
            filter,
            sort,
            desc,
            locale,
            format,
        } => run_list(
            &context()?,
            ListConfig {
                catalog,
                filter,
                sort,
                descending: desc,
                locale,
                format,
            },
        ),
        Commands::Tree {
            catalog,
            filter,
            all,
            locale,
            format,
        } => run_tree(
            &context()?,
            TreeConfig {
                catalog,
                filter,
                whole_catalog: all,
                locale,
                format,
            },
        ),
        Commands::Effects {
            catalog,
            locale,
            format,
        } => run_effects(
            &context()?,
            EffectsConfig {
                catalog,
                locale,
                format,
            },
        ),
    }
}
