use anyhow::Result;
use clap::Parser;

use pattern_network::cli::handlers::{
    CommandContext, handle_check, handle_export, handle_generate, handle_init, handle_render,
};
use pattern_network::cli::{Cli, Commands};
use pattern_network::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.clone());

    let cwd = std::env::current_dir()?;
    let command = cli.command.unwrap_or(Commands::Generate {
        skip_image: false,
        strict: false,
    });

    let load_context = || {
        CommandContext::load(
            &cwd,
            cli.config.as_deref(),
            cli.catalog.as_deref(),
            cli.output_dir.as_deref(),
        )
    };

    match command {
        Commands::Init { force } => handle_init(&cwd, force),
        Commands::Generate { skip_image, strict } => {
            handle_generate(&load_context()?, skip_image, strict)
        }
        Commands::Render { output } => handle_render(&load_context()?, output),
        Commands::Export { output, stdout } => handle_export(&load_context()?, output, stdout),
        Commands::Check { json, strict } => handle_check(&load_context()?, json, strict),
    }
}
