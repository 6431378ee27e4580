use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod ingest;
mod logging;
mod site;
mod util;
mod web;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// The command to execute
    #[command(subcommand)]
    command: NewsdeskCommand,
}

#[derive(Parser)]
struct InitArgs {
    /// The path to initialize the project in
    path: PathBuf,

    /// Whether to create the directory if it doesn't exist
    #[arg(short, long, default_value = "false")]
    create: bool,
}

#[derive(Parser)]
struct ServeArgs {
    /// The address to bind to
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: String,

    /// The port to bind to
    #[arg(short, long, env = "PORT", default_value = "5000")]
    port: u16,

    /// Open the site in the default browser
    #[arg(short, long, default_value = "false")]
    open: bool,

    /// The path to the configuration file
    #[arg(short, long, default_value = crate::config::DEFAULT_CONFIG_FILE)]
    config_file: Option<PathBuf>,
}

#[derive(Parser)]
struct IngestArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = crate::config::DEFAULT_CONFIG_FILE)]
    config_file: Option<PathBuf>,

    /// List the records that would be processed without calling the service
    #[arg(short, long, default_value = "false")]
    dry_run: bool,
}

#[derive(Parser)]
struct ListArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = crate::config::DEFAULT_CONFIG_FILE)]
    config_file: Option<PathBuf>,
}

#[derive(Parser)]
struct RenderArgs {
    /// The article to render
    slug: String,

    /// The path to the configuration file
    #[arg(short, long, default_value = crate::config::DEFAULT_CONFIG_FILE)]
    config_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum NewsdeskCommand {
    /// Initialize a new newsdesk project
    Init(InitArgs),

    /// Serve the news site on a local port
    Serve(ServeArgs),

    /// Turn source post records into article files
    Ingest(IngestArgs),

    /// List the available articles
    List(ListArgs),

    /// Print the rendered HTML body of one article
    Render(RenderArgs),
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    logging::init();

    match args.command {
        NewsdeskCommand::Init(args) => {
            commands::init::run(&args).await?;
        }
        NewsdeskCommand::Serve(args) => {
            commands::serve::run(&args).await?;
        }
        NewsdeskCommand::Ingest(args) => {
            commands::ingest::run(&args).await?;
        }
        NewsdeskCommand::List(args) => {
            commands::list::run(&args).await?;
        }
        NewsdeskCommand::Render(args) => {
            commands::render::run(&args).await?;
        }
    }

    Ok(())
}
