use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use terraform_driver::{logging, report};

mod commands;

#[derive(Parser)]
#[command(name = "terraform-driver")]
#[command(about = "Create and remove machines by driving Terraform")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value = "driver.yaml")]
    config: PathBuf,

    /// Enable debug logging (also enabled by MACHINE_DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch modules, validate, write variables, then apply the configuration
    Create,

    /// Destroy everything the configuration created
    Remove,

    /// Show the configuration's current outputs
    Outputs {
        /// Output format (text or json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Validate the Terraform configuration
    Validate,
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(err) = smol::block_on(run(cli)) {
        eprint!("{}", report::render(&err));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Create => commands::create::run(&cli.config).await,
        Commands::Remove => commands::remove::run(&cli.config).await,
        Commands::Outputs { format } => commands::outputs::run(&cli.config, &format).await,
        Commands::Validate => commands::validate::run(&cli.config).await,
    }
}
