//! Generates the charm's markdown reference pages from its schemas.
use clap::{Parser, Subcommand};
use demo_charm::docs::DocsGenerator;

#[derive(Parser)]
#[command(name = "generate-docs")]
#[command(about = "Generate reference documentation for the demo charm")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every reference page
    All {
        #[arg(short, long, default_value = "docs/reference")]
        output: String,
    },
    /// Generate the configuration options page
    Config {
        #[arg(short, long, default_value = "docs/reference")]
        output: String,
    },
    /// Generate the actions page
    Actions {
        #[arg(short, long, default_value = "docs/reference")]
        output: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::All { output } => {
            DocsGenerator::new().with_output_dir(output).generate_all()?;
        }
        Commands::Config { output } => {
            DocsGenerator::new()
                .with_output_dir(output)
                .generate_config()?;
        }
        Commands::Actions { output } => {
            DocsGenerator::new()
                .with_output_dir(output)
                .generate_actions()?;
        }
    }

    Ok(())
}
