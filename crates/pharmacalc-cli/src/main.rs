mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pharmacalc",
    version,
    about = "Drug-excipient compatibility screening and pharmacy calculators"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess drug-excipient compatibility for a set of tags
    Assess {
        /// Drug functional group tag id (repeatable)
        #[arg(short, long = "drug", value_name = "ID")]
        drug: Vec<String>,

        /// Excipient tag id (repeatable)
        #[arg(short, long = "excipient", value_name = "ID")]
        excipient: Vec<String>,

        /// Environmental factor tag id (repeatable)
        #[arg(short, long = "factor", value_name = "ID")]
        factor: Vec<String>,

        /// JSON selection file: {"drugGroups": [...], "excipients": [...], "factors": [...]}
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Custom JSON registry file (default: built-in registry)
        #[arg(short, long, value_name = "FILE")]
        registry: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Show the per-tag score breakdown
        #[arg(long)]
        verbose: bool,
    },
    /// Browse the tag registry
    Tags {
        #[command(subcommand)]
        action: TagsAction,
    },
    /// Manage and inspect registries
    Registry {
        #[command(subcommand)]
        action: RegistryAction,
    },
    /// Run a pharmacy calculator
    Calc {
        #[command(subcommand)]
        calculator: commands::calc::Calculator,
    },
}

#[derive(Subcommand)]
enum TagsAction {
    /// List tags, optionally for one category (drug-groups, excipients, factors)
    List {
        #[arg(short, long)]
        category: Option<String>,

        /// Custom JSON registry file
        #[arg(short, long, value_name = "FILE")]
        registry: Option<PathBuf>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,
    },
    /// Show one tag and the interaction rules it takes part in
    Show {
        id: String,

        /// Custom JSON registry file
        #[arg(short, long, value_name = "FILE")]
        registry: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum RegistryAction {
    /// List predefined registries
    List,
    /// Explain a registry's scoring and interaction rules in plain language
    Explain {
        /// Preset name (e.g., "default")
        preset: String,
    },
    /// Validate a custom registry file
    Validate {
        /// Path to JSON registry file
        file: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Assess {
            drug,
            excipient,
            factor,
            input,
            registry,
            output,
            verbose,
        } => commands::assess::run(
            commands::assess::TagArgs {
                drug_groups: drug,
                excipients: excipient,
                factors: factor,
            },
            input,
            registry,
            &output,
            verbose,
        ),
        Commands::Tags { action } => match action {
            TagsAction::List {
                category,
                registry,
                output,
            } => commands::tags::list(category.as_deref(), registry, &output),
            TagsAction::Show { id, registry } => commands::tags::show(&id, registry),
        },
        Commands::Registry { action } => match action {
            RegistryAction::List => commands::registry::list(),
            RegistryAction::Explain { preset } => commands::registry::explain(&preset),
            RegistryAction::Validate { file } => commands::registry::validate(&file),
        },
        Commands::Calc { calculator } => commands::calc::run(calculator),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
