mod commands;
mod config;
mod logging;
mod session;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

use commands::query::FilterArgs;
use session::Session;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Prisma metric governance toolkit.
#[derive(Parser)]
#[command(name = "prisma", version, about = "Prisma metric governance toolkit")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// Config file (default: ./prisma.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Catalog JSON file (overrides the config's catalog.path)
    #[arg(long, global = true, value_name = "FILE")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter and sort the metric catalog
    Query {
        #[command(flatten)]
        filters: FilterArgs,
        /// Start from a saved filter set; other flags refine it
        #[arg(long, value_name = "NAME")]
        saved: Option<String>,
    },

    /// Save and list named filter sets
    Filters {
        #[command(subcommand)]
        command: FilterCommands,
    },

    /// Suggest a business description from metric fields
    Suggest {
        /// Metric display name
        #[arg(long)]
        name: String,
        /// Metric formula
        #[arg(long)]
        formula: String,
        /// Theme tag (repeatable)
        #[arg(long, value_name = "THEME")]
        theme: Vec<String>,
        /// Business unit tag (repeatable)
        #[arg(long, value_name = "BU")]
        bu: Vec<String>,
        /// Aggregation grain
        #[arg(long, default_value = "")]
        grain: String,
        /// Filter description
        #[arg(long, default_value = "")]
        filters: String,
    },

    /// Review the validation queue
    Queue {
        #[command(subcommand)]
        command: QueueCommands,
    },

    /// List adapters and their read/write state
    Adapters {
        /// Disable the read mode of an adapter for this run (repeatable)
        #[arg(long, value_name = "ID")]
        disable_read: Vec<String>,
        /// Disable the write mode of an adapter for this run (repeatable)
        #[arg(long, value_name = "ID")]
        disable_write: Vec<String>,
    },

    /// Show version-pinned access snippets for a metric
    Snippet {
        /// Metric id (domain.metric_name)
        id: String,
        /// Disable the write mode of an adapter for this run (repeatable)
        #[arg(long, value_name = "ID")]
        disable_write: Vec<String>,
    },

    /// Check a create-form draft (JSON) and preview its queue item
    Draft {
        /// Path to the draft JSON file
        file: PathBuf,
        /// Copy the suggested description into the draft before submitting
        #[arg(long)]
        accept_suggestion: bool,
        /// Submitter recorded on the queue item
        #[arg(long, default_value = "cli", value_name = "WHO")]
        submitted_by: String,
    },
}

#[derive(Subcommand)]
enum FilterCommands {
    /// Save the given filters under NAME
    Save {
        name: String,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// List saved filter sets, oldest first
    List,
}

#[derive(Subcommand)]
enum QueueCommands {
    /// Show every queue item and the status counts
    List,
    /// Approve the pending review for a metric
    Approve {
        /// Metric id
        id: String,
        /// Also apply the approved change and show the resulting record
        #[arg(long)]
        promote: bool,
    },
    /// Flag the pending review for a metric
    Flag {
        /// Metric id
        id: String,
        /// Why the review was flagged (required, non-empty)
        #[arg(long, default_value = "")]
        reason: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match config::load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => exit_with_error(&e.to_string(), cli.output, cli.quiet),
    };
    logging::init(config.log.level.as_deref());

    let mut session = match Session::open(&config, cli.catalog.as_deref()) {
        Ok(s) => s,
        Err(e) => exit_with_error(&e, cli.output, cli.quiet),
    };

    let (output, quiet) = (cli.output, cli.quiet);
    match cli.command {
        Commands::Query { filters, saved } => {
            commands::query::cmd_query(&session, filters, saved.as_deref(), output, quiet);
        }
        Commands::Filters { command } => match command {
            FilterCommands::Save { name, filters } => {
                commands::filters::cmd_save(&session, &name, filters, output, quiet);
            }
            FilterCommands::List => commands::filters::cmd_list(&session, output, quiet),
        },
        Commands::Suggest {
            name,
            formula,
            theme,
            bu,
            grain,
            filters,
        } => {
            let request = prisma_engine::DescriptionRequest {
                name,
                theme,
                bu,
                formula,
                grain,
                filters,
            };
            commands::suggest::cmd_suggest(&request, output, quiet);
        }
        Commands::Queue { command } => match command {
            QueueCommands::List => commands::queue::cmd_list(&session, output, quiet),
            QueueCommands::Approve { id, promote } => {
                commands::queue::cmd_approve(&mut session, &id, promote, output, quiet);
            }
            QueueCommands::Flag { id, reason } => {
                commands::queue::cmd_flag(&mut session, &id, &reason, output, quiet);
            }
        },
        Commands::Adapters {
            disable_read,
            disable_write,
        } => {
            commands::adapters::cmd_adapters(
                &mut session,
                &disable_read,
                &disable_write,
                output,
                quiet,
            );
        }
        Commands::Snippet { id, disable_write } => {
            commands::snippet::cmd_snippet(&mut session, &id, &disable_write, output, quiet);
        }
        Commands::Draft {
            file,
            accept_suggestion,
            submitted_by,
        } => {
            commands::draft::cmd_draft(
                &session,
                &file,
                accept_suggestion,
                &submitted_by,
                output,
                quiet,
            );
        }
    }
}

pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{{\"error\": \"{}\"}}", msg.replace('"', "\\\""));
        }
    }
}

/// Report `msg` and exit with status 1.
pub(crate) fn exit_with_error(msg: &str, output: OutputFormat, quiet: bool) -> ! {
    report_error(msg, output, quiet);
    process::exit(1);
}

pub(crate) fn print_json<T: Serialize>(value: &T) {
    let json = serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
    println!("{}", json);
}
