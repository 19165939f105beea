//! test-review: Test review navigation core
//!
//! Projects assessment test maps into a review panel and replays host
//! runner sessions against the navigation bridge.

#![allow(clippy::struct_excessive_bools, clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use test_review::{
    cli,
    config::{ConfigPreset, ReviewConfig, ReviewLayout},
    reports::ReportFormat,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "test-review")]
#[command(version)]
#[command(about = "Test review navigation core", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Success
    1  Invalid configuration / rejected replay step
    2  Test map warnings (with --fail-on-warning)

EXAMPLES:
    # Show the review panel of a test map
    test-review project map.json

    # Grid layout, only incorrect answers, as JSON
    test-review project map.json --layout fizzy --filter incorrect -o json

    # Replay a recorded runner session
    test-review replay map.json session.ndjson --final-state")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs (extracted for readability)
// ============================================================================

/// Review settings shared by the map-driven subcommands
#[derive(clap::Args)]
struct ReviewArgs {
    /// Start from a named preset instead of the config file (default, fizzy, blind)
    #[arg(long)]
    preset: Option<String>,

    /// Panel layout
    #[arg(long)]
    layout: Option<ReviewLayout>,

    /// Hide scores (runner option `showScore = false`)
    #[arg(long)]
    no_score: bool,

    /// Hide correct responses (runner option `showCorrect = false`)
    #[arg(long)]
    no_correct: bool,

    /// Show section titles in the grid layout
    #[arg(long)]
    section_titles: bool,
}

impl ReviewArgs {
    /// Resolve the effective configuration: preset or file, then flags.
    fn resolve(&self, config_path: Option<&std::path::Path>) -> Result<ReviewConfig> {
        let mut config = match &self.preset {
            Some(name) => {
                let preset = ConfigPreset::from_name(name).with_context(|| {
                    format!("Unknown preset: {name}. Valid options: default, fizzy, blind")
                })?;
                ReviewConfig::from_preset(preset)
            }
            None => {
                let (config, loaded_from) = test_review::config::load_or_default(config_path);
                if let Some(path) = loaded_from {
                    tracing::debug!("Loaded config from {}", path.display());
                }
                config
            }
        };
        if let Some(layout) = self.layout {
            config.panel.layout = layout;
        }
        if self.no_score {
            config.panel.show_score = false;
        }
        if self.no_correct {
            config.panel.show_correct = false;
            config.item_answer.show_correct = false;
        }
        if self.section_titles {
            config.panel.display_section_titles = true;
        }
        Ok(config)
    }
}

/// Arguments for the `project` subcommand
#[derive(Parser)]
struct ProjectArgs {
    /// Path to the test map (JSON)
    map: PathBuf,

    #[command(flatten)]
    review: ReviewArgs,

    /// Filter to activate (must be configured in the panel)
    #[arg(short, long)]
    filter: Option<String>,

    /// Item to make active
    #[arg(long)]
    active: Option<String>,

    /// Expand every section of the accordion layout
    #[arg(long)]
    expand_all: bool,

    /// Output format
    #[arg(short, long, default_value = "summary")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Omit map warnings from the report
    #[arg(long)]
    hide_warnings: bool,
}

/// Arguments for the `validate` subcommand
#[derive(Parser)]
struct ValidateArgs {
    /// Path to the test map (JSON)
    map: PathBuf,

    #[command(flatten)]
    review: ReviewArgs,

    /// Output format
    #[arg(short, long, default_value = "summary")]
    output: ReportFormat,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Exit with code 2 when the map has warnings
    #[arg(long)]
    fail_on_warning: bool,
}

/// Arguments for the `replay` subcommand
#[derive(Parser)]
struct ReplayArgs {
    /// Path to the test map (JSON)
    map: PathBuf,

    /// Newline-delimited JSON script of host events and reviewer actions
    script: PathBuf,

    #[command(flatten)]
    review: ReviewArgs,

    /// Item the runner is positioned on when the bridge starts
    #[arg(long)]
    start_item: Option<String>,

    /// Print the final panel and item-answer views
    #[arg(long)]
    final_state: bool,

    /// Output file path (stdout if not specified)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a test map into the review panel
    Project(ProjectArgs),

    /// Check a test map and the review configuration
    Validate(ValidateArgs),

    /// Replay host events and reviewer actions against the navigation bridge
    Replay(ReplayArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate JSON Schema for the config file format
    ConfigSchema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .test-review.yaml in the current directory
    Init,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // Dispatch to command handlers
    match cli.command {
        Commands::Project(args) => {
            let review = args.review.resolve(cli.config.as_deref())?;
            cli::run_project(cli::ProjectCommand {
                map_path: args.map,
                review,
                filter: args.filter,
                active: args.active,
                expand_all: args.expand_all,
                output: args.output,
                output_file: args.output_file,
                no_color: cli.no_color,
                hide_warnings: args.hide_warnings,
                quiet: cli.quiet,
            })
        }

        Commands::Validate(args) => {
            let review = args.review.resolve(cli.config.as_deref())?;
            let code = cli::run_validate(
                args.map,
                &review,
                args.output,
                args.output_file,
                args.fail_on_warning,
                cli.quiet,
            )?;
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }

        Commands::Replay(args) => {
            let review = args.review.resolve(cli.config.as_deref())?;
            let code = cli::run_replay(cli::ReplayCommand {
                map_path: args.map,
                script_path: args.script,
                review,
                start_item: args.start_item,
                final_state: args.final_state,
                output_file: args.output_file,
                quiet: cli.quiet,
            })?;
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "test-review", &mut io::stdout());
            Ok(())
        }

        Commands::ConfigSchema { output } => {
            let schema = test_review::config::generate_json_schema()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &schema)?;
                    eprintln!("Schema written to {}", path.display());
                }
                None => {
                    println!("{schema}");
                }
            }
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) =
                    test_review::config::load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml = serde_yaml::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                eprintln!("Config file search paths (in order):");
                for dir in test_review::config::config_search_dirs() {
                    eprintln!("  {}", dir.display());
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in test_review::config::file::CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match test_review::config::discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".test-review.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                let content = test_review::config::generate_example_config();
                std::fs::write(&target, content)
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        let command = Cli::command();
        command.clone().debug_assert();
        assert_eq!(command.get_name(), "test-review");
        assert_eq!(command.get_author(), None);
    }
}
