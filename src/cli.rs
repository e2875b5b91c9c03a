use crate::commands::{self, ConfigUpdate};
use crate::common::CommonParams;
use crate::compare::{self, CompareOptions};
use crate::log_debug;
use crate::logger::DEFAULT_LOG_FILE;
use crate::ui;
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, crate_version};
use std::path::PathBuf;

/// CLI structure defining the available commands and global arguments
#[derive(Parser)]
#[command(
    author,
    version = crate_version!(),
    about = "EV Twin-Track: side-by-side comparison of two electric vehicle models",
    long_about = "EV Twin-Track asks a search-grounded Gemini model to compare two EV models and renders a similarity score, common ground, key contrasts, a spec table and cited sources.",
    disable_version_flag = true,
    styles = get_styles(),
)]
pub struct Cli {
    /// Subcommands available for the CLI
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log debug messages to a file
    #[arg(
        short = 'l',
        long = "log",
        global = true,
        help = "Log debug messages to a file"
    )]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(
        long = "log-file",
        global = true,
        help = "Specify a custom log file path"
    )]
    pub log_file: Option<String>,

    /// Suppress non-essential output (spinners, waiting messages, etc.)
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress non-essential output"
    )]
    pub quiet: bool,

    /// Display the version
    #[arg(
        short = 'v',
        long = "version",
        global = true,
        help = "Display the version"
    )]
    pub version: bool,
}

/// Enumeration of available subcommands
#[derive(Subcommand)]
#[command(subcommand_negates_reqs = true)]
#[command(subcommand_precedence_over_arg = true)]
pub enum Commands {
    /// Compare two vehicle models
    #[command(
        about = "Compare two EV models",
        long_about = "Compare two EV models using a search-grounded Gemini model. Optionally embed a CSV of your own spec data in the request."
    )]
    Compare {
        #[command(flatten)]
        common: CommonParams,

        /// First model (e.g. "Ather 450X")
        #[arg(value_name = "MODEL_A")]
        model_a: String,

        /// Second model (e.g. "Ola S1 Pro")
        #[arg(value_name = "MODEL_B")]
        model_b: String,

        /// Supplemental CSV data embedded verbatim in the request
        #[arg(long, value_name = "FILE", help = "Supplemental CSV data to embed in the request")]
        csv: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long, help = "Print the result as JSON instead of a report")]
        json: bool,

        /// Print the assembled prompt before sending it
        #[arg(long, help = "Print the assembled prompt before sending it")]
        show_prompt: bool,
    },

    /// Print the prompt a comparison would send
    #[command(about = "Print the comparison prompt without calling the API")]
    Prompt {
        #[arg(value_name = "MODEL_A")]
        model_a: String,

        #[arg(value_name = "MODEL_B")]
        model_b: String,

        #[arg(long, value_name = "FILE", help = "Supplemental CSV data to embed in the request")]
        csv: Option<PathBuf>,
    },

    /// Parse a saved raw response offline
    #[command(
        about = "Parse a saved response offline",
        long_about = "Parse a raw comparison response from a file (or stdin when no file is given) and render it without calling the API."
    )]
    Parse {
        /// Response file; stdin when omitted
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        #[arg(long, help = "Name of the first model (default \"Model 1\")")]
        model_a: Option<String>,

        #[arg(long, help = "Name of the second model (default \"Model 2\")")]
        model_b: Option<String>,

        #[arg(long, help = "Print the result as JSON instead of a report")]
        json: bool,
    },

    /// Configure Twin-Track settings
    #[command(
        about = "Configure Twin-Track settings",
        long_about = "Configure the Gemini API key, model, generation and performance settings."
    )]
    Config {
        #[command(flatten)]
        common: CommonParams,

        /// Set API key
        #[arg(long, help = "Set the Gemini API key")]
        api_key: Option<String>,

        /// Enable or disable web-search grounding
        #[arg(long, value_name = "BOOL", help = "Enable or disable web-search grounding")]
        search: Option<bool>,

        /// Request timeout in seconds
        #[arg(long, value_name = "SECS", help = "Request timeout in seconds")]
        timeout: Option<u64>,

        /// Set additional parameters for the provider
        #[arg(
            long,
            help = "Set additional generation parameters (key=value)",
            number_of_values = 1
        )]
        param: Option<Vec<String>>,

        /// Print the effective configuration as TOML
        #[arg(short, long, help = "Print the configuration as TOML (API key masked)")]
        print: bool,
    },
}

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

/// Parse the command-line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Main function to parse arguments and handle the command
pub async fn main() -> anyhow::Result<()> {
    let cli = parse_args();

    if cli.version {
        ui::print_version(crate_version!());
        return Ok(());
    }

    if cli.log {
        crate::logger::enable_logging();
        let log_file = cli.log_file.as_deref().unwrap_or(DEFAULT_LOG_FILE);
        crate::logger::set_log_file(log_file)?;

        // TWIN_TRACK_VERBOSE may already have switched verbose on
        if let Ok(config) = crate::config::Config::load()
            && config.performance.verbose_logging
        {
            crate::logger::set_verbose_logging(true);
        }
        if crate::logger::is_verbose_logging() {
            log_debug!("Verbose logging enabled - HTTP client logs included");
        }
    } else {
        crate::logger::disable_logging();
    }

    if cli.quiet {
        ui::set_quiet_mode(true);
    }

    if let Some(command) = cli.command {
        handle_command(command).await
    } else {
        let _ = Cli::parse_from(["twin-track", "--help"]);
        Ok(())
    }
}

/// Dispatch a parsed subcommand
pub async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Compare {
            common,
            model_a,
            model_b,
            csv,
            json,
            show_prompt,
        } => {
            log_debug!(
                "Handling 'compare' command with common: {:?}, csv: {:?}, json: {}, show_prompt: {}",
                common,
                csv,
                json,
                show_prompt
            );
            compare::handle_compare_command(
                common,
                CompareOptions {
                    model_a,
                    model_b,
                    csv,
                    json,
                    show_prompt,
                },
            )
            .await?;
        }
        Commands::Prompt {
            model_a,
            model_b,
            csv,
        } => {
            log_debug!("Handling 'prompt' command with csv: {:?}", csv);
            compare::handle_prompt_command(model_a, model_b, csv).await?;
        }
        Commands::Parse {
            file,
            model_a,
            model_b,
            json,
        } => {
            log_debug!("Handling 'parse' command with file: {:?}", file);
            compare::handle_parse_command(file, model_a, model_b, json).await?;
        }
        Commands::Config {
            common,
            api_key,
            search,
            timeout,
            param,
            print,
        } => {
            commands::handle_config_command(
                &common,
                ConfigUpdate {
                    api_key,
                    search,
                    timeout,
                    param,
                },
                print,
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_compare_arguments() {
        let cli = Cli::parse_from([
            "twin-track",
            "compare",
            "Ather 450X",
            "Ola S1 Pro",
            "--csv",
            "specs.csv",
            "--no-search",
            "--temperature",
            "0.2",
        ]);

        match cli.command {
            Some(Commands::Compare {
                common,
                model_a,
                model_b,
                csv,
                json,
                ..
            }) => {
                assert_eq!(model_a, "Ather 450X");
                assert_eq!(model_b, "Ola S1 Pro");
                assert_eq!(csv, Some(PathBuf::from("specs.csv")));
                assert!(!json);
                assert!(common.no_search);
                assert_eq!(common.temperature, Some(0.2));
            }
            _ => panic!("expected compare command"),
        }
    }

    #[test]
    fn test_config_model_flag_comes_from_common_params() {
        let cli = Cli::parse_from(["twin-track", "config", "--model", "gemini-2.5-flash", "--search", "false"]);
        match cli.command {
            Some(Commands::Config { common, search, .. }) => {
                assert_eq!(common.model.as_deref(), Some("gemini-2.5-flash"));
                assert_eq!(search, Some(false));
            }
            _ => panic!("expected config command"),
        }
    }
}
