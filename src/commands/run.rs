//! Command dispatch logic for stat-key-browser

use super::{BuildArgs, ConvertArgs, InitArgs, ValidateArgs, build_dataset_file, convert_rules, init_config, validate_rules};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "stat-key-browser", author, version, long_about = None)]
#[command(about = "Normalize, tag, and categorize cluster statistics keys for browsing")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the browser dataset from a saved key dump
    Build(Box<BuildArgs>),
    /// Check the tag and category rule definitions
    Validate(ValidateArgs),
    /// Convert a rule document into a JSON stanza list
    Convert(ConvertArgs),
    /// Generate a default configuration file
    Init(InitArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        Command::Build(build_args) => build_dataset_file(host, build_args),
        Command::Validate(validate_args) => validate_rules(host, validate_args),
        Command::Convert(convert_args) => convert_rules(host, convert_args),
        Command::Init(init_args) => init_config(host, init_args),
    }
}
