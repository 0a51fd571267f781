//! addrs cli interface

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Formatter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse target addresses and print what they refer to
    Parse(ParseCommand),

    /// Check if one address contains another
    ///
    /// Exits with 0 when OTHER is contained in ADDR, 2 when it is not.
    Contains(ContainsCommand),
}

#[derive(Parser, Debug)]
pub struct ParseCommand {
    #[clap(flatten)]
    pub output: OutputArgs,

    /// Target addresses, e.g. module.foo[0].test_resource.bar
    #[arg(required = true)]
    pub targets: Vec<String>,
}

#[derive(Parser, Debug)]
pub struct ContainsCommand {
    /// The containing address
    pub addr: String,

    /// The address to look for
    pub other: String,
}

#[derive(Parser, Debug)]
pub struct OutputArgs {
    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum OutputFormat {
    Json,
    #[default]
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}
