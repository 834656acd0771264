//! Command-line definition

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

/// Build the `oficina` command
#[must_use]
pub fn build_cli() -> Command {
    Command::new("oficina")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Product descriptions and dashboard insights for auto repair shops")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON lines on stderr"),
        )
        .subcommand(
            Command::new("describe")
                .about("Generate a technical description for a product")
                .arg(
                    Arg::new("name")
                        .long("name")
                        .required(true)
                        .help("Product name"),
                )
                .arg(
                    Arg::new("category")
                        .long("category")
                        .required(true)
                        .help("Product category"),
                )
                .arg(Arg::new("brand").long("brand").help("Product brand"))
                .arg(
                    Arg::new("vehicle")
                        .long("vehicle")
                        .help("Vehicle application"),
                ),
        )
        .subcommand(
            Command::new("insight")
                .about("Analyze service orders and print management insights")
                .arg(
                    Arg::new("orders")
                        .long("orders")
                        .value_parser(value_parser!(PathBuf))
                        .help("JSON file with orders (defaults to the demo set)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(Command::new("config").about("Print the effective configuration"))
}
