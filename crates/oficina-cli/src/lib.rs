//! Oficina CLI
//!
//! `oficina describe`, `oficina insight` and `oficina config`.

#![warn(unreachable_pub)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;

pub use cli::build_cli;
pub use config::AppConfig;
pub use logging::init_tracing;

use clap::ArgMatches;
use commands::DescribeArgs;
use oficina_catalog::NewProduct;
use std::path::PathBuf;

/// Execute the parsed command line
///
/// # Errors
/// Configuration, input and output failures. Generation failures are not
/// errors: they produce an empty description or the offline insight.
pub async fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = AppConfig::load(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;

    match matches.subcommand() {
        Some(("describe", args)) => {
            tracing::info!(command = "describe", "running");
            let text_arg = |id: &str| args.get_one::<String>(id).cloned();
            let mut product = NewProduct::new(
                text_arg("name").unwrap_or_default(),
                text_arg("category").unwrap_or_default(),
            );
            product.brand = text_arg("brand");
            product.vehicle_application = text_arg("vehicle");

            let description = commands::describe(&config, DescribeArgs { product }).await?;
            if description.is_empty() {
                tracing::warn!("no description could be generated");
            } else {
                println!("{description}");
            }
        }
        Some(("insight", args)) => {
            tracing::info!(command = "insight", "running");
            let snapshot =
                commands::load_snapshot(args.get_one::<PathBuf>("orders").map(PathBuf::as_path))?;
            let view = commands::insight(&config, &snapshot).await;
            tracing::debug!(offline = view.is_offline(), "insight ready");
            print!("{}", commands::render_insight(&view, args.get_flag("json"))?);
        }
        Some(("config", _)) => {
            print!("{}", config.render()?);
        }
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[tokio::test(start_paused = true)]
    #[traced_test]
    async fn describe_without_output_logs_warning() {
        let matches = build_cli()
            .try_get_matches_from(["oficina", "describe", "--name", "Filtro", "--category", "Motor"])
            .unwrap();

        run(&matches).await.unwrap();

        assert!(logs_contain("running"));
        assert!(logs_contain("no description could be generated"));
    }
}
