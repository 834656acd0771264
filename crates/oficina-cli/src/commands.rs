//! Subcommand implementations

use crate::config::AppConfig;
use anyhow::Context;
use oficina_catalog::{validate_new, DescriptionPolicy, NewProduct};
use oficina_dashboard::{
    parse_orders, sample_orders, DashboardSnapshot, InsightPolicy, InsightView, ParsedInsight,
};
use oficina_genai::{GenerationClient, Generator, RetryingGenerator};
use serde::Serialize;
use std::fmt::{self, Write as _};
use std::path::Path;

/// Arguments of `describe`
#[derive(Debug, Clone)]
pub struct DescribeArgs {
    /// Product to describe
    pub product: NewProduct,
}

/// Generate a description with the retrying client
///
/// Returns an empty string when nothing could be generated.
///
/// # Errors
/// Fails only when the product fields are invalid.
pub async fn describe(config: &AppConfig, args: DescribeArgs) -> anyhow::Result<String> {
    let client = GenerationClient::from_config(&config.generation);
    let generator = RetryingGenerator::with_policy(client, config.generation.retry);
    describe_with(generator, args).await
}

/// [`describe`] over any generator
///
/// # Errors
/// Fails only when the product fields are invalid.
pub async fn describe_with<G: Generator>(generator: G, args: DescribeArgs) -> anyhow::Result<String> {
    validate_new(&args.product).context("invalid product")?;
    let fields = DescriptionPolicy::new(generator).on_create(args.product).await;
    Ok(fields.description)
}

/// Load orders from `path`, or the demo set
///
/// # Errors
/// Fails when the file cannot be read or is not an order list.
pub fn load_snapshot(path: Option<&Path>) -> anyhow::Result<DashboardSnapshot> {
    let orders = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read orders file {}", path.display()))?;
            parse_orders(&text).with_context(|| format!("in orders file {}", path.display()))?
        }
        None => sample_orders().context("bundled demo orders")?,
    };
    Ok(DashboardSnapshot::from_orders(orders))
}

/// Run one insight cycle over `snapshot`
pub async fn insight(config: &AppConfig, snapshot: &DashboardSnapshot) -> InsightView {
    let client = GenerationClient::from_config(&config.generation);
    let mut policy = InsightPolicy::bounded(client, &config.dashboard);
    policy.on_snapshot_changed(snapshot).await.clone()
}

#[derive(Serialize)]
struct InsightReport<'a> {
    offline: bool,
    #[serde(flatten)]
    insight: Option<&'a ParsedInsight>,
}

/// Render `view` for the terminal, or as JSON
///
/// # Errors
/// Fails only if JSON serialization fails.
pub fn render_insight(view: &InsightView, json: bool) -> anyhow::Result<String> {
    if json {
        let report = InsightReport {
            offline: view.is_offline(),
            insight: view.sections(),
        };
        return serde_json::to_string_pretty(&report)
            .map(|encoded| encoded + "\n")
            .context("failed to encode insight");
    }

    let Some(insight) = view.sections() else {
        return Ok("Sem dados para analisar.\n".to_string());
    };

    let mut out = String::new();
    if view.is_offline() {
        out.push_str("[modo demo]\n\n");
    }
    writeln!(out, "📊 Resumo Executivo\n{}\n", insight.summary)?;
    push_list(
        &mut out,
        "⚠️ Pontos de Atenção",
        &insight.warnings,
        "Nenhum ponto crítico identificado",
    )?;
    push_list(
        &mut out,
        "💡 Oportunidades",
        &insight.opportunities,
        "Continue focando no crescimento",
    )?;
    Ok(out)
}

fn push_list(out: &mut String, title: &str, items: &[String], empty: &str) -> fmt::Result {
    writeln!(out, "{title}")?;
    if items.is_empty() {
        writeln!(out, "  {empty}")?;
    }
    for item in items {
        writeln!(out, "  - {item}")?;
    }
    writeln!(out)
}
