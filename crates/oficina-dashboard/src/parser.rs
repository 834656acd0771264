//! Insight section parser
//!
//! Splits free-form analysis text into the three sections the dashboard
//! renders. Sections are found by their emoji and label markers:
//!
//! ```text
//! 📌 Resumo Executivo:
//! Operação estável.
//! ⚠️ Pontos de Atenção:
//! - Ordens abertas há muito tempo
//! 🚀 Oportunidades:
//! - Pacotes de revisão
//! ```
//!
//! Parsing never fails. A missing section yields an empty field.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static SUMMARY_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)📌\s*Resumo Executivo:?").expect("summary marker pattern"));

static WARNINGS_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)⚠\x{FE0F}?\s*Pontos de Atenção:?").expect("warnings marker pattern")
});

static OPPORTUNITIES_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)🚀\s*Oportunidades:?").expect("opportunities marker pattern"));

/// Section bodies end at the first of these
const SUMMARY_STOPS: &[char] = &['⚠', '🚀'];
const WARNINGS_STOPS: &[char] = &['🚀', '📌'];

const BULLETS: &[char] = &['-', '•', '*'];

/// Structured management insight
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedInsight {
    /// Executive summary
    #[serde(rename = "resumo")]
    pub summary: String,
    /// Operational risks, in order
    #[serde(rename = "atencao")]
    pub warnings: Vec<String>,
    /// Improvement actions, in order
    #[serde(rename = "oportunidades")]
    pub opportunities: Vec<String>,
}

impl ParsedInsight {
    /// No section was found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.summary.is_empty() && self.warnings.is_empty() && self.opportunities.is_empty()
    }
}

/// Parse analysis text into its three sections
#[must_use]
pub fn parse_insight(text: &str) -> ParsedInsight {
    let clean = text.replace('*', "");

    ParsedInsight {
        summary: section(&clean, &SUMMARY_MARKER, SUMMARY_STOPS)
            .map(|body| body.trim().to_string())
            .unwrap_or_default(),
        warnings: section(&clean, &WARNINGS_MARKER, WARNINGS_STOPS)
            .map(list_items)
            .unwrap_or_default(),
        opportunities: section(&clean, &OPPORTUNITIES_MARKER, &[])
            .map(list_items)
            .unwrap_or_default(),
    }
}

/// Body following `marker`, up to the first stop character or end of text
fn section<'a>(text: &'a str, marker: &Regex, stops: &[char]) -> Option<&'a str> {
    let found = marker.find(text)?;
    let rest = &text[found.end()..];
    let end = rest.find(stops).unwrap_or(rest.len());
    Some(&rest[..end])
}

fn list_items(body: &str) -> Vec<String> {
    body.lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix(BULLETS).unwrap_or(line).trim()
        })
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
