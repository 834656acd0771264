//! Generation requests and results

use serde_json::Value;
use std::fmt;

/// Input for one generation call
///
/// Constructed fresh per call and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    /// Catalog use: describe a product
    Product {
        /// Product name
        name: String,
        /// Product category
        category: String,
    },
    /// Dashboard use: analyze a metrics snapshot
    Snapshot(Value),
}

impl GenerationRequest {
    /// Request a product description
    #[inline]
    #[must_use]
    pub fn product(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self::Product {
            name: name.into(),
            category: category.into(),
        }
    }

    /// Request an analysis of a dashboard snapshot
    #[inline]
    #[must_use]
    pub fn snapshot(snapshot: Value) -> Self {
        Self::Snapshot(snapshot)
    }

    /// Render the prompt sent to the provider
    #[must_use]
    pub fn prompt(&self) -> String {
        match self {
            Self::Product { name, category } => format!(
                "Crie uma descrição técnica e curta (máximo 500 caracteres) para o produto \
                 automotivo \"{name}\" da categoria \"{category}\".\n\
                 Não inclua dicas de marketing, apenas o texto da descrição.\n\
                 Use um tom profissional."
            ),
            Self::Snapshot(snapshot) => {
                let data = serde_json::to_string_pretty(snapshot)
                    .unwrap_or_else(|_| snapshot.to_string());
                format!(
                    "Você é um analista de gestão de oficinas mecânicas.\n\n\
                     A partir dos dados abaixo (JSON real), gere uma análise gerencial \
                     estruturada EXATAMENTE neste formato:\n\n\
                     📌 Resumo Executivo:\n\
                     - 2 a 3 frases objetivas interpretando o cenário geral.\n\n\
                     ⚠️ Pontos de Atenção:\n\
                     - Liste de 2 a 4 possíveis problemas operacionais ou riscos.\n\n\
                     🚀 Oportunidades:\n\
                     - Liste de 2 a 4 ações práticas para melhoria do negócio.\n\n\
                     Regras:\n\
                     - Não descreva gráficos\n\
                     - Não repita números\n\
                     - Interprete os dados\n\
                     - Use linguagem clara, direta e executiva\n\n\
                     Dados:\n{data}\n"
                )
            }
        }
    }
}

impl fmt::Display for GenerationRequest {
    /// Short summary for log lines; never the full prompt
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Product { name, category } => {
                write!(f, "product(name={name:?}, category={category:?})")
            }
            Self::Snapshot(snapshot) => {
                let size = match snapshot {
                    Value::Array(items) => items.len(),
                    Value::Object(fields) => fields.len(),
                    Value::Null => 0,
                    _ => 1,
                };
                write!(f, "snapshot(entries={size})")
            }
        }
    }
}

/// Outcome of a generation call
///
/// `Text` always holds a non-empty string; every failure is `Absent`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenerationResult {
    /// Generated text
    Text(String),
    /// No usable text could be produced
    #[default]
    Absent,
}

impl GenerationResult {
    /// Wrap text, treating blank strings as absent
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim().is_empty() {
            Self::Absent
        } else {
            Self::Text(text)
        }
    }

    /// Check for generated text
    #[inline]
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Borrow the generated text
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Absent => None,
        }
    }

    /// Take the generated text
    #[inline]
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text),
            Self::Absent => None,
        }
    }
}

impl From<Option<String>> for GenerationResult {
    fn from(text: Option<String>) -> Self {
        text.map_or(Self::Absent, Self::from_text)
    }
}
