//! Insight policy
//!
//! Decides when a dashboard snapshot is sent for analysis and what the
//! insight panel shows afterwards.
//!
//! - An empty snapshot shows nothing.
//! - A snapshot whose key matches the last accepted one is never resent;
//!   the insight accepted for it is shown again.
//! - While a request is in flight, new snapshots are ignored.
//! - Text carrying an error or unavailability notice, or no text at all,
//!   switches the panel to offline mode with a canned insight. Offline
//!   outcomes do not record the key, so the same snapshot is tried again.
//!
//! State is owned by one dashboard view and mutated through `&mut self`.

use crate::config::InsightConfig;
use crate::parser::{parse_insight, ParsedInsight};
use crate::snapshot::{DashboardSnapshot, SnapshotKey};
use once_cell::sync::Lazy;
use oficina_genai::{GenerationRequest, GenerationResult, Generator, RetryingGenerator};

/// Substrings that mark a reply as an error or unavailability notice
pub const OFFLINE_SENTINELS: [&str; 3] = ["Erro", "não configurada", "indisponível"];

static FALLBACK: Lazy<ParsedInsight> = Lazy::new(|| ParsedInsight {
    summary: "A operação demonstra boa capacidade de entrega com ordens concluídas e \
              faturamento positivo. O ticket médio está equilibrado, indicando um mix \
              saudável de serviços básicos e complexos."
        .to_string(),
    warnings: vec![
        "Monitore o tempo médio de conclusão das ordens abertas para evitar atrasos".to_string(),
        "Acompanhe a disponibilidade de estoque de peças para serviços mais demandados"
            .to_string(),
        "Avalie a capacidade da equipe em períodos de maior demanda".to_string(),
    ],
    opportunities: vec![
        "Implementar programa de manutenção preventiva para fidelizar clientes".to_string(),
        "Criar pacotes de serviços para aumentar o ticket médio".to_string(),
        "Estabelecer parcerias com fornecedores para reduzir custos de peças".to_string(),
        "Utilizar dados históricos para prever demanda e otimizar agenda".to_string(),
    ],
});

/// Canned insight shown in offline mode
#[must_use]
pub fn fallback_insight() -> &'static ParsedInsight {
    &FALLBACK
}

/// Whether `text` is an error or unavailability notice rather than an analysis
#[must_use]
pub fn is_offline_text(text: &str) -> bool {
    OFFLINE_SENTINELS
        .iter()
        .any(|sentinel| text.contains(sentinel))
}

/// What the insight panel renders
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InsightView {
    /// No data to analyze
    #[default]
    Empty,
    /// Waiting for the generator
    Loading,
    /// Parsed analysis of the current snapshot
    Ready(ParsedInsight),
    /// Generation failed or is unavailable
    Offline,
}

impl InsightView {
    /// Sections to render, if any
    #[must_use]
    pub fn sections(&self) -> Option<&ParsedInsight> {
        match self {
            Self::Empty | Self::Loading => None,
            Self::Ready(insight) => Some(insight),
            Self::Offline => Some(fallback_insight()),
        }
    }

    /// Offline mode is active
    #[inline]
    #[must_use]
    pub fn is_offline(&self) -> bool {
        matches!(self, Self::Offline)
    }
}

/// An accepted snapshot awaiting its generation result
#[derive(Debug, Clone)]
pub struct PendingInsight {
    key: SnapshotKey,
    request: GenerationRequest,
}

impl PendingInsight {
    /// Key of the snapshot being analyzed
    #[inline]
    #[must_use]
    pub fn key(&self) -> &SnapshotKey {
        &self.key
    }

    /// Request to send
    #[inline]
    #[must_use]
    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }
}

/// Snapshot-driven insight generation for one dashboard view
#[derive(Debug)]
pub struct InsightPolicy<G> {
    generator: G,
    last_accepted: Option<(SnapshotKey, ParsedInsight)>,
    in_flight: bool,
    view: InsightView,
}

impl<G: Generator> InsightPolicy<RetryingGenerator<G>> {
    /// Policy whose calls are bounded by `config`
    #[must_use]
    pub fn bounded(inner: G, config: &InsightConfig) -> Self {
        Self::new(RetryingGenerator::with_policy(inner, config.retry))
    }
}

impl<G: Generator> InsightPolicy<G> {
    /// Create policy backed by `generator`
    #[inline]
    #[must_use]
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            last_accepted: None,
            in_flight: false,
            view: InsightView::Empty,
        }
    }

    /// Generator in use
    #[inline]
    #[must_use]
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Current render state
    #[inline]
    #[must_use]
    pub fn view(&self) -> &InsightView {
        &self.view
    }

    /// Key of the last snapshot analyzed successfully
    #[inline]
    #[must_use]
    pub fn last_key(&self) -> Option<&SnapshotKey> {
        self.last_accepted.as_ref().map(|(key, _)| key)
    }

    /// A request is outstanding
    #[inline]
    #[must_use]
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Accept `snapshot` for analysis unless it is empty, unchanged, or a
    /// request is already outstanding
    ///
    /// Returns the request to run; hand its result to [`Self::complete`].
    pub fn begin(&mut self, snapshot: &DashboardSnapshot) -> Option<PendingInsight> {
        if snapshot.is_empty() {
            self.view = InsightView::Empty;
            return None;
        }

        let prepared = snapshot
            .key()
            .and_then(|key| snapshot.to_value().map(|value| (key, value)));
        let (key, value) = match prepared {
            Ok(pair) => pair,
            Err(e) => {
                tracing::error!(error = %e, "snapshot could not be serialized; showing fallback insight");
                self.view = InsightView::Offline;
                return None;
            }
        };

        if self.in_flight {
            tracing::debug!("insight request in flight; snapshot skipped");
            return None;
        }
        if let Some((_, insight)) = self.last_accepted.as_ref().filter(|(last, _)| *last == key) {
            tracing::debug!("snapshot unchanged; cached insight restored");
            self.view = InsightView::Ready(insight.clone());
            return None;
        }

        self.in_flight = true;
        self.view = InsightView::Loading;
        Some(PendingInsight {
            key,
            request: GenerationRequest::snapshot(value),
        })
    }

    /// Apply the result of a request started by [`Self::begin`]
    pub fn complete(&mut self, pending: PendingInsight, result: GenerationResult) -> &InsightView {
        self.in_flight = false;

        match result {
            GenerationResult::Text(text) if !is_offline_text(&text) => {
                let insight = parse_insight(&text);
                self.view = InsightView::Ready(insight.clone());
                self.last_accepted = Some((pending.key, insight));
                tracing::info!("insight updated");
            }
            GenerationResult::Text(text) => {
                tracing::warn!(reply = %text, "generator reported unavailability; offline mode");
                self.view = InsightView::Offline;
            }
            GenerationResult::Absent => {
                tracing::warn!("no insight generated; offline mode");
                self.view = InsightView::Offline;
            }
        }

        &self.view
    }

    /// Run one render cycle for `snapshot`
    pub async fn on_snapshot_changed(&mut self, snapshot: &DashboardSnapshot) -> &InsightView {
        let Some(pending) = self.begin(snapshot) else {
            return &self.view;
        };
        let result = self.generator.generate(pending.request()).await;
        self.complete(pending, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::sample_orders;
    use oficina_test_utils::{text, ScriptedGenerator};
    use pretty_assertions::assert_eq;

    const ANALYSIS: &str =
        "📌 Resumo Executivo:\nBoa operação.\n⚠️ Pontos de Atenção:\n- Atrasos\n🚀 Oportunidades:\n- Pacotes";

    fn snapshot() -> DashboardSnapshot {
        DashboardSnapshot::from_orders(sample_orders().unwrap())
    }

    #[tokio::test]
    async fn empty_snapshot_shows_nothing() {
        let mut policy = InsightPolicy::new(ScriptedGenerator::text(ANALYSIS));

        let view = policy.on_snapshot_changed(&DashboardSnapshot::default()).await;

        assert_eq!(view, &InsightView::Empty);
        assert_eq!(policy.generator().calls(), 0);
    }

    #[tokio::test]
    async fn parses_reply_into_sections() {
        let mut policy = InsightPolicy::new(ScriptedGenerator::text(ANALYSIS));

        let view = policy.on_snapshot_changed(&snapshot()).await.clone();

        let sections = view.sections().unwrap();
        assert_eq!(sections.summary, "Boa operação.");
        assert_eq!(sections.warnings, ["Atrasos"]);
        assert_eq!(sections.opportunities, ["Pacotes"]);
        assert_eq!(policy.last_key(), Some(&snapshot().key().unwrap()));
    }

    #[tokio::test]
    async fn identical_snapshots_generate_once() {
        let mut policy = InsightPolicy::new(ScriptedGenerator::new([text(ANALYSIS), text(ANALYSIS)]));

        policy.on_snapshot_changed(&snapshot()).await;
        policy.on_snapshot_changed(&snapshot()).await;

        assert_eq!(policy.generator().calls(), 1);
        assert!(matches!(policy.view(), InsightView::Ready(_)));
    }

    #[tokio::test]
    async fn returning_data_restores_cached_insight_after_empty() {
        let mut policy = InsightPolicy::new(ScriptedGenerator::new([text(ANALYSIS)]));

        policy.on_snapshot_changed(&snapshot()).await;
        let empty = policy.on_snapshot_changed(&DashboardSnapshot::default()).await;
        assert_eq!(empty, &InsightView::Empty);
        let view = policy.on_snapshot_changed(&snapshot()).await.clone();

        assert_eq!(view.sections().map(|s| s.summary.as_str()), Some("Boa operação."));
        assert_eq!(policy.generator().calls(), 1);
    }

    #[tokio::test]
    async fn returning_data_restores_cached_insight_after_offline() {
        let mut policy = InsightPolicy::new(ScriptedGenerator::new([
            text(ANALYSIS),
            GenerationResult::Absent,
        ]));
        let mut orders = sample_orders().unwrap();
        orders.pop();
        let other = DashboardSnapshot::from_orders(orders);

        policy.on_snapshot_changed(&snapshot()).await;
        assert!(policy.on_snapshot_changed(&other).await.is_offline());
        let view = policy.on_snapshot_changed(&snapshot()).await.clone();

        assert!(matches!(view, InsightView::Ready(ref insight) if insight.warnings == ["Atrasos"]));
        assert_eq!(policy.generator().calls(), 2);
    }

    #[tokio::test]
    async fn changed_snapshot_generates_again() {
        let mut policy = InsightPolicy::new(ScriptedGenerator::new([text(ANALYSIS), text(ANALYSIS)]));
        let mut orders = sample_orders().unwrap();
        orders.pop();

        policy.on_snapshot_changed(&snapshot()).await;
        policy.on_snapshot_changed(&DashboardSnapshot::from_orders(orders)).await;

        assert_eq!(policy.generator().calls(), 2);
    }

    #[test]
    fn in_flight_request_blocks_new_snapshots() {
        let mut policy = InsightPolicy::new(ScriptedGenerator::absent());
        let mut orders = sample_orders().unwrap();
        orders.truncate(2);

        let pending = policy.begin(&snapshot()).unwrap();
        assert!(policy.is_in_flight());
        assert_eq!(policy.view(), &InsightView::Loading);
        assert!(policy.begin(&DashboardSnapshot::from_orders(orders)).is_none());

        policy.complete(pending, text(ANALYSIS));
        assert!(!policy.is_in_flight());
        assert!(policy.begin(&snapshot()).is_none());
    }

    #[tokio::test]
    async fn unavailability_notice_switches_to_offline() {
        let mut policy = InsightPolicy::new(ScriptedGenerator::text(
            "IA não configurada. Análise automática indisponível.",
        ));

        let view = policy.on_snapshot_changed(&snapshot()).await;

        assert!(view.is_offline());
        assert_eq!(view.sections(), Some(fallback_insight()));
    }

    #[tokio::test]
    async fn offline_outcome_does_not_record_key() {
        let mut policy = InsightPolicy::new(ScriptedGenerator::new([
            GenerationResult::Absent,
            text("Erro ao gerar análise inteligente."),
            text(ANALYSIS),
        ]));

        assert!(policy.on_snapshot_changed(&snapshot()).await.is_offline());
        assert_eq!(policy.last_key(), None);
        assert!(policy.on_snapshot_changed(&snapshot()).await.is_offline());
        assert!(matches!(
            policy.on_snapshot_changed(&snapshot()).await,
            InsightView::Ready(_)
        ));
        assert_eq!(policy.generator().calls(), 3);
        assert!(!policy.is_in_flight());
    }

    #[test]
    fn request_embeds_snapshot_json() {
        let mut policy = InsightPolicy::new(ScriptedGenerator::absent());
        let pending = policy.begin(&snapshot()).unwrap();

        let GenerationRequest::Snapshot(value) = pending.request() else {
            panic!("expected snapshot request");
        };
        assert_eq!(value["fechadas"], 3);
        assert_eq!(pending.key(), &snapshot().key().unwrap());
    }

    #[test]
    fn sentinels() {
        assert!(is_offline_text("Erro ao gerar análise inteligente."));
        assert!(is_offline_text("Serviço indisponível"));
        assert!(!is_offline_text("📌 Resumo Executivo: tudo certo"));
    }

    #[test]
    fn fallback_has_all_sections() {
        let fallback = fallback_insight();
        assert!(!fallback.summary.is_empty());
        assert_eq!(fallback.warnings.len(), 3);
        assert_eq!(fallback.opportunities.len(), 4);
    }
}
