//! Oficina Dashboard - workshop indicators and generated insights
//!
//! - Orders and the indicators derived from them
//! - Snapshots with a structural change-detection key
//! - [`parse_insight`] splitting analysis text into three sections
//! - [`InsightPolicy`] deciding when to ask for a fresh analysis
//!
//! # Example
//!
//! ```rust,ignore
//! use oficina_dashboard::{sample_orders, DashboardSnapshot, InsightConfig, InsightPolicy};
//! use oficina_genai::{GenerationClient, GenerationConfig};
//!
//! # async fn example() -> Result<(), oficina_dashboard::DashboardError> {
//! let client = GenerationClient::from_config(&GenerationConfig::from_env());
//! let mut policy = InsightPolicy::bounded(client, &InsightConfig::default());
//!
//! let snapshot = DashboardSnapshot::from_orders(sample_orders()?);
//! if let Some(insight) = policy.on_snapshot_changed(&snapshot).await.sections() {
//!     println!("{}", insight.summary);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod config;
pub mod error;
pub mod insight;
pub mod orders;
pub mod parser;
pub mod snapshot;

pub use config::InsightConfig;
pub use error::DashboardError;
pub use insight::{
    fallback_insight, is_offline_text, InsightPolicy, InsightView, PendingInsight,
    OFFLINE_SENTINELS,
};
pub use orders::{parse_orders, sample_orders, Order, OrderMetrics, OrderStatus};
pub use parser::{parse_insight, ParsedInsight};
pub use snapshot::{DashboardSnapshot, SnapshotKey};
