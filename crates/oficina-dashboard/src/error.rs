//! Error types for the dashboard

/// Dashboard failure
///
/// Generation never surfaces here; a failed insight only switches the view
/// to offline mode.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// Snapshot could not be serialized into its key
    #[error("failed to serialize snapshot: {0}")]
    Snapshot(#[source] serde_json::Error),

    /// Order list could not be read
    #[error("invalid order data: {0}")]
    Orders(#[source] serde_json::Error),
}
