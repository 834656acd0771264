//! Dashboard snapshot and its change-detection key
//!
//! A snapshot has no identity beyond its serialized content: two snapshots
//! built separately from the same orders share a key.

use crate::error::DashboardError;
use crate::orders::{Order, OrderMetrics};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Everything the dashboard shows, as sent to the generator
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    /// Orders on display
    pub orders: Vec<Order>,
    /// Indicators computed from `orders`
    #[serde(flatten)]
    pub metrics: OrderMetrics,
}

impl DashboardSnapshot {
    /// Build a snapshot and its indicators from `orders`
    #[must_use]
    pub fn from_orders(orders: Vec<Order>) -> Self {
        let metrics = OrderMetrics::from_orders(&orders);
        Self { orders, metrics }
    }

    /// Nothing to analyze
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// JSON form sent to the generator
    ///
    /// # Errors
    /// `DashboardError::Snapshot` if serialization fails.
    pub fn to_value(&self) -> Result<Value, DashboardError> {
        serde_json::to_value(self).map_err(DashboardError::Snapshot)
    }

    /// Change-detection key (compact JSON)
    ///
    /// # Errors
    /// `DashboardError::Snapshot` if serialization fails.
    pub fn key(&self) -> Result<SnapshotKey, DashboardError> {
        serde_json::to_string(self)
            .map(SnapshotKey)
            .map_err(DashboardError::Snapshot)
    }
}

/// Serialized form of a snapshot
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnapshotKey(String);

impl SnapshotKey {
    /// Key text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
