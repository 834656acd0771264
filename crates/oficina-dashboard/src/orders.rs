//! Service orders and the indicators derived from them

use crate::error::DashboardError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const SAMPLE_ORDERS: &str = include_str!("../data/sample_orders.json");

/// Order lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Work in progress
    #[serde(rename = "aberta")]
    Open,
    /// Finished and billed
    #[serde(rename = "fechada")]
    Closed,
}

/// One workshop service order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order number
    pub id: u64,
    /// Billed amount
    #[serde(rename = "valor")]
    pub value: f64,
    /// Current state
    pub status: OrderStatus,
    /// Day the order was opened
    #[serde(rename = "dataAbertura")]
    pub opened_on: NaiveDate,
    /// Day the order was closed, if it was
    #[serde(rename = "dataFechamento", default)]
    pub closed_on: Option<NaiveDate>,
}

impl Order {
    /// Whether the order has been closed
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.status == OrderStatus::Closed
    }
}

/// Headline indicators
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderMetrics {
    /// Sum of closed order values
    #[serde(rename = "totalFaturado")]
    pub total_billed: f64,
    /// Average value of a closed order, 0 when none are closed
    #[serde(rename = "ticketMedio")]
    pub average_ticket: f64,
    /// Orders still open
    #[serde(rename = "abertas")]
    pub open: usize,
    /// Orders closed
    #[serde(rename = "fechadas")]
    pub closed: usize,
}

impl OrderMetrics {
    /// Compute indicators over `orders`
    #[must_use]
    pub fn from_orders(orders: &[Order]) -> Self {
        let (closed, open): (Vec<&Order>, Vec<&Order>) =
            orders.iter().partition(|order| order.is_closed());
        let total_billed: f64 = closed.iter().map(|order| order.value).sum();
        #[allow(clippy::cast_precision_loss)]
        let average_ticket = if closed.is_empty() {
            0.0
        } else {
            total_billed / closed.len() as f64
        };

        Self {
            total_billed,
            average_ticket,
            open: open.len(),
            closed: closed.len(),
        }
    }
}

/// Read an order list from JSON
///
/// # Errors
/// `DashboardError::Orders` when `json` is not a list of orders.
pub fn parse_orders(json: &str) -> Result<Vec<Order>, DashboardError> {
    serde_json::from_str(json).map_err(DashboardError::Orders)
}

/// The built-in demo order set
///
/// # Errors
/// `DashboardError::Orders` if the bundled data is malformed.
pub fn sample_orders() -> Result<Vec<Order>, DashboardError> {
    parse_orders(SAMPLE_ORDERS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sample_orders_load() {
        let orders = sample_orders().unwrap();
        assert_eq!(orders.len(), 5);
        assert_eq!(orders[1].status, OrderStatus::Open);
        assert_eq!(orders[1].closed_on, None);
        assert_eq!(
            orders[3].closed_on,
            NaiveDate::from_ymd_opt(2025, 7, 15)
        );
    }

    #[test]
    fn metrics_over_sample() {
        let metrics = OrderMetrics::from_orders(&sample_orders().unwrap());
        assert_eq!(
            metrics,
            OrderMetrics {
                total_billed: 2200.0,
                average_ticket: 2200.0 / 3.0,
                open: 2,
                closed: 3,
            }
        );
    }

    #[test]
    fn average_ticket_is_zero_without_closed_orders() {
        let orders = parse_orders(
            r#"[{"id": 1, "valor": 100, "status": "aberta", "dataAbertura": "2024-02-01"}]"#,
        )
        .unwrap();
        let metrics = OrderMetrics::from_orders(&orders);
        assert_eq!(metrics.average_ticket, 0.0);
        assert_eq!(metrics.total_billed, 0.0);
        assert_eq!(metrics.open, 1);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let err = parse_orders(
            r#"[{"id": 1, "valor": 1, "status": "cancelada", "dataAbertura": "2024-02-01"}]"#,
        )
        .unwrap_err();
        assert!(matches!(err, DashboardError::Orders(_)));
    }

    #[test]
    fn serializes_with_portuguese_keys() {
        let value = serde_json::to_value(&sample_orders().unwrap()[0]).unwrap();
        assert_eq!(value["status"], "fechada");
        assert_eq!(value["dataAbertura"], "2024-01-01");
        assert_eq!(value["valor"], 500.0);
    }
}
