use rust_decimal::Decimal;
use tracing::warn;

use crate::data::RevenueTable;
use crate::error::{DashboardError, Result};
use crate::money::{format_brl, format_percent};

/// Summary figures derived from the monthly revenue rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueMetrics {
    pub mean_realized: Decimal,
    pub total_realized: Decimal,
    pub total_budgeted: Decimal,
    pub total_variance: Decimal,
    /// `None` when the budget total is zero
    pub variance_pct: Option<Decimal>,
}

/// A labeled, formatted metric ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

/// Compute the revenue metrics over the monthly rows, ignoring the stored
/// accumulated row.
pub fn calculate(table: &RevenueTable) -> Result<RevenueMetrics> {
    let months = table.months();
    if months.is_empty() {
        return Err(DashboardError::EmptyTable("revenue"));
    }

    let total_realized: Decimal = months.iter().map(|r| r.realized).sum();
    let total_budgeted: Decimal = months.iter().map(|r| r.budgeted).sum();
    let total_variance: Decimal = months.iter().map(|r| r.variance).sum();
    let mean_realized = total_realized / Decimal::from(months.len());

    let variance_pct = if total_budgeted.is_zero() {
        warn!("budget total is zero, variance percentage unavailable");
        None
    } else {
        Some(total_variance / total_budgeted * Decimal::ONE_HUNDRED)
    };

    Ok(RevenueMetrics {
        mean_realized,
        total_realized,
        total_budgeted,
        total_variance,
        variance_pct,
    })
}

impl RevenueMetrics {
    pub fn variance_pct_checked(&self) -> Result<Decimal> {
        self.variance_pct.ok_or(DashboardError::ZeroBudget)
    }

    /// The four metrics in display order
    pub fn display(&self) -> Vec<Metric> {
        let pct = match self.variance_pct_checked() {
            Ok(pct) => format_percent(pct),
            Err(_) => "N/A".to_string(),
        };

        vec![
            Metric {
                label: "Média mensal de faturamento realizado",
                value: format_brl(self.mean_realized),
            },
            Metric {
                label: "Total de faturamento realizado",
                value: format_brl(self.total_realized),
            },
            Metric {
                label: "Variação total (Realizado - Orçado)",
                value: format_brl(self.total_variance),
            },
            Metric {
                label: "Percentual de variação",
                value: pct,
            },
        ]
    }
}
