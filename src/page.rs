//! The dashboard page, built once per session from the cached tables.

use tracing::{debug, error};

use crate::charts;
use crate::data::Datasets;
use crate::error::Result;
use crate::figure::Figure;
use crate::metrics::{self, Metric};
use crate::money::{format_decimal, format_grouped};

pub const PAGE_TITLE: &str = "Dashboard de Faturamento";
pub const METRICS_TITLE: &str = "Métricas de Faturamento";

/// One chart section. A failed build is kept as an error so the rest of
/// the page still renders.
#[derive(Debug, Clone)]
pub struct Section {
    pub title: &'static str,
    pub figure: Result<Figure>,
}

impl Section {
    fn build<F>(title: &'static str, build: F) -> Self
    where
        F: FnOnce() -> Result<Figure>,
    {
        let figure = build();
        match &figure {
            Ok(f) => debug!(section = title, points = f.len(), "section built"),
            Err(e) => error!(section = title, error = %e, "section failed"),
        }
        Self { title, figure }
    }
}

/// A raw table as display strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub title: &'static str,
    pub header: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct Page {
    pub title: &'static str,
    pub sections: Vec<Section>,
    pub metrics: Result<Vec<Metric>>,
    pub raw_tables: Vec<RawTable>,
}

impl Page {
    pub fn build(data: &Datasets<'_>) -> Self {
        let sections = vec![
            Section::build("Faturamento Realizado por Mês", || {
                charts::realized_by_month(data.revenue)
            }),
            Section::build("Faturamento Realizado x Orçado por Mês", || {
                charts::realized_vs_budgeted(data.revenue)
            }),
            Section::build("Saldo de Caixa", || charts::cash_balance(data.cash)),
            Section::build("Nível de Estoques", || charts::inventory_levels(data.inventory)),
        ];

        let metrics = metrics::calculate(data.revenue).map(|m| m.display());
        if let Err(e) = &metrics {
            error!(section = METRICS_TITLE, error = %e, "section failed");
        }

        Self {
            title: PAGE_TITLE,
            sections,
            metrics,
            raw_tables: raw_tables(data),
        }
    }
}

fn raw_tables(data: &Datasets<'_>) -> Vec<RawTable> {
    let revenue = RawTable {
        title: "Dados de Faturamento",
        header: vec!["Mês", "Orçado", "Realizado", "Variação", "Variação %"],
        rows: data
            .revenue
            .rows()
            .iter()
            .map(|r| {
                vec![
                    r.month.to_string(),
                    format_decimal(r.budgeted, 2),
                    format_decimal(r.realized, 2),
                    format_decimal(r.variance, 2),
                    format_decimal(r.variance_pct, 1),
                ]
            })
            .collect(),
    };

    let cash = RawTable {
        title: "Dados de Saldo de Caixa",
        header: vec!["Mês", "Ano", data.cash.value_label],
        rows: data
            .cash
            .rows
            .iter()
            .map(|r| vec![r.month.to_string(), r.year.to_string(), format_decimal(r.value, 2)])
            .collect(),
    };

    let inventory = RawTable {
        title: "Dados de Nível de Estoques",
        header: vec!["Mês", "Ano", data.inventory.value_label],
        rows: data
            .inventory
            .rows
            .iter()
            .map(|r| vec![r.month.to_string(), r.year.to_string(), format_grouped(r.value)])
            .collect(),
    };

    vec![revenue, cash, inventory]
}
