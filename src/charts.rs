//! The four dashboard figures.
//!
//! Each builder reads one table and returns a self-contained [`Figure`];
//! builders share no state and never modify their input.

use ratatui::style::Color;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::warn;

use crate::data::{MonthlyTable, RevenueTable};
use crate::error::{DashboardError, Result};
use crate::figure::{
    to_coord, Annotation, BarFigure, BarPoint, Figure, LineFigure, Placement, Series, ValueAxis,
};
use crate::money::{format_decimal, format_grouped, to_millions};

const COLOR_REVENUE: Color = Color::Rgb(0x4C, 0x72, 0xB0);
const COLOR_BUDGET: Color = Color::Rgb(0xDD, 0x84, 0x52);
const COLOR_CASH: Color = Color::Rgb(0xAD, 0xD8, 0xE6);
const COLOR_STOCK: Color = Color::Rgb(0x90, 0xEE, 0x90);

fn grouped_tick(v: f64) -> String {
    Decimal::from_f64(v).map(format_grouped).unwrap_or_default()
}

fn millions_tick(v: f64) -> String {
    Decimal::from_f64(v)
        .map(|d| format_decimal(d, 2))
        .unwrap_or_default()
}

/// A negative value is kept with its signed annotation and drawn as an
/// empty bar on the zero baseline.
fn bar(label: &str, value: Decimal, annotation: String) -> Result<BarPoint> {
    if value.is_sign_negative() && !value.is_zero() {
        warn!(bar = label, %value, "negative bar drawn at the baseline");
    }
    Ok(BarPoint {
        label: label.to_string(),
        value: to_coord(value, label)?,
        annotation,
    })
}

fn max_of(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(0.0, f64::max)
}

fn year_of(table: &MonthlyTable) -> String {
    table.rows.first().map(|r| r.year.to_string()).unwrap_or_default()
}

/// Bar chart of realized revenue per month
pub fn realized_by_month(table: &RevenueTable) -> Result<Figure> {
    let months = table.months();
    if months.is_empty() {
        return Err(DashboardError::EmptyTable("revenue"));
    }

    let bars = months
        .iter()
        .map(|r| bar(r.month, r.realized, format_grouped(r.realized)))
        .collect::<Result<Vec<_>>>()?;
    let axis = ValueAxis::fit(max_of(bars.iter().map(|b| b.value)), grouped_tick);

    Ok(Figure::Bars(BarFigure {
        title: "Faturamento Realizado por Mês".to_string(),
        x_label: "Mês",
        y_label: "Faturamento Realizado (R$)",
        color: COLOR_REVENUE,
        bars,
        axis,
    }))
}

/// Realized and budgeted revenue as two annotated line series
pub fn realized_vs_budgeted(table: &RevenueTable) -> Result<Figure> {
    let months = table.months();
    if months.is_empty() {
        return Err(DashboardError::EmptyTable("revenue"));
    }

    let mut realized = Series {
        name: "Realizado",
        marker: '●',
        color: COLOR_REVENUE,
        points: Vec::with_capacity(months.len()),
        annotations: Vec::with_capacity(months.len()),
    };
    let mut budgeted = Series {
        name: "Orçado",
        marker: '■',
        color: COLOR_BUDGET,
        points: Vec::with_capacity(months.len()),
        annotations: Vec::with_capacity(months.len()),
    };

    for (i, row) in months.iter().enumerate() {
        let x = i as f64;
        let r = to_coord(row.realized, row.month)?;
        let b = to_coord(row.budgeted, row.month)?;

        realized.points.push((x, r));
        realized.annotations.push(Annotation {
            x,
            y: r,
            text: format_grouped(row.realized),
            placement: Placement::Above,
        });
        budgeted.points.push((x, b));
        budgeted.annotations.push(Annotation {
            x,
            y: b,
            text: format_grouped(row.budgeted),
            placement: Placement::Below,
        });
    }

    let data_max = max_of(
        realized
            .points
            .iter()
            .chain(budgeted.points.iter())
            .map(|(_, y)| *y),
    );

    Ok(Figure::Lines(LineFigure {
        title: "Faturamento Realizado x Orçado por Mês".to_string(),
        x_label: "Mês",
        y_label: "Faturamento (R$)",
        x_labels: months.iter().map(|r| r.month.to_string()).collect(),
        series: vec![realized, budgeted],
        axis: ValueAxis::fit(data_max, grouped_tick),
    }))
}

/// Cash balance per month, in millions
pub fn cash_balance(table: &MonthlyTable) -> Result<Figure> {
    if table.rows.is_empty() {
        return Err(DashboardError::EmptyTable("cash balance"));
    }

    let bars = table
        .rows
        .iter()
        .map(|r| {
            let millions = to_millions(r.value);
            bar(r.month, millions, format_decimal(millions, 2))
        })
        .collect::<Result<Vec<_>>>()?;
    let axis = ValueAxis::fit(max_of(bars.iter().map(|b| b.value)), millions_tick);

    Ok(Figure::Bars(BarFigure {
        title: format!("Saldo de Caixa ({})", year_of(table)),
        x_label: "Mês",
        y_label: "Saldo (Milhões R$)",
        color: COLOR_CASH,
        bars,
        axis,
    }))
}

/// Inventory value per month
pub fn inventory_levels(table: &MonthlyTable) -> Result<Figure> {
    if table.rows.is_empty() {
        return Err(DashboardError::EmptyTable("inventory"));
    }

    let bars = table
        .rows
        .iter()
        .map(|r| bar(r.month, r.value, format_grouped(r.value)))
        .collect::<Result<Vec<_>>>()?;
    let axis = ValueAxis::fit(max_of(bars.iter().map(|b| b.value)), grouped_tick);

    Ok(Figure::Bars(BarFigure {
        title: format!("Nível de Estoques ({})", year_of(table)),
        x_label: "Mês",
        y_label: "Estoque (R$)",
        color: COLOR_STOCK,
        bars,
        axis,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{self, MonthlyValue, MONTHS};
    use rust_decimal_macros::dec;

    fn bars(figure: &Figure) -> &BarFigure {
        match figure {
            Figure::Bars(f) => f,
            Figure::Lines(_) => panic!("expected a bar figure"),
        }
    }

    #[test]
    fn test_realized_excludes_accumulated_row() {
        let fig = realized_by_month(data::revenue()).unwrap();
        assert_eq!(fig.len(), MONTHS);

        let f = bars(&fig);
        assert!(f.bars.iter().all(|b| !b.label.starts_with("ACUMULADO")));
        assert_eq!(f.bars[0].label, "Jan 2023");
        assert_eq!(f.bars[0].annotation, "2.121.321");
        // 2612526.50 ties to even
        assert_eq!(f.bars[1].annotation, "2.612.526");
        assert_eq!(f.axis.max, 4_000_000.0);
        assert_eq!(f.axis.ticks[1].1, "1.000.000");
    }

    #[test]
    fn test_realized_vs_budgeted_series() {
        let fig = realized_vs_budgeted(data::revenue()).unwrap();
        let Figure::Lines(f) = &fig else {
            panic!("expected a line figure");
        };

        assert_eq!(fig.len(), MONTHS);
        assert_eq!(f.series.len(), 2);
        for s in &f.series {
            assert_eq!(s.points.len(), MONTHS);
            assert_eq!(s.annotations.len(), MONTHS);
        }

        let realized = &f.series[0];
        let budgeted = &f.series[1];
        assert!(realized.annotations.iter().all(|a| a.placement == Placement::Above));
        assert!(budgeted.annotations.iter().all(|a| a.placement == Placement::Below));
        assert_eq!(budgeted.annotations[2].text, "0");
        assert_eq!(realized.annotations[1].text, "2.612.526");
        assert_eq!(f.x_labels.last().map(String::as_str), Some("Dez 2023"));
        // Out budget is the largest value on the chart
        assert_eq!(f.axis.max, 5_000_000.0);
    }

    #[test]
    fn test_cash_balance_in_millions() {
        let table = data::cash_balance();
        let before = table.clone();

        let fig = cash_balance(table).unwrap();
        let f = bars(&fig);

        assert_eq!(f.bars.len(), MONTHS);
        assert_eq!((f.bars[0].value * 100.0).round() / 100.0, 1.33);
        assert_eq!(f.bars[0].annotation, "1,33");
        assert_eq!(f.title, "Saldo de Caixa (2023)");
        assert_eq!(f.axis.max, 2.5);
        assert_eq!(*table, before);
    }

    #[test]
    fn test_inventory_levels() {
        let fig = inventory_levels(data::inventory()).unwrap();
        let f = bars(&fig);

        assert_eq!(f.bars.len(), MONTHS);
        assert_eq!(f.bars[9].annotation, "903.170");
        assert_eq!(f.title, "Nível de Estoques (2023)");
        assert_eq!(f.axis.max, 1_000_000.0);
    }

    #[test]
    fn test_negative_cash_balance_kept() {
        let table = MonthlyTable {
            value_label: "Saldo",
            rows: vec![
                MonthlyValue { month: "Jan", year: 2023, value: dec!(-500000) },
                MonthlyValue { month: "Fev", year: 2023, value: dec!(1200000) },
            ],
        };
        let fig = cash_balance(&table).unwrap();
        let f = bars(&fig);

        assert_eq!(f.bars.len(), 2);
        assert_eq!(f.bars[0].value, -0.5);
        assert_eq!(f.bars[0].annotation, "-0,50");
        // the axis still starts at zero
        assert_eq!(f.axis.ticks[0].0, 0.0);
        assert_eq!(f.axis.max, 1.5);
    }

    #[test]
    fn test_empty_tables() {
        let empty = MonthlyTable { value_label: "Estoque (R$)", rows: Vec::new() };
        assert_eq!(inventory_levels(&empty), Err(DashboardError::EmptyTable("inventory")));

        let revenue = RevenueTable::new(Vec::new());
        assert_eq!(realized_by_month(&revenue), Err(DashboardError::EmptyTable("revenue")));
        assert_eq!(realized_vs_budgeted(&revenue), Err(DashboardError::EmptyTable("revenue")));
    }
}
