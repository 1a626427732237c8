use std::sync::OnceLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

/// Number of monthly rows in every table
pub const MONTHS: usize = 12;

/// One row of the revenue table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueRow {
    pub month: &'static str,
    pub budgeted: Decimal,
    pub realized: Decimal,
    pub variance: Decimal,
    pub variance_pct: Decimal,
}

/// Monthly revenue rows followed by one accumulated summary row.
///
/// The summary row is kept for display only. Aggregates are always
/// recomputed from [`RevenueTable::months`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevenueTable {
    rows: Vec<RevenueRow>,
}

impl RevenueTable {
    pub fn new(rows: Vec<RevenueRow>) -> Self {
        Self { rows }
    }

    /// Every stored row, accumulated row included
    pub fn rows(&self) -> &[RevenueRow] {
        &self.rows
    }

    /// Monthly rows only
    pub fn months(&self) -> &[RevenueRow] {
        let n = self.rows.len().saturating_sub(1);
        &self.rows[..n]
    }

    /// The stored summary row
    #[allow(dead_code)]
    pub fn accumulated(&self) -> Option<&RevenueRow> {
        self.rows.last()
    }
}

/// A month/year/value row, shared by the cash and inventory tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyValue {
    pub month: &'static str,
    pub year: i32,
    pub value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyTable {
    /// Column header for `value`
    pub value_label: &'static str,
    pub rows: Vec<MonthlyValue>,
}

const SHORT_MONTHS: [&str; MONTHS] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

fn build_revenue() -> RevenueTable {
    // (month, budgeted, realized, variance, variance %)
    let raw = [
        ("Jan 2023", dec!(1871448.17), dec!(2121320.90), dec!(249872.73), dec!(13.4)),
        ("Fev 2023", dec!(1881305.31), dec!(2612526.50), dec!(731221.19), dec!(38.9)),
        ("Mar 2023", dec!(0.0), dec!(1775687.17), dec!(-372322.74), dec!(0.0)),
        ("Abr 2023", dec!(2384933.31), dec!(2631239.75), dec!(246306.44), dec!(10.3)),
        ("Mai 2023", dec!(1892838.98), dec!(2483240.08), dec!(590401.10), dec!(31.2)),
        ("Jun 2023", dec!(2426768.57), dec!(3061423.79), dec!(634655.22), dec!(26.2)),
        ("Jul 2023", dec!(3365436.01), dec!(2307138.54), dec!(-1058297.47), dec!(-31.4)),
        ("Ago 2023", dec!(2775783.80), dec!(2429037.59), dec!(-346746.21), dec!(-12.5)),
        ("Set 2023", dec!(2939719.37), dec!(2582752.71), dec!(-356966.66), dec!(-12.1)),
        ("Out 2023", dec!(4351472.10), dec!(2157419.62), dec!(-2194052.48), dec!(-50.4)),
        ("Nov 2023", dec!(3158080.11), dec!(2323382.35), dec!(-834697.76), dec!(-26.4)),
        ("Dez 2023", dec!(3255719.92), dec!(2699379.40), dec!(-556340.52), dec!(-17.1)),
        ("ACUMULADO 2023", dec!(32451515.57), dec!(29184548.40), dec!(-3266967.17), dec!(-10.1)),
    ];

    RevenueTable::new(
        raw.into_iter()
            .map(|(month, budgeted, realized, variance, variance_pct)| RevenueRow {
                month,
                budgeted,
                realized,
                variance,
                variance_pct,
            })
            .collect(),
    )
}

fn build_monthly(value_label: &'static str, year: i32, values: [Decimal; MONTHS]) -> MonthlyTable {
    MonthlyTable {
        value_label,
        rows: SHORT_MONTHS
            .iter()
            .zip(values)
            .map(|(&month, value)| MonthlyValue { month, year, value })
            .collect(),
    }
}

/// Revenue for 2023, budgeted vs. realized
pub fn revenue() -> &'static RevenueTable {
    static TABLE: OnceLock<RevenueTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        debug!("building revenue table");
        build_revenue()
    })
}

/// End-of-month cash balance for 2023
pub fn cash_balance() -> &'static MonthlyTable {
    static TABLE: OnceLock<MonthlyTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        debug!("building cash balance table");
        build_monthly(
            "Saldo",
            2023,
            [
                dec!(1330570.62), dec!(934686.68), dec!(962080.73), dec!(1042521.56),
                dec!(1727837.58), dec!(2018840.63), dec!(1933067.98), dec!(1116155.23),
                dec!(1108564.22), dec!(2225567.45), dec!(1624441.35), dec!(1707548.49),
            ],
        )
    })
}

/// End-of-month inventory value for 2023
pub fn inventory() -> &'static MonthlyTable {
    static TABLE: OnceLock<MonthlyTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        debug!("building inventory table");
        build_monthly(
            "Estoque (R$)",
            2023,
            [
                dec!(641877), dec!(688367), dec!(694277), dec!(708432),
                dec!(720714), dec!(747526), dec!(768522), dec!(779630),
                dec!(793544), dec!(903170), dec!(884213), dec!(880647),
            ],
        )
    })
}

/// The three tables held by a dashboard session
#[derive(Debug, Clone, Copy)]
pub struct Datasets<'a> {
    pub revenue: &'a RevenueTable,
    pub cash: &'a MonthlyTable,
    pub inventory: &'a MonthlyTable,
}

impl Datasets<'static> {
    /// Borrow the cached tables
    pub fn load() -> Self {
        Self {
            revenue: revenue(),
            cash: cash_balance(),
            inventory: inventory(),
        }
    }
}
