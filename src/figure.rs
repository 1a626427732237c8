//! Figure models: plain descriptions of a chart that the UI layer draws.
//!
//! A figure owns everything needed to draw it (points, labels, axis ticks,
//! colors), so drawing never reads back into the source tables.

use ratatui::style::Color;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{DashboardError, Result};

/// Mantissas accepted for a rounded axis maximum
const NICE_STEPS: [f64; 10] = [1.0, 1.5, 2.0, 2.5, 3.0, 4.0, 5.0, 6.0, 8.0, 10.0];

/// Extra room above the tallest value for annotations
pub const HEADROOM: f64 = 1.1;

/// Number of labeled ticks on the value axis, zero included
pub const TICK_COUNT: usize = 5;

/// Convert a decimal to a plot coordinate
pub fn to_coord(value: Decimal, what: &str) -> Result<f64> {
    value
        .to_f64()
        .filter(|v| v.is_finite())
        .ok_or_else(|| DashboardError::NonFinite { what: what.to_string() })
}

/// Round `value` up to 1, 1.5, 2, 2.5, 3, 4, 5, 6 or 8 times a power of ten.
pub fn nice_ceiling(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    NICE_STEPS
        .iter()
        .map(|m| m * magnitude)
        .find(|candidate| *candidate >= value)
        .unwrap_or(10.0 * magnitude)
}

/// A value axis from zero to `max`
#[derive(Debug, Clone, PartialEq)]
pub struct ValueAxis {
    pub max: f64,
    /// (value, label) pairs from zero up to `max`
    pub ticks: Vec<(f64, String)>,
}

impl ValueAxis {
    pub fn fit<F>(data_max: f64, format: F) -> Self
    where
        F: Fn(f64) -> String,
    {
        let max = nice_ceiling(data_max * HEADROOM);
        let step = max / (TICK_COUNT - 1) as f64;
        let ticks = (0..TICK_COUNT)
            .map(|i| {
                let v = step * i as f64;
                (v, format(v))
            })
            .collect();
        Self { max, ticks }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarPoint {
    pub label: String,
    pub value: f64,
    /// Text drawn above the bar
    pub annotation: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarFigure {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub color: Color,
    pub bars: Vec<BarPoint>,
    pub axis: ValueAxis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Above,
    Below,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub x: f64,
    pub y: f64,
    pub text: String,
    pub placement: Placement,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: &'static str,
    pub marker: char,
    pub color: Color,
    pub points: Vec<(f64, f64)>,
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineFigure {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub x_labels: Vec<String>,
    pub series: Vec<Series>,
    pub axis: ValueAxis,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Figure {
    Bars(BarFigure),
    Lines(LineFigure),
}

impl Figure {
    pub fn title(&self) -> &str {
        match self {
            Self::Bars(f) => &f.title,
            Self::Lines(f) => &f.title,
        }
    }

    /// Number of x positions drawn
    pub fn len(&self) -> usize {
        match self {
            Self::Bars(f) => f.bars.len(),
            Self::Lines(f) => f.x_labels.len(),
        }
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_nice_ceiling() {
        assert_eq!(nice_ceiling(3_367_566.0), 4_000_000.0);
        assert_eq!(nice_ceiling(993_487.0), 1_000_000.0);
        assert_eq!(nice_ceiling(2.45), 2.5);
        assert_eq!(nice_ceiling(9.0), 10.0);
        assert_eq!(nice_ceiling(0.0), 1.0);
        assert_eq!(nice_ceiling(f64::NAN), 1.0);
    }

    #[test]
    fn test_axis_ticks() {
        let axis = ValueAxis::fit(3_061_423.79, |v| format!("{:.0}", v));
        assert_eq!(axis.max, 4_000_000.0);
        assert_eq!(axis.ticks.len(), TICK_COUNT);
        assert_eq!(axis.ticks[0].0, 0.0);
        assert_eq!(axis.ticks[1].1, "1000000");
        assert_eq!(axis.ticks[TICK_COUNT - 1].0, axis.max);
    }

    #[test]
    fn test_to_coord() {
        assert_eq!(to_coord(dec!(1.5), "x").unwrap(), 1.5);
        assert_eq!(to_coord(dec!(-2), "x").unwrap(), -2.0);
    }
}
