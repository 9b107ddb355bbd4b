//! Tooltip content for a hovered bar.

use crate::domain::candle::PricePoint;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    /// Wall-clock time as `dd/mm/YYYY, HH:MM:SS`, if the timestamp parses.
    pub time: Option<String>,
    pub open: f64,
    pub close: f64,
    pub high: f64,
    pub low: f64,
}

impl Tooltip {
    pub fn for_point(point: &PricePoint) -> Self {
        Self {
            time: point
                .wall_clock()
                .map(|t| t.format("%d/%m/%Y, %H:%M:%S").to_string()),
            open: point.open,
            close: point.close,
            high: point.high,
            low: point.low,
        }
    }
}

impl std::fmt::Display for Tooltip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Horário: {}", self.time.as_deref().unwrap_or_default())?;
        writeln!(f, "Abertura: {}", self.open)?;
        writeln!(f, "Fechamento: {}", self.close)?;
        writeln!(f, "Máxima: {}", self.high)?;
        write!(f, "Mínima: {}", self.low)
    }
}
