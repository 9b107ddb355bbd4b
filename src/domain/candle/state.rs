//! Price series state container — app-owned, crate-provided merge logic.

use super::wire::{FeedMessage, WireBar};
use super::{ChartPoint, PricePoint};
use crate::error::ValidationError;
use crate::shared::Resolution;
use chrono::Timelike;

/// How a tick decides whether it starts a new bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BarBoundary {
    /// New bar when the tick's minute-of-hour differs from the last bar's.
    ///
    /// Coarse: 10:45 and 11:45 count as the same minute.
    #[default]
    WallClockMinute,
    /// New bar when the tick falls in a different aligned period.
    Aligned(Resolution),
}

impl BarBoundary {
    fn starts_new_bar(&self, last: &PricePoint, tick: &PricePoint) -> bool {
        let (Some(last_t), Some(tick_t)) = (last.wall_clock(), tick.wall_clock()) else {
            return true;
        };
        match self {
            Self::WallClockMinute => last_t.minute() != tick_t.minute(),
            Self::Aligned(resolution) => {
                let period = resolution.seconds();
                last_t.and_utc().timestamp().div_euclid(period)
                    != tick_t.and_utc().timestamp().div_euclid(period)
            }
        }
    }
}

/// What to do with a bar that breaks the OHLC invariant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValidationMode {
    /// Log a warning and merge it anyway.
    #[default]
    Warn,
    /// Refuse the whole message.
    Reject,
}

/// Result of merging one feed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// A snapshot replaced the series.
    Replaced { len: usize },
    /// A tick opened a new bar.
    Appended,
    /// A tick overwrote the in-progress bar.
    Updated,
    /// A tick arrived before any snapshot.
    Ignored,
}

/// Live price series for one chart.
///
/// The app owns instances of this type. The crate provides update methods.
#[derive(Debug, Clone, Default)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
    current: Option<PricePoint>,
    boundary: BarBoundary,
    validation: ValidationMode,
}

impl PriceSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the series with placeholder points.
    ///
    /// Seeded points are not a snapshot: ticks are ignored until the feed
    /// delivers one.
    pub fn from_points(points: Vec<PricePoint>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    pub fn with_boundary(mut self, boundary: BarBoundary) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_validation(mut self, validation: ValidationMode) -> Self {
        self.validation = validation;
        self
    }

    /// Merge one feed message.
    pub fn apply(&mut self, message: FeedMessage) -> Result<MergeOutcome, ValidationError> {
        match message {
            FeedMessage::Snapshot(snapshot) => self.apply_snapshot(snapshot.history),
            FeedMessage::Tick(bar) => self.apply_tick(bar),
        }
    }

    /// Replace the series with a snapshot's history.
    pub fn apply_snapshot(&mut self, history: Vec<WireBar>) -> Result<MergeOutcome, ValidationError> {
        let points: Vec<PricePoint> = history.into_iter().map(PricePoint::from).collect();
        for point in &points {
            self.check(point)?;
        }

        self.current = points.last().cloned();
        self.points = points;
        tracing::debug!("Applied snapshot with {} bar(s)", self.points.len());
        Ok(MergeOutcome::Replaced {
            len: self.points.len(),
        })
    }

    /// Append a new bar or patch the in-progress one.
    pub fn apply_tick(&mut self, bar: WireBar) -> Result<MergeOutcome, ValidationError> {
        if self.current.is_none() {
            tracing::debug!("Ignoring tick at {} received before any snapshot", bar.updated_at);
            return Ok(MergeOutcome::Ignored);
        }

        let tick = PricePoint::from(bar);
        self.check(&tick)?;

        let starts_new_bar = match self.points.last() {
            Some(last) => self.boundary.starts_new_bar(last, &tick),
            None => true,
        };

        let outcome = match self.points.last_mut() {
            Some(last) if !starts_new_bar => {
                last.set_ohlc(tick.ohlc());
                MergeOutcome::Updated
            }
            _ => {
                self.points.push(tick.clone());
                MergeOutcome::Appended
            }
        };

        tracing::debug!("Tick at {} merged: {:?}", tick.timestamp, outcome);
        self.current = Some(tick);
        Ok(outcome)
    }

    fn check(&self, point: &PricePoint) -> Result<(), ValidationError> {
        match point.ohlc().validate() {
            Ok(()) => Ok(()),
            Err(e) if self.validation == ValidationMode::Reject => Err(e),
            Err(e) => {
                tracing::warn!("Bar at {} violates OHLC bounds: {}", point.timestamp, e);
                Ok(())
            }
        }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// The series in the shape the charting library consumes.
    pub fn chart_points(&self) -> Vec<ChartPoint> {
        self.points.iter().map(ChartPoint::from).collect()
    }

    /// The most recent bar the feed reported (snapshot tail or last tick).
    pub fn current_bar(&self) -> Option<&PricePoint> {
        self.current.as_ref()
    }

    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.current = None;
    }
}
