use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Months, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::TimeWindow;

/// Narrowest pixel width a single grid cell may occupy before the grid
/// switches to a coarser unit.
pub const MIN_CELL_WIDTH: f64 = 17.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("unknown time unit `{0}`")]
    UnknownUnit(String),
}

/// Calendar granularity, ordered finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 7] = [
        TimeUnit::Second,
        TimeUnit::Minute,
        TimeUnit::Hour,
        TimeUnit::Day,
        TimeUnit::Week,
        TimeUnit::Month,
        TimeUnit::Year,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Second => "second",
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
            TimeUnit::Year => "year",
        }
    }

    pub fn next_coarser(self) -> Option<Self> {
        match self {
            TimeUnit::Second => Some(TimeUnit::Minute),
            TimeUnit::Minute => Some(TimeUnit::Hour),
            TimeUnit::Hour => Some(TimeUnit::Day),
            TimeUnit::Day => Some(TimeUnit::Week),
            TimeUnit::Week => Some(TimeUnit::Month),
            TimeUnit::Month => Some(TimeUnit::Year),
            TimeUnit::Year => None,
        }
    }

    /// Typical length of one unit. Months count 30 days and years 365.
    pub fn nominal_millis(self) -> f64 {
        match self {
            TimeUnit::Second => 1_000.0,
            TimeUnit::Minute => 60_000.0,
            TimeUnit::Hour => 3_600_000.0,
            TimeUnit::Day => 86_400_000.0,
            TimeUnit::Week => 604_800_000.0,
            TimeUnit::Month => 2_592_000_000.0,
            TimeUnit::Year => 31_536_000_000.0,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeUnit::ALL
            .into_iter()
            .find(|unit| unit.as_str() == s)
            .ok_or_else(|| CalendarError::UnknownUnit(s.to_string()))
    }
}

/// Next coarser unit for a unit given by name; `None` for `year` and for
/// names that are not units.
pub fn next_unit(name: &str) -> Option<TimeUnit> {
    name.parse::<TimeUnit>().ok()?.next_coarser()
}

/// Finest unit worth rendering for a visible span of `span_ms` milliseconds.
pub fn select_unit(span_ms: f64) -> TimeUnit {
    let seconds = span_ms / 1000.0;
    let minutes = seconds / 60.0;
    let hours = minutes / 60.0;
    let days = hours / 24.0;
    if seconds <= 60.0 {
        TimeUnit::Second
    } else if minutes <= 60.0 {
        TimeUnit::Minute
    } else if hours <= 24.0 {
        TimeUnit::Hour
    } else if days <= 7.0 {
        TimeUnit::Day
    } else if days / 7.0 <= 5.0 {
        TimeUnit::Week
    } else if days / 31.0 <= 12.0 {
        TimeUnit::Month
    } else {
        TimeUnit::Year
    }
}

/// Unit a grid should draw for `window` spread over `canvas_width` pixels:
/// the selected unit, coarsened until one cell spans at least
/// [`MIN_CELL_WIDTH`] pixels.
pub fn grid_unit(window: &TimeWindow, canvas_width: f64, steps: &TimeSteps) -> TimeUnit {
    let span = window.span();
    let mut unit = select_unit(span);
    loop {
        let cell_px = unit.nominal_millis() * f64::from(steps.get(unit)) * canvas_width / span;
        if cell_px >= MIN_CELL_WIDTH {
            return unit;
        }
        match unit.next_coarser() {
            Some(next) => unit = next,
            None => return unit,
        }
    }
}

/// Step size per unit, e.g. `minute: 15` for quarter-hour cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSteps {
    pub second: u32,
    pub minute: u32,
    pub hour: u32,
    pub day: u32,
    pub week: u32,
    pub month: u32,
    pub year: u32,
}

impl Default for TimeSteps {
    fn default() -> Self {
        Self {
            second: 1,
            minute: 1,
            hour: 1,
            day: 1,
            week: 1,
            month: 1,
            year: 1,
        }
    }
}

impl TimeSteps {
    /// Step for `unit`; anything below 2 means one unit per cell.
    pub fn get(&self, unit: TimeUnit) -> u32 {
        let raw = match unit {
            TimeUnit::Second => self.second,
            TimeUnit::Minute => self.minute,
            TimeUnit::Hour => self.hour,
            TimeUnit::Day => self.day,
            TimeUnit::Week => self.week,
            TimeUnit::Month => self.month,
            TimeUnit::Year => self.year,
        };
        raw.max(1)
    }
}

pub fn from_millis(ms: f64) -> Option<DateTime<Utc>> {
    if !ms.is_finite() {
        return None;
    }
    DateTime::<Utc>::from_timestamp_millis(ms.floor() as i64)
}

fn start_of(unit: TimeUnit, time: DateTime<Utc>) -> NaiveDateTime {
    let naive = time.naive_utc();
    let date = naive.date();
    let midnight = date.and_time(NaiveTime::MIN);
    let hour = TimeDelta::hours(i64::from(naive.hour()));
    let minute = TimeDelta::minutes(i64::from(naive.minute()));
    let second = TimeDelta::seconds(i64::from(naive.second()));
    match unit {
        TimeUnit::Second => midnight + hour + minute + second,
        TimeUnit::Minute => midnight + hour + minute,
        TimeUnit::Hour => midnight + hour,
        TimeUnit::Day => midnight,
        TimeUnit::Week => {
            midnight - TimeDelta::days(i64::from(date.weekday().num_days_from_sunday()))
        }
        TimeUnit::Month => midnight - TimeDelta::days(i64::from(date.day0())),
        TimeUnit::Year => midnight - TimeDelta::days(i64::from(date.ordinal0())),
    }
}

/// Week of the year with Sunday-started weeks, the week holding January 1st
/// being week 1.
fn week_of_year(time: NaiveDateTime) -> i64 {
    let ordinal0 = i64::from(time.ordinal0());
    let weekday = i64::from(time.weekday().num_days_from_sunday());
    let jan1_weekday = (weekday - ordinal0).rem_euclid(7);
    (ordinal0 + jan1_weekday) / 7 + 1
}

/// Calendar field a step snaps against.
fn calendar_value(unit: TimeUnit, time: NaiveDateTime) -> i64 {
    match unit {
        TimeUnit::Second => i64::from(time.second()),
        TimeUnit::Minute => i64::from(time.minute()),
        TimeUnit::Hour => i64::from(time.hour()),
        TimeUnit::Day => i64::from(time.weekday().num_days_from_sunday()),
        TimeUnit::Week => week_of_year(time),
        TimeUnit::Month => i64::from(time.month0()),
        TimeUnit::Year => i64::from(time.year()),
    }
}

fn shift(unit: TimeUnit, time: NaiveDateTime, count: i64) -> Option<NaiveDateTime> {
    let months = |n: i64| -> Option<NaiveDateTime> {
        let magnitude = Months::new(u32::try_from(n.unsigned_abs()).ok()?);
        if n >= 0 {
            time.checked_add_months(magnitude)
        } else {
            time.checked_sub_months(magnitude)
        }
    };
    match unit {
        TimeUnit::Second => time.checked_add_signed(TimeDelta::try_seconds(count)?),
        TimeUnit::Minute => time.checked_add_signed(TimeDelta::try_minutes(count)?),
        TimeUnit::Hour => time.checked_add_signed(TimeDelta::try_hours(count)?),
        TimeUnit::Day => time.checked_add_signed(TimeDelta::try_days(count)?),
        TimeUnit::Week => time.checked_add_signed(TimeDelta::try_weeks(count)?),
        TimeUnit::Month => months(count),
        TimeUnit::Year => months(count.checked_mul(12)?),
    }
}

/// Lazily yields aligned `(cell_start, cell_end)` pairs; see [`iter_times`].
#[derive(Debug, Clone)]
pub struct TimeCells {
    cursor: Option<NaiveDateTime>,
    end: NaiveDateTime,
    unit: TimeUnit,
    step: i64,
}

impl Iterator for TimeCells {
    type Item = (DateTime<Utc>, DateTime<Utc>);

    fn next(&mut self) -> Option<Self::Item> {
        let cell_start = self.cursor.take()?;
        if cell_start >= self.end {
            return None;
        }
        let cell_end = shift(self.unit, cell_start, self.step)?;
        self.cursor = Some(cell_end);
        Some((cell_start.and_utc(), cell_end.and_utc()))
    }
}

impl FusedIterator for TimeCells {}

/// Cells of `unit` covering `[start, end)`.
///
/// The first cell begins at the start of the unit containing `start`, moved
/// back onto a multiple of the unit's step (a 15 minute step snaps to
/// :00, :15, :30 or :45). Calendar arithmetic is done in UTC and weeks begin
/// on Sunday.
pub fn iter_times(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    unit: TimeUnit,
    steps: &TimeSteps,
) -> TimeCells {
    let step = i64::from(steps.get(unit));
    let mut first = Some(start_of(unit, start));
    if step > 1 {
        first = first.and_then(|time| {
            let back = calendar_value(unit, time).rem_euclid(step);
            shift(unit, time, -back)
        });
    }
    TimeCells {
        cursor: first,
        end: end.naive_utc(),
        unit,
        step,
    }
}

/// Callback form of [`iter_times`].
pub fn iterate_times<F>(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    unit: TimeUnit,
    steps: &TimeSteps,
    mut on_cell: F,
) where
    F: FnMut(DateTime<Utc>, DateTime<Utc>),
{
    for (cell_start, cell_end) in iter_times(start, end, unit, steps) {
        on_cell(cell_start, cell_end);
    }
}
