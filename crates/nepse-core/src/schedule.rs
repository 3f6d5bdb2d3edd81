//! Market-hours oracle for the Nepal Stock Exchange.
//!
//! NEPSE trades Sunday through Thursday from 11:00 to 15:00 NPT, with a
//! shortened Friday session from 11:00 to 13:00 and no Saturday session.
//! [`classify`] derives everything from the civil datetime it is handed,
//! never from an ambient clock, so a timestamp literal fully determines
//! the answer.

use chrono::{DateTime, Datelike, NaiveTime, TimeZone, Weekday};

// ---------------------------------------------------------------------------
// Weekday classes and trading windows
// ---------------------------------------------------------------------------

/// Schedule class of one civil weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayClass {
    /// Sunday through Thursday: full session.
    Regular,
    /// Friday: shortened session.
    Short,
    /// Saturday: no session.
    Closed,
}

impl DayClass {
    /// Classify a weekday. Total: every weekday maps to exactly one class.
    pub fn from_weekday(day: Weekday) -> Self {
        match day {
            Weekday::Sat => DayClass::Closed,
            Weekday::Fri => DayClass::Short,
            _ => DayClass::Regular,
        }
    }

    /// The trading window scheduled for this class, if any.
    pub fn window(self) -> Option<TradingWindow> {
        match self {
            DayClass::Regular => Some(TradingWindow::new(11, 15)),
            DayClass::Short => Some(TradingWindow::new(11, 13)),
            DayClass::Closed => None,
        }
    }
}

/// A wall-clock trading window, inclusive at both endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradingWindow {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl TradingWindow {
    fn new(open_hour: u32, close_hour: u32) -> Self {
        Self {
            open: NaiveTime::from_hms_opt(open_hour, 0, 0).unwrap(),
            close: NaiveTime::from_hms_opt(close_hour, 0, 0).unwrap(),
        }
    }

    /// Whether `t` falls inside the window. An instant exactly at the open
    /// or close time counts as open; one second past close does not.
    pub fn contains(&self, t: NaiveTime) -> bool {
        self.open <= t && t <= self.close
    }
}

// ---------------------------------------------------------------------------
// Status classification
// ---------------------------------------------------------------------------

/// Result of one schedule decision.
///
/// `description` reflects the window scheduled for the weekday, not the
/// instantaneous boolean: Friday at 09:00 is closed but still described
/// by the Friday trading hours.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketStatus {
    pub is_open: bool,
    pub description: String,
}

/// Decide whether the market is open at `ts` and describe that day's
/// schedule.
///
/// Pure and total: weekday and time-of-day come from the argument alone,
/// so two calls with the same timestamp always agree. Callers pass a
/// Kathmandu-zone timestamp in production; tests may use any fixed zone.
pub fn classify<Tz: TimeZone>(ts: &DateTime<Tz>) -> MarketStatus {
    let day = ts.weekday();
    let class = DayClass::from_weekday(day);

    let is_open = match class.window() {
        Some(window) => window.contains(ts.time()),
        None => false,
    };

    MarketStatus { is_open, description: describe(day, class) }
}

fn describe(day: Weekday, class: DayClass) -> String {
    let name = day_name(day);
    match class {
        DayClass::Regular => format!("{name} - Trading Hours: 11:00 AM - 3:00 PM NPT"),
        DayClass::Short => format!("{name} - Trading Hours: 11:00 AM - 1:00 PM NPT"),
        DayClass::Closed => format!("{name} - Market Closed"),
    }
}

/// English weekday name, independent of any locale setting.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}
