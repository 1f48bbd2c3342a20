//! Time, timestamps, and local-time formatting rules.
//!
//! Wall-clock state lives in the synchronization adapter; this module only
//! defines the timestamp alias and the daylight-saving rule pair used to
//! render log timestamps in local time.

use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, TimeZone, Utc, Weekday};

/// UTC timestamp used for sync results, log lines, and generator reseeding.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Which occurrence of a weekday within a month a change rule refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekOfMonth {
    First,
    Second,
    Third,
    Fourth,
    /// The last occurrence, whichever week it falls in.
    Last,
}

/// One local-time change rule: "on the `week` `weekday` of `month`, at
/// `hour` o'clock local time, the UTC offset becomes `offset_minutes`".
///
/// `hour` is wall-clock time in the offset valid *before* the change, which
/// is how civil DST rules are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeChangeRule {
    /// Abbreviation used when formatting, e.g. `CEST`.
    pub abbrev: &'static str,
    /// Occurrence of `weekday` within `month`.
    pub week: WeekOfMonth,
    /// Day of week the change falls on.
    pub weekday: Weekday,
    /// Month `1..=12`.
    pub month: u32,
    /// Hour of day `0..=23`.
    pub hour: u32,
    /// UTC offset in minutes once the rule is in effect (east positive).
    pub offset_minutes: i32,
}

/// A daylight-saving/standard rule pair for formatting timestamps in local
/// time. Static configuration; immutable after startup; used only for log
/// output, never for scheduling.
#[derive(Debug, Clone, Copy)]
pub struct TimezoneRules {
    dst: TimeChangeRule,
    std: TimeChangeRule,
}

impl TimezoneRules {
    #[must_use]
    pub const fn new(dst: TimeChangeRule, std: TimeChangeRule) -> Self {
        Self { dst, std }
    }

    /// Central European rules: CEST from the last Sunday of March at 02:00,
    /// CET from the last Sunday of October at 03:00.
    #[must_use]
    pub const fn central_europe() -> Self {
        Self::new(
            TimeChangeRule {
                abbrev: "CEST",
                week: WeekOfMonth::Last,
                weekday: Weekday::Sun,
                month: 3,
                hour: 2,
                offset_minutes: 120,
            },
            TimeChangeRule {
                abbrev: "CET",
                week: WeekOfMonth::Last,
                weekday: Weekday::Sun,
                month: 10,
                hour: 3,
                offset_minutes: 60,
            },
        )
    }

    /// Rule in effect at the given UTC instant.
    #[must_use]
    pub fn rule_at(&self, utc: Timestamp) -> &TimeChangeRule {
        if self.is_dst(utc) { &self.dst } else { &self.std }
    }

    /// Shift a UTC instant into local wall-clock time.
    #[must_use]
    pub fn to_local(&self, utc: Timestamp) -> NaiveDateTime {
        let offset = i64::from(self.rule_at(utc).offset_minutes);
        (utc + chrono::Duration::minutes(offset)).naive_utc()
    }

    /// Format a UTC instant as local time with the zone abbreviation,
    /// e.g. `2026-07-01 14:00:00 CEST`.
    #[must_use]
    pub fn format_local(&self, utc: Timestamp) -> String {
        let rule = self.rule_at(utc);
        let local = (utc + chrono::Duration::minutes(i64::from(rule.offset_minutes))).naive_utc();
        format!("{} {}", local.format("%Y-%m-%d %H:%M:%S"), rule.abbrev)
    }

    fn is_dst(&self, utc: Timestamp) -> bool {
        let year = utc.year();
        let (Some(dst_start), Some(std_start)) = (
            transition_utc(&self.dst, self.std.offset_minutes, year),
            transition_utc(&self.std, self.dst.offset_minutes, year),
        ) else {
            // Unresolvable rules (nonexistent month/hour) fall back to
            // standard time rather than failing a log line.
            return false;
        };
        if dst_start < std_start {
            // Northern hemisphere: DST spans the middle of the year.
            utc >= dst_start && utc < std_start
        } else {
            // Southern hemisphere: DST wraps the year boundary.
            utc >= dst_start || utc < std_start
        }
    }
}

/// UTC instant at which `rule` takes effect in `year`. The rule's hour is
/// wall-clock time in the regime being left, so the offset valid before
/// the change (`previous_offset_minutes`) converts it to UTC.
fn transition_utc(
    rule: &TimeChangeRule,
    previous_offset_minutes: i32,
    year: i32,
) -> Option<Timestamp> {
    let date = nth_weekday(year, rule.month, rule.weekday, rule.week)?;
    let local = date.and_hms_opt(rule.hour, 0, 0)?;
    let utc = local - chrono::Duration::minutes(i64::from(previous_offset_minutes));
    Some(Utc.from_utc_datetime(&utc))
}

fn nth_weekday(year: i32, month: u32, weekday: Weekday, week: WeekOfMonth) -> Option<NaiveDate> {
    let weeks_forward: u64 = match week {
        WeekOfMonth::First => 0,
        WeekOfMonth::Second => 1,
        WeekOfMonth::Third => 2,
        WeekOfMonth::Fourth => 3,
        WeekOfMonth::Last => return last_weekday(year, month, weekday),
    };
    let mut date = NaiveDate::from_ymd_opt(year, month, 1)?;
    while date.weekday() != weekday {
        date = date.succ_opt()?;
    }
    date.checked_add_days(Days::new(weeks_forward * 7))
}

fn last_weekday(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let next_month_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }?;
    let mut date = next_month_first.pred_opt()?;
    while date.weekday() != weekday {
        date = date.pred_opt()?;
    }
    Some(date)
}
