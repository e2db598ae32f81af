/// Day-of-week mood pattern
///
/// Groups entries by the weekday of their timestamp and finds the weekday
/// with the best and worst mean. Meant for histories of at least
/// `PATTERN_MIN_ENTRIES` entries; shorter ones still compute, over fewer
/// weekdays.

use chrono::{Datelike, TimeZone, Weekday};
use serde::Serialize;

use crate::domain::MoodEntry;
use crate::stats::average::round_one_decimal;

/// Entries needed before the pattern is worth showing
pub const PATTERN_MIN_ENTRIES: usize = 7;

/// Mean mood for one weekday
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayMood {
    pub weekday: Weekday,
    pub average: f64,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayOfWeekPattern {
    /// Weekdays in order of first appearance in the input
    pub days: Vec<WeekdayMood>,
    /// Weekday with the highest mean
    pub peak_day: Option<Weekday>,
    /// Weekday with the lowest mean
    pub challenging_day: Option<Weekday>,
}

/// Compute per-weekday means, taking weekdays in the given timezone
///
/// Ties on the mean go to whichever weekday shows up first in `entries`.
pub fn day_of_week_pattern<Tz: TimeZone>(entries: &[MoodEntry], tz: &Tz) -> DayOfWeekPattern {
    // (weekday, sum, count) in first-occurrence order
    let mut groups: Vec<(Weekday, i64, u32)> = Vec::new();

    for entry in entries {
        let weekday = tz
            .timestamp_millis_opt(entry.timestamp)
            .single()
            .map(|dt| dt.weekday())
            .unwrap_or_else(|| entry.date.weekday());

        match groups.iter_mut().find(|(day, _, _)| *day == weekday) {
            Some(group) => {
                group.1 += entry.mood as i64;
                group.2 += 1;
            }
            None => groups.push((weekday, entry.mood as i64, 1)),
        }
    }

    let means: Vec<(Weekday, f64)> = groups
        .iter()
        .map(|(day, sum, count)| (*day, *sum as f64 / *count as f64))
        .collect();

    let mut peak: Option<(Weekday, f64)> = None;
    let mut challenging: Option<(Weekday, f64)> = None;
    for &(day, mean) in &means {
        if peak.map_or(true, |(_, best)| mean > best) {
            peak = Some((day, mean));
        }
        if challenging.map_or(true, |(_, worst)| mean < worst) {
            challenging = Some((day, mean));
        }
    }

    DayOfWeekPattern {
        days: groups
            .iter()
            .zip(&means)
            .map(|((day, _, count), (_, mean))| WeekdayMood {
                weekday: *day,
                average: round_one_decimal(*mean),
                count: *count,
            })
            .collect(),
        peak_day: peak.map(|(day, _)| day),
        challenging_day: challenging.map(|(day, _)| day),
    }
}

/// Full English weekday name
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
