//! Convenience casts and prompts for dates and time deltas.
//!
//! These are ordinary [`Prompt`] instances layered on the generic cast
//! contract: a date cast expecting `yyyy-mm-dd` and a duration cast
//! expecting `#w #d hh:mm:ss.micro`, where the weeks and days components
//! are optional and the fractional part is in microseconds. The matching
//! `format_*` functions are exact inverses for values the grammar can
//! represent.

use chrono::{Duration, NaiveDate};

use crate::error::{Error, Result};
use crate::prompt::Prompt;
use crate::value::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Cast function parsing `yyyy-mm-dd` into a [`Value::Date`].
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] on malformed input.
pub fn date(input: &str) -> Result<Value> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map(Value::Date)
        .map_err(|_| Error::InvalidDate(input.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Cast function parsing `#w #d hh:mm:ss.micro` into a [`Value::Duration`].
///
/// The weeks and days components are optional, but weeks may not appear
/// without days. The fractional part, when present, is a microsecond count.
///
/// # Errors
///
/// Returns [`Error::InvalidDuration`] on malformed input or a value outside
/// the representable range.
pub fn duration(input: &str) -> Result<Value> {
    let invalid = || Error::InvalidDuration(input.to_string());

    let parts: Vec<&str> = input.trim().split(' ').collect();
    let mut rest = parts.as_slice();

    let mut weeks = 0;
    let mut days = 0;
    if rest.len() == 3 {
        weeks = parse_unit(rest[0], 'w').ok_or_else(invalid)?;
        rest = &rest[1..];
    }
    if rest.len() == 2 {
        days = parse_unit(rest[0], 'd').ok_or_else(invalid)?;
        rest = &rest[1..];
    }
    let [clock] = rest else {
        return Err(invalid());
    };

    let (clock, microseconds) = match clock.split_once('.') {
        Some((clock, fraction)) => (clock, parse_component(fraction).ok_or_else(invalid)?),
        None => (*clock, 0),
    };

    let fields: Vec<&str> = clock.split(':').collect();
    let [hours, minutes, seconds] = fields.as_slice() else {
        return Err(invalid());
    };
    let hours = parse_component(hours).ok_or_else(invalid)?;
    let minutes = parse_component(minutes).ok_or_else(invalid)?;
    let seconds = parse_component(seconds).ok_or_else(invalid)?;

    let components = [
        Duration::try_weeks(weeks),
        Duration::try_days(days),
        Duration::try_hours(hours),
        Duration::try_minutes(minutes),
        Duration::try_seconds(seconds),
        Some(Duration::microseconds(microseconds)),
    ];

    let mut total = Duration::zero();
    for component in components {
        total = component
            .and_then(|component| total.checked_add(&component))
            .ok_or_else(invalid)?;
    }

    Ok(Value::Duration(total))
}

/// Formats a duration in the grammar accepted by [`duration`]. Weeks and
/// days are emitted only when the duration is long enough to need them.
pub fn format_duration(duration: Duration) -> String {
    let negative = duration < Duration::zero();
    let duration = if negative { -duration } else { duration };

    let mut seconds = duration.num_seconds();
    let microseconds = duration.subsec_nanos() / 1000;

    let weeks = seconds / 604_800;
    seconds %= 604_800;
    let days = seconds / 86_400;
    seconds %= 86_400;
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;

    let mut formatted = String::new();
    if negative {
        formatted.push('-');
    }
    if weeks > 0 {
        formatted.push_str(&format!("{weeks}w "));
    }
    if weeks > 0 || days > 0 {
        formatted.push_str(&format!("{days}d "));
    }
    formatted.push_str(&format!("{hours:02}:{minutes:02}:{seconds:02}"));
    if microseconds > 0 {
        formatted.push_str(&format!(".{microseconds:06}"));
    }

    formatted
}

/// Standard date prompt.
pub fn date_prompt() -> Prompt {
    Prompt::new("Date (yyyy-mm-dd): ").with_cast(date)
}

/// Standard time-delta prompt.
pub fn duration_prompt() -> Prompt {
    Prompt::new("Time (#w #d hh:mm:ss.micro): ").with_cast(duration)
}

fn parse_unit(part: &str, unit: char) -> Option<i64> {
    parse_component(part.strip_suffix(unit)?)
}

fn parse_component(text: &str) -> Option<i64> {
    let parsed = text.parse::<i64>().ok()?;
    if parsed < 0 {
        return None;
    }
    Some(parsed)
}
