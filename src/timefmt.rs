// Relative-time phrases ("3 hours ago") for provenance comments and
// dupe embeds. Magnitude table follows common humanize conventions:
// seconds up to a minute, then minutes, hours, days, months, years.

use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Format how long ago `then` happened relative to `now`.
///
/// Future instants (clock skew between platforms) collapse to "just now".
pub fn ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - then).num_seconds();
    if secs < 2 {
        return "just now".to_string();
    }
    if secs < MINUTE {
        return format!("{secs} seconds ago");
    }
    if secs < HOUR {
        return plural(secs / MINUTE, "minute");
    }
    if secs < DAY {
        return plural(secs / HOUR, "hour");
    }
    if secs < MONTH {
        return plural(secs / DAY, "day");
    }
    if secs < YEAR {
        return plural(secs / MONTH, "month");
    }
    plural(secs / YEAR, "year")
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}
