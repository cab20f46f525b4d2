// Copyright 2026 BadCompany
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Time and severity helpers for values returned by the Zabbix API.
//!
//! Zabbix reports clocks as unix timestamps (often as strings) and trigger
//! priorities as small integers; these helpers turn them into readable form.

use chrono::{DateTime, Local, TimeDelta, TimeZone};
use serde_json::Value;

pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Trigger severity names, indexed by priority.
pub const TRIGGER_SEVERITY: [&str; 6] = [
    "not_classified",
    "information",
    "warning",
    "average",
    "high",
    "disaster",
];

/// Severity name for a trigger priority; `"unknown"` when out of range.
pub fn severity_name(priority: i64) -> &'static str {
    usize::try_from(priority)
        .ok()
        .and_then(|p| TRIGGER_SEVERITY.get(p))
        .copied()
        .unwrap_or("unknown")
}

/// Severity name for a `priority` field as returned by the API.
///
/// Accepts both `"4"` and `4`; anything that is not an integer is `"unknown"`.
pub fn severity_of(priority: &Value) -> &'static str {
    let parsed = match priority {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.map_or("unknown", severity_name)
}

/// Local datetime for a unix timestamp.
pub fn from_timestamp(timestamp: i64) -> Option<DateTime<Local>> {
    Local.timestamp_opt(timestamp, 0).single()
}

pub fn format_datetime<Tz: TimeZone>(dt: &DateTime<Tz>, format: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    dt.format(format).to_string()
}

/// Unix timestamp to `DATETIME_FORMAT` text in local time.
pub fn timestamp_to_string(timestamp: i64) -> Option<String> {
    from_timestamp(timestamp).map(|dt| format_datetime(&dt, DATETIME_FORMAT))
}

/// Human readable age of `dt` relative to now.
pub fn age(dt: &DateTime<Local>) -> String {
    format_age(Local::now().signed_duration_since(*dt))
}

/// `"1d 2h 3m"` for spans of a day or more, `"2h 3m 4s"` below that.
pub fn format_age(delta: TimeDelta) -> String {
    let total = delta.num_seconds().max(0);
    let days = total / 86_400;
    let rem = total % 86_400;
    let (hours, rem) = (rem / 3_600, rem % 3_600);
    let (minutes, seconds) = (rem / 60, rem % 60);

    if days > 0 {
        format!("{}d {}h {}m", days, hours, minutes)
    } else {
        format!("{}h {}m {}s", hours, minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_severity_names() {
        assert_eq!(severity_name(0), "not_classified");
        assert_eq!(severity_name(3), "average");
        assert_eq!(severity_name(5), "disaster");
        assert_eq!(severity_name(6), "unknown");
        assert_eq!(severity_name(-1), "unknown");
    }

    #[test]
    fn test_severity_of_api_values() {
        let trigger = json!({"triggerid": "13491", "priority": "4"});
        assert_eq!(severity_of(&trigger["priority"]), "high");
        assert_eq!(severity_of(&json!(5)), "disaster");
        assert_eq!(severity_of(&json!(" 0 ")), "not_classified");
        assert_eq!(severity_of(&json!("9")), "unknown");
        assert_eq!(severity_of(&json!("high")), "unknown");
        assert_eq!(severity_of(&json!(2.5)), "unknown");
        assert_eq!(severity_of(&Value::Null), "unknown");
    }

    #[test]
    fn test_format_age() {
        assert_eq!(format_age(TimeDelta::seconds(3 * 3600 + 4 * 60 + 5)), "3h 4m 5s");
        assert_eq!(
            format_age(TimeDelta::seconds(2 * 86_400 + 3600 + 120 + 7)),
            "2d 1h 2m"
        );
        assert_eq!(format_age(TimeDelta::seconds(-30)), "0h 0m 0s");
    }

    #[test]
    fn test_timestamp_roundtrip_through_local_time() {
        let dt = from_timestamp(1_700_000_000).unwrap();
        assert_eq!(dt.timestamp(), 1_700_000_000);

        let text = timestamp_to_string(1_700_000_000).unwrap();
        assert_eq!(text, dt.format(DATETIME_FORMAT).to_string());
        assert_eq!(text.len(), "2023-11-14 22:13:20".len());
    }

    #[test]
    fn test_age_of_recent_time() {
        let dt = Local::now() - TimeDelta::seconds(65);
        let text = age(&dt);
        assert!(text.starts_with("0h 1m"), "unexpected age {}", text);
    }
}
