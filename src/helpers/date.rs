//! Date helper functions

use chrono::NaiveDate;
use std::fmt::Write;

/// Format a date using a Moment.js-style format string
///
/// # Examples
/// ```ignore
/// format_date(date, "MMM D, YYYY") // -> "Sep 6, 2024"
/// ```
pub fn format_date(date: NaiveDate, format: &str) -> String {
    let chrono_format = moment_to_chrono_format(format);
    let mut out = String::new();
    if write!(out, "{}", date.format(&chrono_format)).is_err() {
        return date.format("%Y-%m-%d").to_string();
    }
    out
}

/// Midnight UTC of the date, RFC 3339 (for feeds)
pub fn date_xml(date: NaiveDate) -> String {
    format!("{}T00:00:00Z", date.format("%Y-%m-%d"))
}

/// Convert Moment.js date tokens to chrono specifiers.
///
/// Runs of the same letter form one token; unknown letters and other
/// characters are copied through (with `%` escaped).
fn moment_to_chrono_format(format: &str) -> String {
    let chars: Vec<char> = format.chars().collect();
    let mut result = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let run = chars[i..].iter().take_while(|&&x| x == c).count();

        let spec = match (c, run) {
            ('Y', 4) => Some("%Y"),
            ('Y', 2) => Some("%y"),
            ('M', 4) => Some("%B"),
            ('M', 3) => Some("%b"),
            ('M', 2) => Some("%m"),
            ('M', 1) => Some("%-m"),
            ('D', 2) => Some("%d"),
            ('D', 1) => Some("%-d"),
            ('d', 4) => Some("%A"),
            ('d', 3) => Some("%a"),
            _ => None,
        };

        match spec {
            Some(spec) => result.push_str(spec),
            None => {
                for _ in 0..run {
                    if c == '%' {
                        result.push_str("%%");
                    } else {
                        result.push(c);
                    }
                }
            }
        }

        i += run;
    }

    result
}
