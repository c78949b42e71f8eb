//! Markup parsing module.
//! Scans the fetched contribution page for `<rect>` day-marks and extracts
//! their attributes into flat `DayRecord`s.
//! Defaulting rules: a missing or unparseable `data-count` becomes 0; the
//! `x`/`y` positions are optional and truncated from the float text the
//! markup uses.

use regex::Regex;
use std::collections::HashMap;

/// One parsed day-mark: calendar date, activity count, and the optional
/// source-grid position of the mark. Immutable once parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct DayRecord {
    pub date: Option<String>,
    pub count: u32,
    pub x: Option<i64>,
    pub y: Option<i64>,
}

/// Extracts every day-mark from the contribution page markup.
///
/// Only `<rect>` elements carrying a `data-date` attribute are day-marks;
/// everything else in the page is ignored. Returned records are sorted by
/// date ascending so downstream chunking sees calendar order.
pub fn parse_day_records(markup: &str) -> Vec<DayRecord> {
    let rect_re = Regex::new(r"<rect\b[^>]*>").expect("valid rect pattern");
    let attr_re =
        Regex::new(r#"([A-Za-z_][A-Za-z0-9_-]*)="([^"]*)""#).expect("valid attribute pattern");

    let mut records = Vec::new();
    for tag in rect_re.find_iter(markup) {
        let attrs: HashMap<&str, &str> = attr_re
            .captures_iter(tag.as_str())
            .map(|cap| {
                let (_, [name, value]) = cap.extract();
                (name, value)
            })
            .collect();

        let Some(date) = attrs.get("data-date") else {
            continue;
        };

        records.push(DayRecord {
            date: Some((*date).to_string()),
            count: attrs
                .get("data-count")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            x: attrs.get("x").and_then(|v| parse_coord(v)),
            y: attrs.get("y").and_then(|v| parse_coord(v)),
        });
    }

    records.sort_by(|a, b| a.date.cmp(&b.date));
    records
}

/// Coordinates appear as decimal floats in the markup ("12.5"); truncate.
fn parse_coord(raw: &str) -> Option<i64> {
    raw.parse::<f64>().ok().map(|v| v as i64)
}
