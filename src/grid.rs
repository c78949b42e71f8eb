//! Grid builder module.
//! Reshapes flat day-records into ordered week columns of exactly 7 cells.
//! One pure function covers all three placement cases: group by the source
//! `x` coordinate, chunk by 7 when no coordinates exist, or both at once
//! (coordinate-less leftovers become trailing weeks).

use crate::parse::DayRecord;
use std::collections::BTreeMap;

/// Rows per week column; the activity graphic is a 7-day weekly layout.
pub const DAYS_PER_WEEK: usize = 7;

/// One day slot in the grid. Synthesized padding slots carry
/// `date: None, count: 0`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cell {
    pub date: Option<String>,
    pub count: u32,
}

/// Ordered week columns, top cell first in each. Every week holds exactly
/// `DAYS_PER_WEEK` cells once built.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grid {
    pub weeks: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }
}

/// Builds the week/day grid from parsed day-records.
///
/// Placement policy:
/// 1. Records with an `x` coordinate are grouped by it, one week per
///    distinct value, weeks ordered ascending. Inside a week, records sort
///    by `y` ascending (a missing `y` sorts as 0, stable).
/// 2. With no `x` anywhere, the flat list is chunked into weeks of 7 in
///    input order.
/// 3. Mixed input gets both: grouped weeks first, then the leftovers
///    chunked and appended. Every record lands in exactly one week.
///
/// Empty input builds an empty grid; whether that is fatal is up to the
/// caller.
pub fn build(records: &[DayRecord]) -> Grid {
    let mut by_x: BTreeMap<i64, Vec<&DayRecord>> = BTreeMap::new();
    let mut loose: Vec<&DayRecord> = Vec::new();

    for record in records {
        match record.x {
            Some(x) => by_x.entry(x).or_default().push(record),
            None => loose.push(record),
        }
    }

    let mut weeks: Vec<Vec<Cell>> = Vec::new();
    for (_, mut column) in by_x {
        column.sort_by_key(|r| r.y.unwrap_or(0));
        weeks.push(normalize(column));
    }
    for chunk in loose.chunks(DAYS_PER_WEEK) {
        weeks.push(normalize(chunk.to_vec()));
    }

    Grid { weeks }
}

/// Pads a short column with empty cells and truncates an overlong one so
/// every week is exactly `DAYS_PER_WEEK` cells.
fn normalize(column: Vec<&DayRecord>) -> Vec<Cell> {
    let mut cells: Vec<Cell> = column
        .into_iter()
        .map(|r| Cell {
            date: r.date.clone(),
            count: r.count,
        })
        .collect();
    cells.resize(DAYS_PER_WEEK, Cell::default());
    cells
}
