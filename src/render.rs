//! Output rendering.
//! Two modes over the same grid: a plain JSON projection of the week
//! columns, or the minesweeper markdown board with mines and adjacency
//! digits. Rendering is pure: the caller supplies the export timestamp, so
//! identical inputs produce byte-identical text.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::board::{build_board, Board, BoardCell};
use crate::grid::Grid;

const MINE_SYMBOL: &str = "💣";
const SAFE_SYMBOL: &str = "⬜";
const HIDDEN_SYMBOL: &str = "⬛";
const COVERED_MINE_SYMBOL: &str = "🟩"; // unrevealed day with activity

/// Output mode for a render call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Flat JSON projection of the week columns
    Json,
    /// Minesweeper markdown board
    #[default]
    Board,
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Json => write!(f, "json"),
            RenderMode::Board => write!(f, "board"),
        }
    }
}

/// Options shared by both render modes.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub username: String,
    /// When false, the board renders unrevealed: no digits, and mines show
    /// only as covered contribution squares. Callers default to revealing.
    pub reveal: bool,
    pub generated_at: DateTime<Utc>,
}

// *************** Export Types ***************

#[derive(Serialize)]
struct Export<'a> {
    generated_at: String,
    username: &'a str,
    weeks: Vec<Vec<ExportDay<'a>>>,
}

#[derive(Serialize)]
struct ExportDay<'a> {
    date: Option<&'a str>,
    count: u32,
}

// *************** Public API ***************

/// Renders a built grid in the requested mode.
/// A grid with zero week columns is an error in either mode; no degenerate
/// empty document is ever produced.
pub fn render(grid: &Grid, mode: RenderMode, options: &RenderOptions) -> Result<String> {
    if grid.is_empty() {
        bail!("nothing to render: the contribution grid has no week columns");
    }

    match mode {
        RenderMode::Json => render_json(grid, options),
        RenderMode::Board => Ok(render_board(&build_board(grid), options)),
    }
}

// *************** Internal Functions ***************

/// Pure projection of the grid to `{date, count}` pairs, wrapped with the
/// export timestamp and the username. No derived fields.
fn render_json(grid: &Grid, options: &RenderOptions) -> Result<String> {
    let export = Export {
        generated_at: options
            .generated_at
            .to_rfc3339_opts(SecondsFormat::Micros, true),
        username: &options.username,
        weeks: grid
            .weeks
            .iter()
            .map(|week| {
                week.iter()
                    .map(|cell| ExportDay {
                        date: cell.date.as_deref(),
                        count: cell.count,
                    })
                    .collect()
            })
            .collect(),
    };

    serde_json::to_string_pretty(&export).context("Failed to serialize contribution export")
}

/// Serializes the board row-major (row 0 = top day-of-week), one symbol run
/// per row, wrapped in the fenced caption block.
fn render_board(board: &Board, options: &RenderOptions) -> String {
    let mut lines = Vec::new();
    lines.push("```markdown".to_string());
    lines.push(format!(
        "## 🎮 Contribution Minesweeper - user: {}\n",
        options.username
    ));
    for r in 0..board.rows() {
        let row: String = board
            .cells
            .iter()
            .map(|column| symbol(&column[r], options.reveal))
            .collect();
        lines.push(row);
    }
    lines.push(
        "\n💥 **Boom!** Squares marked 💣 are days with contributions (mines).".to_string(),
    );
    lines.push("🔎 Numbers count the mines in the 8 surrounding squares.".to_string());
    lines.push("```".to_string());
    lines.join("\n")
}

/// Maps one board cell to its display symbol, in priority order: mine,
/// then adjacency digit, then safe. Hidden cells collapse to the uniform
/// hidden symbol, except mines, which keep a distinct covered marker.
fn symbol(cell: &BoardCell, reveal: bool) -> String {
    if cell.is_mine {
        if reveal {
            MINE_SYMBOL.to_string()
        } else {
            COVERED_MINE_SYMBOL.to_string()
        }
    } else if !reveal {
        HIDDEN_SYMBOL.to_string()
    } else if cell.adjacent_mines > 0 {
        cell.adjacent_mines.to_string()
    } else {
        SAFE_SYMBOL.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;
    use chrono::TimeZone;

    fn grid_from_counts(columns: &[&[u32]]) -> Grid {
        Grid {
            weeks: columns
                .iter()
                .map(|col| {
                    col.iter()
                        .map(|&count| Cell { date: None, count })
                        .collect()
                })
                .collect(),
        }
    }

    fn options() -> RenderOptions {
        RenderOptions {
            username: "octocat".to_string(),
            reveal: true,
            generated_at: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_render_mode_display() {
        assert_eq!(format!("{}", RenderMode::Json), "json");
        assert_eq!(format!("{}", RenderMode::Board), "board");
    }

    #[test]
    fn test_render_mode_default_is_board() {
        assert_eq!(RenderMode::default(), RenderMode::Board);
    }

    #[test]
    fn test_json_export_shape() {
        let grid = Grid {
            weeks: vec![vec![
                Cell {
                    date: Some("2024-01-01".to_string()),
                    count: 2,
                },
                Cell {
                    date: None,
                    count: 0,
                },
            ]],
        };
        let text = render(&grid, RenderMode::Json, &options()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["generated_at"], "2024-01-01T12:00:00.000000Z");
        assert_eq!(value["username"], "octocat");
        assert_eq!(value["weeks"][0][0]["date"], "2024-01-01");
        assert_eq!(value["weeks"][0][0]["count"], 2);
        assert_eq!(value["weeks"][0][1]["date"], serde_json::Value::Null);
    }

    #[test]
    fn test_json_export_has_no_derived_fields() {
        let grid = grid_from_counts(&[&[3, 0, 0, 0, 0, 0, 0]]);
        let text = render(&grid, RenderMode::Json, &options()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        let day = value["weeks"][0][0].as_object().unwrap();
        let mut keys: Vec<_> = day.keys().map(String::as_str).collect();
        keys.sort();
        assert_eq!(keys, vec!["count", "date"]);
    }

    #[test]
    fn test_board_output_exact() {
        let grid = grid_from_counts(&[&[0, 3, 0, 0, 0, 0, 0]]);
        let text = render(&grid, RenderMode::Board, &options()).unwrap();
        let expected = "```markdown\n\
                        ## 🎮 Contribution Minesweeper - user: octocat\n\
                        \n\
                        1\n\
                        💣\n\
                        1\n\
                        ⬜\n\
                        ⬜\n\
                        ⬜\n\
                        ⬜\n\
                        \n\
                        💥 **Boom!** Squares marked 💣 are days with contributions (mines).\n\
                        🔎 Numbers count the mines in the 8 surrounding squares.\n\
                        ```";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_board_rows_run_left_to_right_across_weeks() {
        let grid = grid_from_counts(&[&[5, 0, 0, 0, 0, 0, 0], &[0; 7], &[0; 7]]);
        let text = render(&grid, RenderMode::Board, &options()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        // row 0 sits after the fence, title, and blank line
        assert_eq!(lines[3], "💣1⬜");
        assert_eq!(lines[4], "11⬜");
        assert_eq!(lines[5], "⬜⬜⬜");
    }

    #[test]
    fn test_hidden_board_shows_covered_squares_only() {
        let grid = grid_from_counts(&[&[0, 3, 0, 0, 0, 0, 0]]);
        let mut opts = options();
        opts.reveal = false;
        let text = render(&grid, RenderMode::Board, &opts).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[3..10], ["⬛", "🟩", "⬛", "⬛", "⬛", "⬛", "⬛"]);
    }

    #[test]
    fn test_all_zero_grid_renders_only_safe_squares() {
        let grid = grid_from_counts(&[&[0; 7], &[0; 7], &[0; 7]]);
        let text = render(&grid, RenderMode::Board, &options()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        for row in &lines[3..10] {
            assert_eq!(*row, "⬜⬜⬜");
        }
    }

    #[test]
    fn test_render_is_byte_identical_across_calls() {
        let grid = grid_from_counts(&[&[0, 2, 0, 0, 1, 0, 0], &[1, 0, 0, 0, 0, 0, 4]]);
        let opts = options();
        for mode in [RenderMode::Json, RenderMode::Board] {
            let first = render(&grid, mode, &opts).unwrap();
            let second = render(&grid, mode, &opts).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_empty_grid_is_an_error_in_both_modes() {
        let grid = Grid::default();
        for mode in [RenderMode::Json, RenderMode::Board] {
            let err = render(&grid, mode, &options()).unwrap_err();
            assert!(err.to_string().contains("nothing to render"));
        }
    }
}
