mod board;
mod fetch;
mod grid;
mod parse;
mod render;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Arg, ArgAction, Command};
use std::fs;

use render::{RenderMode, RenderOptions};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let matches = Command::new("minefield-rs")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Renders a GitHub contribution graph as a minesweeper board or a JSON export")
        .arg(
            Arg::new("username")
                .value_name("USERNAME")
                .help("GitHub username whose contribution graph to fetch")
                .required(true),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .value_name("MODE")
                .help("Output mode")
                .default_value("board")
                .value_parser(["board", "json"]),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .value_name("FILE")
                .help("Write output to FILE instead of stdout"),
        )
        .arg(
            Arg::new("hidden")
                .long("hidden")
                .action(ArgAction::SetTrue)
                .help("Render the board unrevealed: no digits, mines show as covered squares"),
        )
        .get_matches();

    let username = matches.get_one::<String>("username").unwrap(); // Safe: required
    let mode = match matches.get_one::<String>("mode").unwrap().as_str() {
        // Safe due to default
        "json" => RenderMode::Json,
        _ => RenderMode::Board,
    };

    // Step 1: Fetch the raw contribution graph markup
    let markup = fetch::fetch_contributions(username)
        .await
        .context("Failed to fetch the contribution graph")?;

    // Step 2: Extract flat day-records
    let records = parse::parse_day_records(&markup);
    if records.is_empty() {
        bail!("No contribution data found for '{}'", username);
    }
    log::debug!("Parsed {} day-records", records.len());

    // Step 3: Reshape into week columns
    let grid = grid::build(&records);

    // Step 4: Render and write
    let options = RenderOptions {
        username: username.clone(),
        reveal: !matches.get_flag("hidden"),
        generated_at: Utc::now(),
    };
    let output = render::render(&grid, mode, &options)?;

    match matches.get_one::<String>("outfile") {
        Some(path) => {
            fs::write(path, &output)
                .with_context(|| format!("Failed to write output to {}", path))?;
            println!("Wrote {} with {} weeks.", path, grid.weeks.len());
        }
        None => println!("{}", output),
    }

    Ok(())
}
