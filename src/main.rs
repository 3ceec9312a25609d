mod cli;
mod model;
mod slots;
mod ui;

use anyhow::Result;
use chrono::Local;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let start_date = args.date.unwrap_or_else(|| Local::now().date_naive());
    ui::run(model::Planner::new(), start_date)
}
