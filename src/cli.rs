use chrono::NaiveDate;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "daybox", version, about = "Terminal time-boxing daily planner")]
pub struct Cli {
    /// Date to open the planner on, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,
}
