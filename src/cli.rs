use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveTime, Utc};
use clap::{Parser, Subcommand};
use inquire::Text;
use tracing::info;

use crate::clients::http_client;
use crate::config::Settings;
use crate::error::{PlannerError, Result};
use crate::runtime;
use crate::service::calendar_service::GoogleCalendarService;
use crate::service::chart_renderer::render_svg;
use crate::service::gemini_service::GeminiService;
use crate::service::planner_service::{latest_saved_plan, DayPlan, PlanOutcome, PlannerService};
use crate::service::schedule_parser;
use crate::service::schedule_store::ScheduleStore;

#[derive(Parser)]
#[command(name = "dayplanner", version, about = "Turns a day's calendar events into a full-day schedule")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a day's events, have Gemini plan the day, save and chart it
    Plan {
        /// Day to plan (YYYY-MM-DD). Asked for interactively when omitted.
        date: Option<NaiveDate>,
        /// Where to write the SVG chart
        #[arg(long)]
        chart: Option<PathBuf>,
    },
    /// Show and chart the last saved schedule
    Show {
        #[arg(long)]
        chart: Option<PathBuf>,
    },
    /// Parse schedule text from a file (or stdin) and print the time blocks
    Parse { file: Option<PathBuf> },
    /// Fire reminders for the saved schedule; type `HH:MM message` to add more
    Watch,
}

pub async fn cli(settings: Settings) -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Plan { date, chart } => {
            let date = match date {
                Some(date) => date,
                None => prompt_for_date(today(&settings))?,
            };
            plan(&settings, date, chart.as_deref().unwrap_or(settings.chart_file.as_path())).await
        }
        Commands::Show { chart } => show(&settings, chart.as_deref().unwrap_or(settings.chart_file.as_path())),
        Commands::Parse { file } => parse(file.as_deref()),
        Commands::Watch => runtime::run_watch(&settings).await,
    }
}

async fn plan(settings: &Settings, date: NaiveDate, chart: &Path) -> Result<()> {
    let http = http_client(settings.request_timeout)?;
    let generator = GeminiService::new(
        http.clone(),
        settings.require_api_key()?.to_string(),
        settings.gemini_model.clone(),
    );
    let calendar = GoogleCalendarService::new(
        http,
        settings.calendar_id.clone(),
        settings.token_file.clone(),
        settings.timezone,
    );
    let mut planner = PlannerService::new(
        Arc::new(calendar),
        Arc::new(generator),
        ScheduleStore::open(&settings.data_file),
    );

    println!("{}の予定を取得しています...", date.format("%Y年%m月%d日"));
    match planner.plan_day(date).await? {
        PlanOutcome::NoEvents => println!("この日の予定はありません。"),
        PlanOutcome::Planned(plan) => {
            for event in &plan.events {
                println!("{}", event);
            }
            println!("\n--- Geminiによるスケジュール提案 ---\n{}", plan.schedule_text);
            if plan.schedule.is_empty() {
                println!("\nスケジュールを解析できませんでした。");
            } else {
                write_chart(&plan, chart, now_local(settings))?;
            }
        }
    }
    Ok(())
}

fn show(settings: &Settings, chart: &Path) -> Result<()> {
    let store = ScheduleStore::open(&settings.data_file);
    let Some(plan) = latest_saved_plan(&store) else {
        println!("保存されたデータがありません。");
        return Ok(());
    };
    println!("{}", plan.date.format("%Y年%m月%d日"));
    println!("{}", plan.schedule_text);
    write_chart(&plan, chart, now_local(settings))
}

fn parse(file: Option<&Path>) -> Result<()> {
    let text = match file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };
    let schedule = schedule_parser::parse(&text);
    if schedule.is_empty() {
        println!("スケジュールを解析できませんでした。");
    }
    for block in &schedule {
        println!("{}", block);
    }
    Ok(())
}

fn write_chart(plan: &DayPlan, chart: &Path, now: NaiveTime) -> Result<()> {
    let Some(geometry) = plan.geometry(now) else {
        println!("\nスケジュールを視覚化できませんでした。");
        return Ok(());
    };
    fs::write(chart, render_svg(&geometry))?;
    info!("Chart written to {}", chart.display());
    println!("\nチャートを保存しました: {}", chart.display());
    Ok(())
}

fn today(settings: &Settings) -> NaiveDate {
    Utc::now().with_timezone(&settings.timezone).date_naive()
}

fn now_local(settings: &Settings) -> NaiveTime {
    Utc::now().with_timezone(&settings.timezone).time()
}

fn prompt_for_date(today: NaiveDate) -> Result<NaiveDate> {
    let year = Text::new("年:").with_default(&today.year().to_string()).prompt()?;
    let month = Text::new("月:").with_default(&today.month().to_string()).prompt()?;
    let day = Text::new("日:").with_default(&today.day().to_string()).prompt()?;
    date_from_parts(&year, &month, &day)
}

pub fn date_from_parts(year: &str, month: &str, day: &str) -> Result<NaiveDate> {
    let invalid = || PlannerError::InvalidDate(format!("{}-{}-{}", year.trim(), month.trim(), day.trim()));
    let year: i32 = year.trim().parse().map_err(|_| invalid())?;
    let month: u32 = month.trim().parse().map_err(|_| invalid())?;
    let day: u32 = day.trim().parse().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_date_from_typed_parts() {
        assert_eq!(
            date_from_parts(" 2026", "10 ", "8").unwrap(),
            NaiveDate::from_ymd_opt(2026, 10, 8).unwrap()
        );
    }

    #[test]
    fn rejects_impossible_dates() {
        assert!(matches!(date_from_parts("2026", "2", "30"), Err(PlannerError::InvalidDate(_))));
        assert!(matches!(date_from_parts("2026", "13", "1"), Err(PlannerError::InvalidDate(_))));
        assert!(matches!(date_from_parts("next", "1", "1"), Err(PlannerError::InvalidDate(_))));
    }

    #[test]
    fn cli_accepts_iso_date() {
        let cli = Cli::try_parse_from(["dayplanner", "plan", "2026-10-18"]).unwrap();
        match cli.command {
            Commands::Plan { date, chart } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2026, 10, 18));
                assert!(chart.is_none());
            }
            _ => panic!("expected plan"),
        }
        assert!(Cli::try_parse_from(["dayplanner", "plan", "2026-02-30"]).is_err());
    }
}
