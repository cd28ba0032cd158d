use std::sync::Arc;

use chrono::Utc;
use chrono_tz::Tz;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::Mutex;
use tracing::info;

use crate::config::Settings;
use crate::error::Result;
use crate::models::reminder::{parse_reminder_line, reminders_for_schedule};
use crate::service::planner_service::latest_saved_plan;
use crate::service::schedule_store::ScheduleStore;
use crate::tasks::reminder_loop::{add_reminder, run_reminder_loop, ConsoleNotifier, SharedReminders};

pub async fn run_watch(settings: &Settings) -> Result<()> {
    let reminders: SharedReminders = Arc::new(Mutex::new(Vec::new()));
    let tz = settings.timezone;

    let store = ScheduleStore::open(&settings.data_file);
    if let Some(plan) = latest_saved_plan(&store) {
        let upcoming = reminders_for_schedule(
            plan.date,
            &plan.schedule,
            &tz,
            settings.reminder_lead,
            Utc::now(),
        );
        info!("Loaded {} reminders from the schedule for {}", upcoming.len(), plan.date);
        for reminder in upcoming {
            add_reminder(&reminders, reminder).await;
        }
    }

    let reminder_loop = tokio::spawn(run_reminder_loop(
        reminders.clone(),
        Arc::new(ConsoleNotifier),
        settings.reminder_poll_interval,
    ));
    let input = tokio::spawn(read_reminder_input(reminders.clone(), tz));

    println!("リマインダーを監視しています。「HH:MM メッセージ」で追加、Ctrl-C で終了します。");
    tokio::signal::ctrl_c().await?;

    reminder_loop.abort();
    input.abort();
    if !store.state().is_empty() {
        store.flush()?;
    }
    info!("Stopped watching reminders");
    Ok(())
}

async fn read_reminder_input(reminders: SharedReminders, tz: Tz) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }
        let today = Utc::now().with_timezone(&tz).date_naive();
        match parse_reminder_line(&line, today, &tz) {
            Some(reminder) => add_reminder(&reminders, reminder).await,
            None => println!("「HH:MM メッセージ」の形式で入力してください。"),
        }
    }
}
