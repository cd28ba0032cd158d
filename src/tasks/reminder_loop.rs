use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{error, info};

use crate::error::{PlannerError, Result};
use crate::models::reminder::Reminder;

/// Pending reminders. The loop and anything adding reminders go through the lock.
pub type SharedReminders = Arc<Mutex<Vec<Reminder>>>;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, reminder: &Reminder) -> Result<()>;
}

pub struct ConsoleNotifier;

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, reminder: &Reminder) -> Result<()> {
        info!("Reminder {} fired", reminder.id);
        writeln!(io::stdout().lock(), "\x07[リマインダー] {}", reminder.message).map_err(|err| {
            PlannerError::Notification(format!("could not print reminder {}: {}", reminder.id, err))
        })
    }
}

pub async fn add_reminder(reminders: &SharedReminders, reminder: Reminder) {
    let mut pending = reminders.lock().await;
    info!("Reminder scheduled at {}: {}", reminder.due_at, reminder.message);
    pending.push(reminder);
}

pub async fn run_reminder_loop<N: Notifier + ?Sized>(
    reminders: SharedReminders,
    notifier: Arc<N>,
    poll_interval: Duration,
) {
    loop {
        sleep(poll_interval).await;
        shared_reminder_tick(&reminders, notifier.as_ref(), Utc::now()).await;
    }
}

/// Like [`reminder_tick`], but the lock is released before anything is delivered.
pub async fn shared_reminder_tick<N: Notifier + ?Sized>(
    reminders: &SharedReminders,
    notifier: &N,
    now: DateTime<Utc>,
) -> usize {
    let due = {
        let mut pending = reminders.lock().await;
        take_due(&mut pending, now)
    };
    deliver(&due, notifier).await;
    due.len()
}

/// Fires everything due at `now`. Each reminder leaves the list before it is
/// delivered, so it fires at most once even if delivery fails.
pub async fn reminder_tick<N: Notifier + ?Sized>(
    reminders: &mut Vec<Reminder>,
    notifier: &N,
    now: DateTime<Utc>,
) -> usize {
    let due = take_due(reminders, now);
    deliver(&due, notifier).await;
    due.len()
}

fn take_due(reminders: &mut Vec<Reminder>, now: DateTime<Utc>) -> Vec<Reminder> {
    let (due, waiting): (Vec<Reminder>, Vec<Reminder>) =
        reminders.drain(..).partition(|reminder| reminder.is_due(now));
    *reminders = waiting;
    due
}

async fn deliver<N: Notifier + ?Sized>(due: &[Reminder], notifier: &N) {
    for reminder in due {
        if let Err(err) = notifier.notify(reminder).await {
            error!("Failed to deliver reminder {}: {}", reminder.id, err);
        }
    }
}
