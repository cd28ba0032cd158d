use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, info};

use crate::error::Result;
use crate::models::persisted_day::PersistedDay;
use crate::models::time_block::Schedule;
use crate::service::calendar_service::{format_events, CalendarSource};
use crate::service::gemini_service::ScheduleGenerator;
use crate::service::schedule_parser;
use crate::service::schedule_store::ScheduleStore;
use crate::service::timeline_layout::{self, RenderGeometry};

#[derive(Debug, Clone, PartialEq)]
pub struct DayPlan {
    pub date: NaiveDate,
    pub events: Vec<String>,
    pub schedule_text: String,
    pub schedule: Schedule,
}

impl DayPlan {
    pub fn from_saved(date: NaiveDate, day: &PersistedDay) -> Self {
        Self {
            date,
            events: Vec::new(),
            schedule_text: day.schedule_text.clone(),
            schedule: day.schedule.clone(),
        }
    }

    pub fn geometry(&self, now: NaiveTime) -> Option<RenderGeometry> {
        timeline_layout::layout(&self.schedule, self.date, now)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    NoEvents,
    Planned(DayPlan),
}

/// Owns the saved state and the two remote collaborators.
pub struct PlannerService {
    calendar: Arc<dyn CalendarSource>,
    generator: Arc<dyn ScheduleGenerator>,
    store: ScheduleStore,
}

impl PlannerService {
    pub fn new(
        calendar: Arc<dyn CalendarSource>,
        generator: Arc<dyn ScheduleGenerator>,
        store: ScheduleStore,
    ) -> Self {
        Self {
            calendar,
            generator,
            store,
        }
    }

    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    /// Fetch, generate, parse, save. Nothing is saved when the day has no
    /// events or when a collaborator fails.
    pub async fn plan_day(&mut self, date: NaiveDate) -> Result<PlanOutcome> {
        let events = self.calendar.events_for_date(date).await?;
        if events.is_empty() {
            info!("No events on {}", date);
            return Ok(PlanOutcome::NoEvents);
        }

        let events = format_events(&events, &self.calendar.time_zone());
        let schedule_text = self.generator.generate(date, &events).await?;
        debug!("Generated schedule text:\n{}", schedule_text);

        let schedule = schedule_parser::parse(&schedule_text);
        info!("Parsed {} time blocks for {}", schedule.len(), date);

        self.store.save_day(date, &schedule_text, &schedule)?;
        Ok(PlanOutcome::Planned(DayPlan {
            date,
            events,
            schedule_text,
            schedule,
        }))
    }
}

/// The most recently saved day, as shown on start-up.
pub fn latest_saved_plan(store: &ScheduleStore) -> Option<DayPlan> {
    store
        .latest()
        .map(|(date, day)| DayPlan::from_saved(date, day))
}
