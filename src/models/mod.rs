pub mod calendar_event;
pub mod persisted_day;
pub mod reminder;
pub mod time_block;
