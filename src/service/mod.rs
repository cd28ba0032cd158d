pub mod calendar_service;
pub mod chart_renderer;
pub mod gemini_service;
pub mod planner_service;
pub mod schedule_parser;
pub mod schedule_store;
pub mod timeline_layout;
