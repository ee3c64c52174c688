pub mod calendar;
pub mod core;
pub mod events;
pub mod grades;
