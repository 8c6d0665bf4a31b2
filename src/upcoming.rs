use chrono::{Datelike, Local, NaiveDateTime, Timelike};

use crate::models::CourseSession;
use crate::store::sort_chronologically;
use crate::time::{TimeOfDay, Weekday};

pub const DEFAULT_LIMIT: usize = 5;

/// A local wall-clock reading reduced to what the weekly schedule needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallClock {
    pub day: Weekday,
    pub time: TimeOfDay,
}

impl WallClock {
    pub fn now() -> Self {
        Self::from_datetime(Local::now().naive_local())
    }

    pub fn from_datetime(dt: NaiveDateTime) -> Self {
        Self {
            day: dt.weekday().into(),
            time: TimeOfDay::hm(dt.hour() as u16, dt.minute() as u16),
        }
    }
}

/// Sessions still ahead today plus every session tomorrow, earliest first.
///
/// Only one day of lookahead is taken. Ordering is by weekday number, so on
/// Sunday the Monday sessions sort ahead of the rest of Sunday.
pub fn upcoming(sessions: &[CourseSession], now: WallClock, limit: usize) -> Vec<CourseSession> {
    let next_day = now.day.next();
    let mut selected: Vec<CourseSession> = sessions
        .iter()
        .filter(|s| {
            (s.day_of_week == now.day && s.start_time >= now.time) || s.day_of_week == next_day
        })
        .cloned()
        .collect();
    sort_chronologically(&mut selected);
    selected.truncate(limit);
    selected
}
