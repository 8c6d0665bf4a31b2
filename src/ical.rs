use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use icalendar::{Calendar, Component, Event, EventLike};

use crate::models::CourseSession;
use crate::periods::period_by_start;
use crate::time::TimeOfDay;

#[derive(Clone)]
pub struct ICalExporter {
    calendar_name: String,
}

fn at(date: NaiveDate, time: TimeOfDay) -> NaiveDateTime {
    let midnight = NaiveDateTime::new(date, NaiveTime::MIN);
    midnight + Duration::minutes(i64::from(time.minutes()))
}

impl ICalExporter {
    pub fn new(calendar_name: impl Into<String>) -> Self {
        Self {
            calendar_name: calendar_name.into(),
        }
    }

    /// Renders each session as a weekly recurring event, first occurring in
    /// the week starting on `week_start` (a Monday).
    pub fn generate(&self, sessions: &[CourseSession], week_start: NaiveDate) -> Vec<u8> {
        if sessions.is_empty() {
            return Vec::new();
        }

        let mut calendar = Calendar::new();
        calendar.name(&self.calendar_name);

        for session in sessions {
            let date = week_start + Duration::days(i64::from(session.day_of_week.days_from_monday()));

            let mut description = Vec::new();
            if let Some(number) = period_by_start(session.start_time) {
                description.push(format!("Period {number}"));
            }
            if !session.teacher.is_empty() {
                description.push(format!("Teacher: {}", session.teacher));
            }
            if !session.week_range.is_empty() {
                description.push(format!("Weeks: {}", session.week_range));
            }
            if let Some(credit) = session.credit {
                description.push(format!("Credit: {credit}"));
            }
            if !session.notes.is_empty() {
                description.push(session.notes.clone());
            }

            let mut event = Event::new();
            event.summary(&session.course_name);
            event.starts(at(date, session.start_time));
            event.ends(at(date, session.end_time));
            event.add_property("RRULE", "FREQ=WEEKLY");
            if !session.classroom.is_empty() {
                event.location(&session.classroom);
            }
            if !description.is_empty() {
                event.description(&description.join("\n"));
            }
            event.uid(&format!("course-{}-course-schedule", session.id));
            calendar.push(event);
        }

        calendar.to_string().into_bytes()
    }
}
