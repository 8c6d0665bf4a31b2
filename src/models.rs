use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::time::{TimeOfDay, Weekday};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct CourseSession {
    pub id: i64,
    pub course_name: String,
    pub teacher: String,
    pub classroom: String,
    #[schema(value_type = u8, minimum = 1, maximum = 7, example = 1)]
    pub day_of_week: Weekday,
    #[schema(value_type = String, example = "08:00")]
    pub start_time: TimeOfDay,
    #[schema(value_type = String, example = "09:40")]
    pub end_time: TimeOfDay,
    pub week_range: String,
    pub credit: Option<f64>,
    pub notes: String,
    #[schema(value_type = String, format = "date-time", example = "2025-09-01T08:00:00")]
    pub created_at: NaiveDateTime,
}

impl CourseSession {
    pub fn duration_minutes(&self) -> u16 {
        self.end_time.minutes().saturating_sub(self.start_time.minutes())
    }
}

/// Create/update payload as sent by clients. Required fields are checked by
/// [`crate::validation::validate_course`] so a missing one surfaces as a
/// validation error rather than a rejected body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CourseInput {
    pub course_name: Option<String>,
    pub teacher: Option<String>,
    pub classroom: Option<String>,
    #[schema(minimum = 1, maximum = 7)]
    pub day_of_week: Option<i64>,
    #[schema(example = "08:00")]
    pub start_time: Option<String>,
    #[schema(example = "09:40")]
    pub end_time: Option<String>,
    pub week_range: Option<String>,
    pub credit: Option<f64>,
    pub notes: Option<String>,
}

/// A validated [`CourseInput`], ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub course_name: String,
    pub teacher: String,
    pub classroom: String,
    pub day_of_week: Weekday,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub week_range: String,
    pub credit: Option<f64>,
    pub notes: String,
}

impl NewCourse {
    pub fn into_session(self, id: i64, created_at: NaiveDateTime) -> CourseSession {
        CourseSession {
            id,
            course_name: self.course_name,
            teacher: self.teacher,
            classroom: self.classroom,
            day_of_week: self.day_of_week,
            start_time: self.start_time,
            end_time: self.end_time,
            week_range: self.week_range,
            credit: self.credit,
            notes: self.notes,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct CourseTimeShare {
    pub course_name: String,
    pub minutes: u32,
    pub hours: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Statistics {
    pub total_courses: usize,
    pub total_hours: f64,
    pub course_time_distribution: Vec<CourseTimeShare>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct Period {
    pub number: u8,
    #[schema(value_type = String, example = "08:00")]
    pub start: TimeOfDay,
    #[schema(value_type = String, example = "08:45")]
    pub end: TimeOfDay,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct MutationResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub message: String,
}
