use crate::error::ApiError;
use crate::models::{CourseInput, NewCourse};
use crate::store::ScheduleError;
use crate::time::{TimeOfDay, Weekday};

pub const MAX_UPCOMING_LIMIT: usize = 50;

const REQUIRED_FIELDS: &str = "course_name, day_of_week, start_time and end_time are required";

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Checks the required fields of a create/update payload and converts the
/// boundary strings into typed values.
pub fn validate_course(input: CourseInput) -> Result<NewCourse, ScheduleError> {
    let course_name = required(input.course_name);
    let start_time = required(input.start_time);
    let end_time = required(input.end_time);
    let day = input.day_of_week.filter(|d| *d != 0);

    let (Some(course_name), Some(day), Some(start_time), Some(end_time)) =
        (course_name, day, start_time, end_time)
    else {
        return Err(ScheduleError::Validation(REQUIRED_FIELDS.into()));
    };

    let day_of_week = u8::try_from(day)
        .ok()
        .and_then(Weekday::from_number)
        .ok_or_else(|| {
            ScheduleError::Validation(format!("day_of_week must be between 1 and 7, got {day}"))
        })?;
    let start_time: TimeOfDay = start_time
        .trim()
        .parse()
        .map_err(|err| ScheduleError::Validation(format!("start_time: {err}")))?;
    let end_time: TimeOfDay = end_time
        .trim()
        .parse()
        .map_err(|err| ScheduleError::Validation(format!("end_time: {err}")))?;
    if start_time >= end_time {
        return Err(ScheduleError::Validation(
            "end_time must be later than start_time".into(),
        ));
    }

    Ok(NewCourse {
        course_name,
        teacher: input.teacher.unwrap_or_default(),
        classroom: input.classroom.unwrap_or_default(),
        day_of_week,
        start_time,
        end_time,
        week_range: input.week_range.unwrap_or_default(),
        credit: input.credit,
        notes: input.notes.unwrap_or_default(),
    })
}

pub fn validate_limit(value: usize) -> Result<usize, ApiError> {
    if (1..=MAX_UPCOMING_LIMIT).contains(&value) {
        Ok(value)
    } else {
        Err(ApiError::BadRequest(format!(
            "limit must be between 1 and {MAX_UPCOMING_LIMIT}"
        )))
    }
}

pub fn validate_day(value: u8) -> Result<Weekday, ApiError> {
    Weekday::from_number(value)
        .ok_or_else(|| ApiError::BadRequest("day must be between 1 and 7".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> CourseInput {
        CourseInput {
            course_name: Some("Algebra".into()),
            day_of_week: Some(1),
            start_time: Some("09:00".into()),
            end_time: Some("10:30".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_course_defaults_optional_fields() {
        let course = validate_course(input()).unwrap();
        assert_eq!(course.course_name, "Algebra");
        assert_eq!(course.day_of_week, Weekday::Monday);
        assert_eq!(course.start_time.to_string(), "09:00");
        assert_eq!(course.end_time.to_string(), "10:30");
        assert_eq!(course.teacher, "");
        assert_eq!(course.classroom, "");
        assert_eq!(course.notes, "");
        assert_eq!(course.credit, None);
    }

    #[test]
    fn test_validate_course_keeps_name_as_sent() {
        let course = validate_course(CourseInput {
            course_name: Some("  Algebra ".into()),
            teacher: Some(" Dr. Noether".into()),
            ..input()
        })
        .unwrap();
        assert_eq!(course.course_name, "  Algebra ");
        assert_eq!(course.teacher, " Dr. Noether");
    }

    #[test]
    fn test_validate_course_missing_fields() {
        let cases = [
            CourseInput { course_name: None, ..input() },
            CourseInput { course_name: Some("   ".into()), ..input() },
            CourseInput { day_of_week: None, ..input() },
            CourseInput { day_of_week: Some(0), ..input() },
            CourseInput { start_time: Some(String::new()), ..input() },
            CourseInput { end_time: None, ..input() },
        ];
        for case in cases {
            let err = validate_course(case).unwrap_err();
            assert!(matches!(err, ScheduleError::Validation(msg) if msg == REQUIRED_FIELDS));
        }
    }

    #[test]
    fn test_validate_course_bad_values() {
        let out_of_range = CourseInput { day_of_week: Some(8), ..input() };
        assert!(matches!(
            validate_course(out_of_range),
            Err(ScheduleError::Validation(_))
        ));

        let malformed = CourseInput { start_time: Some("9am".into()), ..input() };
        assert!(matches!(
            validate_course(malformed),
            Err(ScheduleError::Validation(msg)) if msg.starts_with("start_time")
        ));

        let reversed = CourseInput {
            start_time: Some("11:00".into()),
            end_time: Some("10:00".into()),
            ..input()
        };
        assert!(validate_course(reversed).is_err());

        let empty_window = CourseInput {
            start_time: Some("10:00".into()),
            end_time: Some("10:00".into()),
            ..input()
        };
        assert!(validate_course(empty_window).is_err());
    }

    #[test]
    fn test_validate_limit() {
        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(50).is_ok());
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(51).is_err());
    }

    #[test]
    fn test_validate_day() {
        assert_eq!(validate_day(7).unwrap(), Weekday::Sunday);
        assert!(validate_day(0).is_err());
    }
}
