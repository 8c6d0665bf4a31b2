use std::collections::HashMap;

use crate::models::{CourseSession, CourseTimeShare, Statistics};

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Aggregates scheduled minutes per course name and each course's share of
/// the weekly total, largest first. Ties keep first-seen order.
pub fn statistics(sessions: &[CourseSession]) -> Statistics {
    let mut order: Vec<(&str, u32)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut total_minutes: u32 = 0;

    for session in sessions {
        let duration = u32::from(session.duration_minutes());
        let slot = *index.entry(session.course_name.as_str()).or_insert_with(|| {
            order.push((session.course_name.as_str(), 0));
            order.len() - 1
        });
        order[slot].1 += duration;
        total_minutes += duration;
    }

    let mut distribution: Vec<CourseTimeShare> = order
        .into_iter()
        .map(|(course_name, minutes)| {
            let percentage = if total_minutes > 0 {
                f64::from(minutes) / f64::from(total_minutes) * 100.0
            } else {
                0.0
            };
            CourseTimeShare {
                course_name: course_name.to_string(),
                minutes,
                hours: round2(f64::from(minutes) / 60.0),
                percentage: round2(percentage),
            }
        })
        .collect();
    distribution.sort_by(|a, b| b.minutes.cmp(&a.minutes));

    Statistics {
        total_courses: sessions.len(),
        total_hours: round2(f64::from(total_minutes) / 60.0),
        course_time_distribution: distribution,
    }
}
