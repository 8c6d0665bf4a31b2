use crate::models::CourseSession;
use crate::time::{TimeOfDay, Weekday};

/// Half-open interval overlap: `[a_start, a_end)` against `[b_start, b_end)`.
pub fn overlaps(a_start: TimeOfDay, a_end: TimeOfDay, b_start: TimeOfDay, b_end: TimeOfDay) -> bool {
    a_start < b_end && a_end > b_start
}

/// Returns the first session on `day` that the proposed `[start, end)` window
/// would overlap, skipping `exclude_id` so a session never blocks itself.
pub fn find_conflict<'a, I>(
    sessions: I,
    exclude_id: Option<i64>,
    day: Weekday,
    start: TimeOfDay,
    end: TimeOfDay,
) -> Option<&'a CourseSession>
where
    I: IntoIterator<Item = &'a CourseSession>,
{
    sessions.into_iter().find(|existing| {
        existing.day_of_week == day
            && Some(existing.id) != exclude_id
            && overlaps(start, end, existing.start_time, existing.end_time)
    })
}

pub fn has_conflict<'a, I>(
    sessions: I,
    exclude_id: Option<i64>,
    day: Weekday,
    start: TimeOfDay,
    end: TimeOfDay,
) -> bool
where
    I: IntoIterator<Item = &'a CourseSession>,
{
    find_conflict(sessions, exclude_id, day, start, end).is_some()
}
