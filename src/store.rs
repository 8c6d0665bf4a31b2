use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{NaiveDateTime, SubsecRound, Utc};
use rusqlite::types::{ToSql, ToSqlOutput};
use rusqlite::{Connection, OptionalExtension, Params, Row, params};
use thiserror::Error;
use tracing::{info, warn};

use crate::conflict::find_conflict;
use crate::models::{CourseInput, CourseSession, NewCourse};
use crate::time::{TimeError, TimeOfDay, Weekday};
use crate::validation::validate_course;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS courses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    course_name TEXT NOT NULL,
    teacher TEXT,
    classroom TEXT,
    day_of_week INTEGER NOT NULL,
    start_time TEXT NOT NULL,
    end_time TEXT NOT NULL,
    week_range TEXT,
    credit REAL,
    notes TEXT,
    created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
);
CREATE INDEX IF NOT EXISTS idx_courses_day ON courses (day_of_week);
"#;

const COLUMNS: &str = "id, course_name, teacher, classroom, day_of_week, start_time, end_time, \
                       week_range, credit, notes, created_at";

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Course {0} not found")]
    NotFound(i64),
    #[error("Invalid stored time: {0}")]
    Time(#[from] TimeError),
    #[error("Stored course {id} is invalid: {reason}")]
    InvalidRow { id: i64, reason: String },
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Schedule database lock poisoned")]
    Poisoned,
}

impl ToSql for TimeOfDay {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl ToSql for Weekday {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(i64::from(self.number())))
    }
}

/// Raw `courses` row; text columns are only turned into typed values after
/// leaving SQLite so malformed data surfaces as a [`ScheduleError`].
struct CourseRow {
    id: i64,
    course_name: String,
    teacher: Option<String>,
    classroom: Option<String>,
    day_of_week: i64,
    start_time: String,
    end_time: String,
    week_range: Option<String>,
    credit: Option<f64>,
    notes: Option<String>,
    created_at: NaiveDateTime,
}

impl CourseRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            course_name: row.get(1)?,
            teacher: row.get(2)?,
            classroom: row.get(3)?,
            day_of_week: row.get(4)?,
            start_time: row.get(5)?,
            end_time: row.get(6)?,
            week_range: row.get(7)?,
            credit: row.get(8)?,
            notes: row.get(9)?,
            created_at: row.get(10)?,
        })
    }

    fn into_session(self) -> Result<CourseSession, ScheduleError> {
        let day_of_week = u8::try_from(self.day_of_week)
            .ok()
            .and_then(Weekday::from_number)
            .ok_or_else(|| ScheduleError::InvalidRow {
                id: self.id,
                reason: format!("day_of_week {} is not in 1-7", self.day_of_week),
            })?;

        Ok(CourseSession {
            id: self.id,
            course_name: self.course_name,
            teacher: self.teacher.unwrap_or_default(),
            classroom: self.classroom.unwrap_or_default(),
            day_of_week,
            start_time: self.start_time.parse()?,
            end_time: self.end_time.parse()?,
            week_range: self.week_range.unwrap_or_default(),
            credit: self.credit,
            notes: self.notes.unwrap_or_default(),
            created_at: self.created_at,
        })
    }
}

/// Orders sessions by day, then start time, then id.
pub fn sort_chronologically(sessions: &mut [CourseSession]) {
    sessions.sort_by_key(|s| (s.day_of_week, s.start_time, s.id));
}

/// SQLite-backed collection of course sessions.
///
/// Every mutation validates its input, checks for same-day overlaps and writes
/// inside one transaction while holding the connection lock, so concurrent
/// callers are serialized.
pub struct ScheduleStore {
    db: Mutex<Connection>,
}

impl ScheduleStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ScheduleError> {
        Self::init(Connection::open(path)?)
    }

    pub fn in_memory() -> Result<Self, ScheduleError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, ScheduleError> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            db: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, ScheduleError> {
        self.db.lock().map_err(|_| ScheduleError::Poisoned)
    }

    pub fn ping(&self) -> Result<(), ScheduleError> {
        let db = self.conn()?;
        db.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }

    pub fn create(&self, input: CourseInput) -> Result<CourseSession, ScheduleError> {
        let course = validate_course(input)?;
        let created_at = Utc::now().naive_utc().trunc_subsecs(0);

        let mut db = self.conn()?;
        let tx = db.transaction()?;
        ensure_no_conflict(&tx, None, &course)?;
        tx.execute(
            "INSERT INTO courses (course_name, teacher, classroom, day_of_week, start_time,
                                  end_time, week_range, credit, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                course.course_name,
                course.teacher,
                course.classroom,
                course.day_of_week,
                course.start_time,
                course.end_time,
                course.week_range,
                course.credit,
                course.notes,
                created_at,
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.commit()?;

        info!(
            id,
            day = course.day_of_week.number(),
            course = %course.course_name,
            "course created"
        );
        Ok(course.into_session(id, created_at))
    }

    /// Replaces every mutable field of `id`. The session's own slot never counts
    /// as a conflict, so it can be edited in place.
    pub fn update(&self, id: i64, input: CourseInput) -> Result<CourseSession, ScheduleError> {
        let course = validate_course(input)?;

        let mut db = self.conn()?;
        let tx = db.transaction()?;
        let existing = fetch_one(&tx, id)?.ok_or(ScheduleError::NotFound(id))?;
        ensure_no_conflict(&tx, Some(id), &course)?;
        tx.execute(
            "UPDATE courses
             SET course_name = ?1, teacher = ?2, classroom = ?3, day_of_week = ?4,
                 start_time = ?5, end_time = ?6, week_range = ?7, credit = ?8, notes = ?9
             WHERE id = ?10",
            params![
                course.course_name,
                course.teacher,
                course.classroom,
                course.day_of_week,
                course.start_time,
                course.end_time,
                course.week_range,
                course.credit,
                course.notes,
                id,
            ],
        )?;
        tx.commit()?;

        info!(id, day = course.day_of_week.number(), "course updated");
        Ok(course.into_session(id, existing.created_at))
    }

    /// Removes `id` if present. Deleting a missing id is not an error; the
    /// return value only reports whether a row was removed.
    pub fn delete(&self, id: i64) -> Result<bool, ScheduleError> {
        let db = self.conn()?;
        let removed = db.execute("DELETE FROM courses WHERE id = ?1", [id])? > 0;
        if removed {
            info!(id, "course deleted");
        }
        Ok(removed)
    }

    pub fn get(&self, id: i64) -> Result<Option<CourseSession>, ScheduleError> {
        let db = self.conn()?;
        fetch_one(&db, id)
    }

    pub fn list(&self) -> Result<Vec<CourseSession>, ScheduleError> {
        let db = self.conn()?;
        let mut sessions = query_sessions(&db, &format!("SELECT {COLUMNS} FROM courses"), [])?;
        sort_chronologically(&mut sessions);
        Ok(sessions)
    }

    pub fn sessions_on(
        &self,
        day: Weekday,
        exclude_id: Option<i64>,
    ) -> Result<Vec<CourseSession>, ScheduleError> {
        let db = self.conn()?;
        sessions_on_day(&db, day, exclude_id)
    }
}

fn query_sessions<P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
) -> Result<Vec<CourseSession>, ScheduleError> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, CourseRow::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    rows.into_iter().map(CourseRow::into_session).collect()
}

fn fetch_one(conn: &Connection, id: i64) -> Result<Option<CourseSession>, ScheduleError> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM courses WHERE id = ?1"),
        [id],
        CourseRow::from_row,
    )
    .optional()?
    .map(CourseRow::into_session)
    .transpose()
}

fn sessions_on_day(
    conn: &Connection,
    day: Weekday,
    exclude_id: Option<i64>,
) -> Result<Vec<CourseSession>, ScheduleError> {
    let mut sessions = query_sessions(
        conn,
        &format!("SELECT {COLUMNS} FROM courses WHERE day_of_week = ?1 AND (?2 IS NULL OR id != ?2)"),
        params![day, exclude_id],
    )?;
    sort_chronologically(&mut sessions);
    Ok(sessions)
}

fn ensure_no_conflict(
    conn: &Connection,
    exclude_id: Option<i64>,
    course: &NewCourse,
) -> Result<(), ScheduleError> {
    let same_day = sessions_on_day(conn, course.day_of_week, exclude_id)?;
    let Some(blocking) = find_conflict(
        &same_day,
        exclude_id,
        course.day_of_week,
        course.start_time,
        course.end_time,
    ) else {
        return Ok(());
    };

    warn!(
        day = course.day_of_week.number(),
        start = %course.start_time,
        end = %course.end_time,
        blocking_id = blocking.id,
        "rejected overlapping course"
    );
    Err(ScheduleError::Conflict(format!(
        "{} {}-{} overlaps '{}' ({}-{})",
        course.day_of_week,
        course.start_time,
        course.end_time,
        blocking.course_name,
        blocking.start_time,
        blocking.end_time
    )))
}
