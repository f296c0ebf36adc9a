//! Exercise service
//!
//! Validates and records exercises for a user, and builds the filtered,
//! limited exercise log. Dates are rendered in the fixed human-readable
//! format `Fri Mar 15 2024` (weekday, month, day, year — no time component).

use crate::clock::Clock;
use crate::error::AppError;
use crate::store::{Exercise, ExerciseStore, LogFilter};
use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Rendering format for all dates returned to clients
const DATE_DISPLAY_FORMAT: &str = "%a %b %d %Y";

/// Raw input for logging an exercise
///
/// All fields are optional at this level; validation happens in the service
/// so that a missing field surfaces as a 400 rather than a deserialization
/// rejection.
#[derive(Debug, Default)]
pub struct NewExercise {
    /// What was done
    pub description: Option<String>,
    /// Duration in minutes, unparsed (arrives as number or numeric string)
    pub duration: Option<String>,
    /// Calendar date as a string; today when absent or empty
    pub date: Option<String>,
}

/// Raw query parameters for reading back a log
#[derive(Debug, Default)]
pub struct LogQuery {
    /// Inclusive lower date bound
    pub from: Option<String>,
    /// Inclusive upper date bound
    pub to: Option<String>,
    /// Maximum number of entries to return
    pub limit: Option<String>,
}

/// Response to a successfully logged exercise
#[derive(Debug, Serialize)]
pub struct LoggedExercise {
    /// The owning user's id
    pub id: String,
    /// The owning user's username
    pub username: String,
    /// What was done
    pub description: String,
    /// Duration in minutes
    pub duration: i64,
    /// Date in the fixed display format
    pub date: String,
}

/// A single entry in a user's exercise log (no identifier field)
#[derive(Debug, Serialize)]
pub struct LogEntry {
    /// What was done
    pub description: String,
    /// Duration in minutes
    pub duration: i64,
    /// Date in the fixed display format
    pub date: String,
}

/// A user's filtered exercise log
#[derive(Debug, Serialize)]
pub struct ExerciseLog {
    /// The user's id
    pub id: String,
    /// The user's username
    pub username: String,
    /// Number of entries in `log`
    pub count: usize,
    /// The entries, ascending by date
    pub log: Vec<LogEntry>,
}

/// Exercise recording and log retrieval over an injected store and clock
pub struct ExerciseService {
    store: Arc<dyn ExerciseStore>,
    clock: Arc<dyn Clock>,
}

impl ExerciseService {
    /// Create a service backed by `store`, using `clock` for default dates
    pub fn new(store: Arc<dyn ExerciseStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Record an exercise against an existing user
    ///
    /// Fails with `NotFound` when the user does not exist and `Validation`
    /// when a required field is missing or malformed.
    pub async fn log_exercise(
        &self,
        user_id: &str,
        input: NewExercise,
    ) -> Result<LoggedExercise, AppError> {
        let user = self
            .store
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let description = input
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| AppError::Validation("Description is required".to_string()))?
            .to_string();

        let duration = input
            .duration
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| AppError::Validation("Duration is required".to_string()))?
            .parse::<i64>()
            .map_err(|_| AppError::Validation("Duration must be an integer".to_string()))?;

        let date = match input.date.as_deref().map(str::trim) {
            None | Some("") => self.clock.today(),
            Some(raw) => parse_date(raw)
                .ok_or_else(|| AppError::Validation("Invalid date format".to_string()))?,
        };

        let exercise = Exercise::new(user.id.clone(), description, duration, date);
        self.store.insert_exercise(&exercise).await?;

        debug!(
            user_id = %user.id,
            exercise_id = %exercise.id,
            date = %exercise.date,
            "Logged exercise"
        );

        Ok(LoggedExercise {
            id: user.id,
            username: user.username,
            description: exercise.description,
            duration: exercise.duration,
            date: format_date(exercise.date),
        })
    }

    /// Read back a user's exercise log, optionally date-filtered and limited
    ///
    /// `from`/`to` are inclusive bounds; entries come back ascending by date
    /// and `limit` keeps the earliest N. Unparseable filter values are
    /// rejected with `Validation` rather than silently ignored.
    pub async fn get_log(&self, user_id: &str, query: LogQuery) -> Result<ExerciseLog, AppError> {
        let user = self
            .store
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let filter = LogFilter {
            from: parse_bound(query.from.as_deref(), "from")?,
            to: parse_bound(query.to.as_deref(), "to")?,
            limit: parse_limit(query.limit.as_deref())?,
        };

        let exercises = self.store.find_exercises(&user.id, &filter).await?;

        let log: Vec<LogEntry> = exercises
            .into_iter()
            .map(|e| LogEntry {
                description: e.description,
                duration: e.duration,
                date: format_date(e.date),
            })
            .collect();

        Ok(ExerciseLog {
            id: user.id,
            username: user.username,
            count: log.len(),
            log,
        })
    }
}

/// Parse a calendar date from client input
///
/// Accepts ISO `YYYY-MM-DD`; an RFC 3339 timestamp is accepted too, with the
/// time-of-day discarded.
fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

fn parse_bound(value: Option<&str>, name: &str) -> Result<Option<NaiveDate>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_date(raw)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("Invalid '{}' date", name))),
    }
}

fn parse_limit(value: Option<&str>) -> Result<Option<i64>, AppError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => match raw.parse::<i64>() {
            Ok(limit) if limit > 0 => Ok(Some(limit)),
            _ => Err(AppError::Validation(
                "Limit must be a positive integer".to_string(),
            )),
        },
    }
}

/// Render a date in the fixed display format, e.g. `Fri Mar 15 2024`
fn format_date(date: NaiveDate) -> String {
    date.format(DATE_DISPLAY_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::{MemoryStore, User};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    async fn create_test_service(today: &str) -> (ExerciseService, Arc<MemoryStore>, User) {
        let store = Arc::new(MemoryStore::new());
        let user = User::new("alice".to_string());
        store.insert_user(&user).await.unwrap();
        let service = ExerciseService::new(store.clone(), Arc::new(FixedClock(date(today))));
        (service, store, user)
    }

    fn exercise_input(description: &str, duration: &str, date: Option<&str>) -> NewExercise {
        NewExercise {
            description: Some(description.to_string()),
            duration: Some(duration.to_string()),
            date: date.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_log_exercise_unknown_user_writes_nothing() {
        let (service, store, _user) = create_test_service("2024-03-15").await;
        let result = service
            .log_exercise("nonexistent", exercise_input("run", "30", None))
            .await;
        match result.unwrap_err() {
            AppError::NotFound(_) => {}
            other => panic!("Expected NotFound error, got: {:?}", other),
        }

        // No exercise was written for any user
        let all = store
            .find_exercises("nonexistent", &LogFilter::default())
            .await
            .unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_log_exercise_missing_description() {
        let (service, _store, user) = create_test_service("2024-03-15").await;
        let input = NewExercise {
            description: None,
            duration: Some("30".to_string()),
            date: None,
        };
        let result = service.log_exercise(&user.id, input).await;
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_log_exercise_invalid_duration() {
        let (service, _store, user) = create_test_service("2024-03-15").await;
        for bad in ["", "abc", "12.5"] {
            let result = service
                .log_exercise(&user.id, exercise_input("run", bad, None))
                .await;
            assert!(
                matches!(result.unwrap_err(), AppError::Validation(_)),
                "duration {:?} should be rejected",
                bad
            );
        }
    }

    #[tokio::test]
    async fn test_log_exercise_invalid_date() {
        let (service, _store, user) = create_test_service("2024-03-15").await;
        let result = service
            .log_exercise(&user.id, exercise_input("run", "30", Some("not-a-date")))
            .await;
        assert!(matches!(result.unwrap_err(), AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_log_exercise_defaults_to_today() {
        let (service, store, user) = create_test_service("2024-03-15").await;
        let logged = service
            .log_exercise(&user.id, exercise_input("run", "30", None))
            .await
            .unwrap();
        assert_eq!(logged.date, "Fri Mar 15 2024");

        let stored = store
            .find_exercises(&user.id, &LogFilter::default())
            .await
            .unwrap();
        assert_eq!(stored[0].date, date("2024-03-15"));
    }

    #[tokio::test]
    async fn test_log_exercise_empty_date_defaults_to_today() {
        let (service, _store, user) = create_test_service("2024-06-01").await;
        let logged = service
            .log_exercise(&user.id, exercise_input("run", "30", Some("")))
            .await
            .unwrap();
        assert_eq!(logged.date, "Sat Jun 01 2024");
    }

    #[tokio::test]
    async fn test_date_round_trip_rendering() {
        let (service, _store, user) = create_test_service("2024-01-01").await;
        let logged = service
            .log_exercise(&user.id, exercise_input("run", "30", Some("2024-03-15")))
            .await
            .unwrap();
        assert_eq!(logged.date, "Fri Mar 15 2024");
        assert_eq!(logged.username, "alice");
        assert_eq!(logged.id, user.id);
        assert_eq!(logged.duration, 30);

        let log = service.get_log(&user.id, LogQuery::default()).await.unwrap();
        assert_eq!(log.log[0].date, "Fri Mar 15 2024");
    }

    #[tokio::test]
    async fn test_get_log_unknown_user() {
        let (service, _store, _user) = create_test_service("2024-03-15").await;
        let result = service.get_log("nonexistent", LogQuery::default()).await;
        assert!(matches!(result.unwrap_err(), AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_log_no_filters_returns_all() {
        let (service, _store, user) = create_test_service("2024-03-15").await;
        for d in ["2024-01-10", "2024-02-10", "2024-03-10"] {
            service
                .log_exercise(&user.id, exercise_input("run", "30", Some(d)))
                .await
                .unwrap();
        }

        let log = service.get_log(&user.id, LogQuery::default()).await.unwrap();
        assert_eq!(log.count, 3);
        assert_eq!(log.count, log.log.len());
    }

    #[tokio::test]
    async fn test_get_log_inclusive_date_range() {
        let (service, _store, user) = create_test_service("2024-03-15").await;
        for d in [
            "2023-12-31",
            "2024-01-01",
            "2024-01-15",
            "2024-01-31",
            "2024-02-01",
        ] {
            service
                .log_exercise(&user.id, exercise_input("run", "30", Some(d)))
                .await
                .unwrap();
        }

        let query = LogQuery {
            from: Some("2024-01-01".to_string()),
            to: Some("2024-01-31".to_string()),
            limit: None,
        };
        let log = service.get_log(&user.id, query).await.unwrap();
        assert_eq!(log.count, 3);
        assert_eq!(log.log.first().unwrap().date, "Mon Jan 01 2024");
        assert_eq!(log.log.last().unwrap().date, "Wed Jan 31 2024");
    }

    #[tokio::test]
    async fn test_get_log_limit_keeps_earliest() {
        let (service, _store, user) = create_test_service("2024-03-15").await;
        for d in [
            "2024-01-05",
            "2024-01-01",
            "2024-01-04",
            "2024-01-02",
            "2024-01-03",
        ] {
            service
                .log_exercise(&user.id, exercise_input("run", "30", Some(d)))
                .await
                .unwrap();
        }

        let query = LogQuery {
            limit: Some("2".to_string()),
            ..LogQuery::default()
        };
        let log = service.get_log(&user.id, query).await.unwrap();
        assert_eq!(log.count, 2);
        assert_eq!(log.log[0].date, "Mon Jan 01 2024");
        assert_eq!(log.log[1].date, "Tue Jan 02 2024");
    }

    #[tokio::test]
    async fn test_get_log_rejects_invalid_filters() {
        let (service, _store, user) = create_test_service("2024-03-15").await;

        let query = LogQuery {
            from: Some("not-a-date".to_string()),
            ..LogQuery::default()
        };
        assert!(matches!(
            service.get_log(&user.id, query).await.unwrap_err(),
            AppError::Validation(_)
        ));

        for bad_limit in ["0", "-1", "abc"] {
            let query = LogQuery {
                limit: Some(bad_limit.to_string()),
                ..LogQuery::default()
            };
            assert!(
                matches!(
                    service.get_log(&user.id, query).await.unwrap_err(),
                    AppError::Validation(_)
                ),
                "limit {:?} should be rejected",
                bad_limit
            );
        }
    }

    #[test]
    fn test_parse_date_accepts_rfc3339() {
        assert_eq!(
            parse_date("2024-03-15T10:30:00Z"),
            Some(date("2024-03-15"))
        );
        assert_eq!(parse_date("2024-03-15"), Some(date("2024-03-15")));
        assert_eq!(parse_date("15/03/2024"), None);
    }
}
