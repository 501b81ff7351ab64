/// Primary key of the `employees` and `users` tables (BIGSERIAL).
pub type DbId = i64;

/// Store-maintained timestamps, always UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
