/// Internal database identifier type (bigserial).
pub type DbId = i64;

/// UTC timestamp type used across the workspace.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
