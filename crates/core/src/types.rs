/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Artifact record primary key (random, v4).
pub type ImageId = uuid::Uuid;
