use thiserror::Error;

/// Failures on the visualization path that are not "no data".
///
/// A missing zone record is reported as `Ok(None)` by the store and never
/// shows up here.
#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("zone store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("invalid zone payload for activity {activity_id}: {source}")]
    Payload {
        activity_id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("chart encoding failed: {0}")]
    Render(#[from] image::ImageError),

    #[error("visualization task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
