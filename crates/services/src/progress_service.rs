use std::sync::Arc;

use api::ProgressSource;
use lingua_core::model::LearnerProgress;

use crate::error::ProgressError;

/// Reads the learner's overall progress.
#[derive(Clone)]
pub struct ProgressService {
    source: Arc<dyn ProgressSource>,
}

impl ProgressService {
    #[must_use]
    pub fn new(source: Arc<dyn ProgressSource>) -> Self {
        Self { source }
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Api` if the progress report cannot be fetched.
    pub async fn load(&self) -> Result<LearnerProgress, ProgressError> {
        self.source.fetch_progress().await.map_err(|err| {
            log::error!("failed to load progress: {err}");
            ProgressError::from(err)
        })
    }
}
