use thiserror::Error;

use crate::domain::{AssessmentId, AttemptError};
use crate::ports::StoreError;

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Attempt(#[from] AttemptError),

    #[error("state store failed for assessment={id}: {source}")]
    Store {
        id: AssessmentId,
        #[source]
        source: StoreError,
    },
}
