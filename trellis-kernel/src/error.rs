//! Render error types.

use thiserror::Error;
use trellis_api::PayloadError;

use crate::hooks::Stage;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    MalformedPayload(#[from] PayloadError),

    #[error("layout root must be a list, found {found}")]
    InvalidLayout { found: &'static str },

    #[error("{stage} hook `{name}` failed: {source}")]
    Hook {
        stage: Stage,
        name: String,
        #[source]
        source: anyhow::Error,
    },
}

impl RenderError {
    pub(crate) fn hook(stage: Stage, name: &str, source: anyhow::Error) -> Self {
        RenderError::Hook {
            stage,
            name: name.to_string(),
            source,
        }
    }
}
