use crate::page::ElementKind;

pub type RecorderResult<T> = Result<T, RecorderError>;

/// Shown to the viewer when the widget cannot be mounted.
pub const INIT_FAILURE_MESSAGE: &str = "Error: The simulation could not be initialized. Please ensure all page elements are loaded correctly.";

#[derive(thiserror::Error, Debug)]
pub enum RecorderError {
    #[error("initialization failed: missing element(s): {}", list_elements(.0))]
    MissingElements(Vec<ElementKind>),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RecorderError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Text suitable for showing on the page instead of the widget.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingElements(_) => INIT_FAILURE_MESSAGE.to_owned(),
            other => format!("Error: {other}"),
        }
    }
}

fn list_elements(kinds: &[ElementKind]) -> String {
    kinds
        .iter()
        .map(|k| k.id())
        .collect::<Vec<_>>()
        .join(", ")
}
