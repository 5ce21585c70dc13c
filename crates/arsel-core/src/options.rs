use arsel_model::ListMode;
use serde::{Deserialize, Serialize};

/// Behaviour switches for a selection session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    /// Force aliases to `[A-Za-z0-9_]` by replacing other characters with `_`.
    pub strict_names: bool,
    /// Starting mode. `None` picks short mode whenever the mask restricts
    /// the catalog, full mode otherwise.
    pub mode: Option<ListMode>,
}

impl SessionOptions {
    #[must_use]
    pub fn with_strict_names(mut self, enable: bool) -> Self {
        self.strict_names = enable;
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: Option<ListMode>) -> Self {
        self.mode = mode;
        self
    }
}
