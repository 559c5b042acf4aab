use serde::{Deserialize, Serialize};

fn default_top_predictions() -> usize {
    5
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Colorize only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub color: ColorMode,
    /// How many alternative classes to list under a result, 0 hides them
    #[serde(default = "default_top_predictions")]
    pub top_predictions: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::default(),
            top_predictions: default_top_predictions(),
        }
    }
}
