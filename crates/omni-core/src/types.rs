use serde::{Deserialize, Serialize};

/// Icon hint for a row; the host decides what it looks like.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    #[default]
    None,
    Web,
}

/// One entry of the list handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub title: String,
    pub subtitle: String,
    pub action_value: String,
    pub icon: Icon,
    pub selectable: bool,
}

impl DisplayRow {
    /// Selectable row without an icon.
    pub fn new(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        action_value: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            action_value: action_value.into(),
            icon: Icon::None,
            selectable: true,
        }
    }

    #[must_use]
    pub const fn with_icon(mut self, icon: Icon) -> Self {
        self.icon = icon;
        self
    }

    /// Row the host shows but will not act on.
    #[must_use]
    pub const fn informational(mut self) -> Self {
        self.selectable = false;
        self
    }
}
