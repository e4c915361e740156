//! Talk entity and identifier

use serde::{Deserialize, Serialize};

/// Zero-based talk identifier, dense over the loaded dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TalkId(u32);

impl TalkId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl From<u32> for TalkId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TalkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A conference talk that can be scored against other talks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Talk {
    id: TalkId,
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl Talk {
    pub fn new(id: impl Into<TalkId>, title: impl Into<String>, text: Option<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text,
        }
    }

    pub fn id(&self) -> TalkId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Description used for scoring; an absent description scores as empty
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}
