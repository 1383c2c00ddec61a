/// Group domain type
use serde::{Deserialize, Serialize};

/// Named folder of tracks in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Unique group identifier, referenced by `Track::group_id`
    pub id: String,

    /// Display name
    pub name: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Optional cover image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,

    /// Whether the group starts expanded in list views
    #[serde(default)]
    pub expanded: bool,
}

impl Group {
    /// Create a collapsed group without description or cover
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            cover: None,
            expanded: false,
        }
    }
}
