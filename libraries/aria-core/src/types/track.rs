/// Track domain type
use crate::types::TrackId;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// One playable item of the catalog
///
/// Tracks are produced offline and never mutated by the player. Degraded
/// records (unreadable tags) still carry a usable `url`, with a zero
/// duration and no lyric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Unique track identifier
    pub id: TrackId,

    /// Track title
    pub title: String,

    /// Artist name
    #[serde(default)]
    pub artist: String,

    /// Album name
    #[serde(default)]
    pub album: String,

    /// Cover image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,

    /// Source reference handed to the audio transport
    pub url: String,

    /// Duration in seconds (never negative)
    #[serde(default, deserialize_with = "deserialize_duration")]
    pub duration: f64,

    /// Unsynchronised lyric text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyric: Option<String>,

    /// Owning group, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
}

impl Track {
    /// Create a track with the mandatory fields
    pub fn new(
        id: impl Into<TrackId>,
        title: impl Into<String>,
        url: impl Into<String>,
        duration: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: String::new(),
            album: String::new(),
            cover: None,
            url: url.into(),
            duration: normalize_duration(duration),
            lyric: None,
            group_id: None,
        }
    }

    /// Placeholder record for a file whose metadata could not be read
    ///
    /// The title falls back to the file stem; every other field is empty.
    pub fn placeholder(id: impl Into<TrackId>, file_name: &str, url: impl Into<String>) -> Self {
        let title = Path::new(file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.to_string());
        Self::new(id, title, url, 0.0)
    }

    /// Set the artist
    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = artist.into();
        self
    }

    /// Set the album
    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    /// Set the cover reference
    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        self.cover = Some(cover.into());
        self
    }

    /// Set the lyric text
    pub fn with_lyric(mut self, lyric: impl Into<String>) -> Self {
        self.lyric = Some(lyric.into());
        self
    }

    /// Assign the track to a group
    pub fn with_group(mut self, group_id: impl Into<String>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Lyric text, treating an empty string as absent
    pub fn lyric(&self) -> Option<&str> {
        self.lyric.as_deref().filter(|l| !l.trim().is_empty())
    }
}

fn normalize_duration(duration: f64) -> f64 {
    if duration.is_finite() && duration > 0.0 {
        duration
    } else {
        0.0
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.map_or(0.0, normalize_duration))
}
