/// Catalog of tracks and groups
use crate::error::{AriaError, Result};
use crate::types::{Group, Track};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Static list of tracks plus the named groups they belong to
///
/// Tracks whose `group_id` is missing, or names a group that is not
/// declared here, are treated as ungrouped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Declared groups, in display order
    #[serde(default)]
    pub groups: Vec<Group>,

    /// Every track, in catalog order
    #[serde(default)]
    pub songs: Vec<Track>,
}

/// A group together with its tracks, as shown in a list view
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSection<'a> {
    /// The group, or `None` for the ungrouped section
    pub group: Option<&'a Group>,

    /// Tracks of the section, in catalog order
    pub songs: Vec<&'a Track>,
}

impl Catalog {
    /// Create a catalog from groups and tracks
    pub fn new(groups: Vec<Group>, songs: Vec<Track>) -> Self {
        Self { groups, songs }
    }

    /// Parse a catalog from its JSON form
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a catalog from a JSON reader
    pub fn from_json_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Load a catalog file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_json_reader(BufReader::new(file))
    }

    /// Check that track and group identifiers are unique
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for track in &self.songs {
            if !seen.insert(track.id.as_str()) {
                return Err(AriaError::catalog(format!("duplicate track id {}", track.id)));
            }
        }

        let mut seen = HashSet::new();
        for group in &self.groups {
            if !seen.insert(group.id.as_str()) {
                return Err(AriaError::catalog(format!("duplicate group id {}", group.id)));
            }
        }

        Ok(())
    }

    /// Look up a declared group
    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Tracks belonging to `group_id`
    pub fn group_songs(&self, group_id: &str) -> Vec<&Track> {
        self.songs
            .iter()
            .filter(|t| t.group_id.as_deref() == Some(group_id))
            .collect()
    }

    /// Tracks without a group, or whose group is not declared
    pub fn ungrouped_songs(&self) -> Vec<&Track> {
        let known = self.known_group_ids();
        self.songs
            .iter()
            .filter(|t| match t.group_id.as_deref() {
                Some(id) => !known.contains(id),
                None => true,
            })
            .collect()
    }

    /// Every declared group with its tracks, then the ungrouped section
    ///
    /// Empty groups are kept so list views can still render them. The
    /// ungrouped section is only present when it has tracks.
    pub fn sections(&self) -> Vec<CatalogSection<'_>> {
        let mut sections: Vec<CatalogSection<'_>> = self
            .groups
            .iter()
            .map(|group| CatalogSection {
                group: Some(group),
                songs: self.group_songs(&group.id),
            })
            .collect();

        let ungrouped = self.ungrouped_songs();
        if !ungrouped.is_empty() {
            sections.push(CatalogSection {
                group: None,
                songs: ungrouped,
            });
        }

        sections
    }

    /// Owned copy of every track, ready to become a playback queue
    pub fn to_queue(&self) -> Vec<Track> {
        self.songs.clone()
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Whether the catalog has no tracks
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    fn known_group_ids(&self) -> HashSet<&str> {
        self.groups.iter().map(|g| g.id.as_str()).collect()
    }
}
