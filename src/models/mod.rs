//! Data models for channels and the channel directory file

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Raw channel record as it appears in the channels file.
///
/// Field names follow the M3U attribute vocabulary (`tvg-name`,
/// `group-title`, ...) so the file round-trips through `/channels.json`
/// unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "tvg-name", default, skip_serializing_if = "Option::is_none")]
    pub tvg_name: Option<String>,
    #[serde(rename = "group-title", default, skip_serializing_if = "Option::is_none")]
    pub group_title: Option<String>,
    #[serde(rename = "tvg-logo", default, skip_serializing_if = "Option::is_none")]
    pub tvg_logo: Option<String>,
    #[serde(rename = "tvg-id", default, skip_serializing_if = "Option::is_none")]
    pub tvg_id: Option<String>,
}

impl ChannelRecord {
    /// Display name: `tvg-name` wins over `name`, empty when neither is set.
    pub fn display_name(&self) -> &str {
        self.tvg_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("")
    }
}

/// Normalized channel entry derived from a [`ChannelRecord`].
///
/// `stream` is the proxy-rewritten URL when a proxy base is configured,
/// otherwise the original URL. Rebuilt fresh on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelEntry {
    pub id: String,
    pub name: String,
    pub group: String,
    pub logo: String,
    pub stream: String,
    pub tvg_id: String,
    pub original_url: String,
}

impl ChannelEntry {
    /// Identifier used when emitting guide XML for this channel: the guide
    /// id (`tvg-id`) when present, the channel id otherwise.
    pub fn guide_id(&self) -> &str {
        if self.tvg_id.is_empty() {
            &self.id
        } else {
            &self.tvg_id
        }
    }
}

/// Channel id -> entry mapping preserving file order.
///
/// Duplicate ids replace the earlier entry in place, matching the
/// JSON-object semantics of the source file. Iteration order is the order
/// entries first appeared, which is what the playlist and placeholder
/// renderers emit in.
#[derive(Debug, Clone, Default)]
pub struct ChannelSet {
    entries: Vec<ChannelEntry>,
}

impl ChannelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: ChannelEntry) {
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, id: &str) -> Option<&ChannelEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChannelEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Guide identifiers referenced by this set. Entries with an empty
    /// `tvg-id` contribute nothing: they can never match a feed line.
    pub fn guide_ids(&self) -> HashSet<&str> {
        self.entries
            .iter()
            .filter(|e| !e.tvg_id.is_empty())
            .map(|e| e.tvg_id.as_str())
            .collect()
    }
}

/// Document root of the channels file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelsFile {
    #[serde(default)]
    pub channels: Vec<ChannelRecord>,
    #[serde(default)]
    pub metadata: ChannelsMetadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChannelsMetadata {
    #[serde(default)]
    pub epg_sources: Vec<String>,
}
