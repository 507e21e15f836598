//! Channel directory loader
//!
//! Reads the channels file and derives the normalized [`ChannelSet`] and
//! the EPG source list. Load failures are never fatal: a missing or
//! malformed file yields an empty directory and the default source list,
//! with a diagnostic in the logs.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::config::ProxyConfig;
use crate::errors::AppResult;
use crate::models::{ChannelEntry, ChannelRecord, ChannelSet, ChannelsFile};

/// EPG sources used when the channels file is missing, malformed, or does
/// not configure any.
pub const DEFAULT_EPG_SOURCES: [&str; 11] = [
    "https://m3u4u.com/epg/jq2zy9epr3bwxmgwyxr5",
    "https://m3u4u.com/epg/3wk1y24kx7uzdevxygz7",
    "https://m3u4u.com/epg/782dyqdrqkh1xegen4zp",
    "https://www.open-epg.com/files/brazil1.xml.gz",
    "https://www.open-epg.com/files/brazil2.xml.gz",
    "https://www.open-epg.com/files/brazil3.xml.gz",
    "https://www.open-epg.com/files/brazil4.xml.gz",
    "https://www.open-epg.com/files/portugal1.xml.gz",
    "https://www.open-epg.com/files/portugal2.xml.gz",
    "https://epgshare01.online/epgshare01/epg_ripper_BR1.xml.gz",
    "https://epgshare01.online/epgshare01/epg_ripper_PT1.xml.gz",
];

pub struct ChannelDirectory {
    path: PathBuf,
}

impl ChannelDirectory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> AppResult<ChannelsFile> {
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Raw channel records, in file order. Empty on any load failure.
    pub fn load_records(&self) -> Vec<ChannelRecord> {
        match self.read_file() {
            Ok(file) => file.channels,
            Err(e) => {
                warn!(
                    "Failed to load channels from {}: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    /// Ordered EPG source URLs. Falls back to [`DEFAULT_EPG_SOURCES`] when
    /// the file cannot be loaded or configures no sources.
    pub fn load_epg_sources(&self) -> Vec<String> {
        let configured = match self.read_file() {
            Ok(file) => file.metadata.epg_sources,
            Err(e) => {
                warn!(
                    "Failed to load EPG sources from {}: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        };

        if configured.is_empty() {
            DEFAULT_EPG_SOURCES.iter().map(|s| s.to_string()).collect()
        } else {
            configured
        }
    }

    /// Normalized channel set with proxy-rewritten stream URLs. Records
    /// without an id are skipped; they cannot be addressed by the proxy or
    /// by guide feeds.
    pub fn channel_set(&self, proxy: &ProxyConfig) -> ChannelSet {
        let mut set = ChannelSet::new();

        for record in self.load_records() {
            if record.id.is_empty() {
                continue;
            }

            let stream = proxy.stream_url_for(&record.id, &record.url);
            set.insert(ChannelEntry {
                name: record.display_name().to_string(),
                group: record.group_title.clone().unwrap_or_default(),
                logo: record.tvg_logo.clone().unwrap_or_default(),
                stream,
                tvg_id: record.tvg_id.clone().unwrap_or_default(),
                original_url: record.url.clone(),
                id: record.id,
            });
        }

        set
    }
}
