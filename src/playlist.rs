//! M3U playlist rendering
//!
//! Pure string templating over the channel directory. The proxied variant
//! renders from the normalized [`ChannelSet`] (stream URLs already
//! rewritten); the raw variant renders straight from the unprocessed
//! records, bypassing proxy substitution.

use crate::models::{ChannelRecord, ChannelSet};

/// Render the proxied playlist. The header advertises the EPG source list
/// via `url-tvg` so players know where the matching guide data lives.
pub fn render_playlist(channels: &ChannelSet, epg_sources: &[String]) -> String {
    let mut m3u = if epg_sources.is_empty() {
        "#EXTM3U\n".to_string()
    } else {
        format!("#EXTM3U url-tvg=\"{}\"\n", epg_sources.join(", "))
    };

    for entry in channels.iter() {
        m3u.push_str(&format!(
            "#EXTINF:-1 tvg-id=\"{}\" tvg-name=\"{}\" tvg-logo=\"{}\" group-title=\"{}\",{}\n{}\n",
            entry.tvg_id, entry.name, entry.logo, entry.group, entry.name, entry.stream
        ));
    }

    m3u
}

/// Render the raw playlist from unprocessed records with original URLs.
pub fn render_playlist_raw(records: &[ChannelRecord]) -> String {
    let mut m3u = "#EXTM3U\n".to_string();

    for record in records {
        m3u.push_str(&format!(
            "#EXTINF:-1 tvg-id=\"{}\" tvg-name=\"{}\" tvg-logo=\"{}\" group-title=\"{}\",{}\n{}\n",
            record.tvg_id.as_deref().unwrap_or(""),
            record.display_name(),
            record.tvg_logo.as_deref().unwrap_or(""),
            record.group_title.as_deref().unwrap_or(""),
            record.name.as_deref().unwrap_or(""),
            record.url
        ));
    }

    m3u
}
