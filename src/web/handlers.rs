//! HTTP request handlers

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Json},
};
use serde_json::json;

use crate::directory::ChannelDirectory;
use crate::epg::EpgAggregator;
use crate::playlist;

use super::AppState;

const M3U_CONTENT_TYPE: &str = "audio/x-mpegurl";

pub async fn index() -> Html<&'static str> {
    Html("<h1>IPTV Gateway Online</h1>")
}

/// Proxied playlist: stream URLs rewritten through the configured proxy.
pub async fn playlist(State(state): State<AppState>) -> impl IntoResponse {
    let directory = ChannelDirectory::new(&state.config.channels_file);
    let channels = directory.channel_set(&state.config.proxy);
    let sources = directory.load_epg_sources();

    let body = playlist::render_playlist(&channels, &sources);
    ([(header::CONTENT_TYPE, M3U_CONTENT_TYPE)], body)
}

/// Raw playlist: original stream URLs, no proxy substitution.
pub async fn playlist_raw(State(state): State<AppState>) -> impl IntoResponse {
    let directory = ChannelDirectory::new(&state.config.channels_file);
    let records = directory.load_records();

    let body = playlist::render_playlist_raw(&records);
    ([(header::CONTENT_TYPE, M3U_CONTENT_TYPE)], body)
}

/// Combined guide. Re-fetches every source on each request; total failure
/// degrades to the synthesized placeholder, never to an error response.
pub async fn epg(State(state): State<AppState>) -> impl IntoResponse {
    let directory = ChannelDirectory::new(&state.config.channels_file);
    let channels = directory.channel_set(&state.config.proxy);
    let aggregator = EpgAggregator::new(directory.load_epg_sources());

    let body = aggregator.generate(&channels).await;
    ([(header::CONTENT_TYPE, "application/xml")], body)
}

/// Raw channel records as JSON.
pub async fn channels_json(State(state): State<AppState>) -> impl IntoResponse {
    let directory = ChannelDirectory::new(&state.config.channels_file);
    let records = directory.load_records();

    let body = serde_json::to_string_pretty(&records).unwrap_or_else(|_| "[]".to_string());
    ([(header::CONTENT_TYPE, "application/json")], body)
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let directory = ChannelDirectory::new(&state.config.channels_file);
    let channels = directory.channel_set(&state.config.proxy);

    Json(json!({
        "status": "ok",
        "channels_count": channels.len(),
    }))
}
