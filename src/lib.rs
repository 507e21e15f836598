//! IPTV Gateway library
//!
//! Serves a channel directory sourced from a local JSON file as M3U
//! playlists and a combined XMLTV guide aggregated from remote EPG feeds.
//! The binary in `main.rs` wires configuration and the web server; the
//! modules here hold everything else so integration tests can exercise the
//! same code paths.

pub mod config;
pub mod directory;
pub mod epg;
pub mod errors;
pub mod models;
pub mod playlist;
pub mod utils;
pub mod web;
