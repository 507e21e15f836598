//! EPG aggregation
//!
//! The core of the service: fetches remote XMLTV feeds, decompresses the
//! gzipped ones, and filters the merged content down to the channels known
//! to the directory. When nothing could be fetched a placeholder guide is
//! synthesized locally so the `/epg.xml` route always has a document to
//! serve.

pub mod aggregator;
pub mod placeholder;

pub use aggregator::{combine_and_filter, EpgAggregator};
pub use placeholder::synthesize_placeholder;

pub(crate) const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;
