//! EPG source fetching and line-oriented filtering

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::errors::SourceError;
use crate::models::ChannelSet;
use crate::utils::decompress_gzip_text;

use super::placeholder::synthesize_placeholder;
use super::XML_DECLARATION;

/// Timeout applied to each source fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Fetches the configured EPG sources and combines them into one filtered
/// guide document.
pub struct EpgAggregator {
    client: Client,
    sources: Vec<String>,
}

impl EpgAggregator {
    pub fn new(sources: Vec<String>) -> Self {
        let client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(concat!("iptv-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, sources }
    }

    /// Produce the combined guide for the given channel set.
    ///
    /// Sources are fetched one at a time, in list order; a failing source is
    /// logged and skipped. When no source produced a payload the placeholder
    /// guide is returned instead, so the result is always a well-formed
    /// document.
    pub async fn generate(&self, channels: &ChannelSet) -> String {
        let payloads = self.fetch_sources().await;

        if payloads.is_empty() {
            info!("No EPG source produced data, synthesizing placeholder guide");
            return synthesize_placeholder(channels);
        }

        combine_and_filter(&payloads, channels)
    }

    async fn fetch_sources(&self) -> Vec<String> {
        let mut payloads = Vec::new();

        for url in &self.sources {
            debug!("Fetching EPG source: {}", url);
            match self.fetch_source(url).await {
                Ok(text) => {
                    debug!("Fetched {} characters from {}", text.len(), url);
                    payloads.push(text);
                }
                Err(e) => warn!("Skipping EPG source: {}", e),
            }
        }

        payloads
    }

    async fn fetch_source(&self, url: &str) -> Result<String, SourceError> {
        let request_error = |e: reqwest::Error| SourceError::Request {
            url: url.to_string(),
            message: e.to_string(),
        };

        let response = self.client.get(url).send().await.map_err(request_error)?;

        if !response.status().is_success() {
            return Err(SourceError::Status {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        // Compressed feeds are identified by suffix convention.
        if url.ends_with(".gz") {
            let bytes = response.bytes().await.map_err(request_error)?;
            decompress_gzip_text(&bytes).map_err(|e| SourceError::Decompress {
                url: url.to_string(),
                message: e.to_string(),
            })
        } else {
            response.text().await.map_err(request_error)
        }
    }
}

/// Merge raw feed payloads into a single guide, keeping only the
/// `<channel>` and `<programme>` lines that reference a known guide id.
///
/// The scan is deliberately line-oriented, not an XML parse: the known feed
/// sources emit one construct per physical line, and matching is a literal
/// substring test on `id="..."` / `channel="..."`. Two consequences are part
/// of the contract: multi-line tags silently lose data, and a guide id whose
/// quoted form appears inside another attribute value can false-match.
/// Duplicate declarations across sources are all kept.
pub fn combine_and_filter(payloads: &[String], channels: &ChannelSet) -> String {
    let guide_ids = channels.guide_ids();
    let channel_needles: Vec<String> = guide_ids.iter().map(|id| format!(r#"id="{id}""#)).collect();
    let programme_needles: Vec<String> = guide_ids
        .iter()
        .map(|id| format!(r#"channel="{id}""#))
        .collect();

    let mut combined = vec![XML_DECLARATION.to_string(), "<tv>".to_string()];

    for payload in payloads {
        let mut in_tv = false;

        for line in payload.lines() {
            let line = line.trim();

            // Only the top-level <tv> span carries declarations; the span
            // markers themselves are dropped along with everything outside.
            if line.contains("<tv>") {
                in_tv = true;
                continue;
            }
            if line.contains("</tv>") {
                in_tv = false;
                continue;
            }
            if !in_tv {
                continue;
            }

            if line.contains(r#"<channel id=""#) {
                if channel_needles.iter().any(|n| line.contains(n.as_str())) {
                    combined.push(line.to_string());
                }
            } else if line.contains("<programme")
                && programme_needles.iter().any(|n| line.contains(n.as_str()))
            {
                combined.push(line.to_string());
            }
        }
    }

    combined.push("</tv>".to_string());
    combined.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChannelEntry;

    fn channel_set(tvg_ids: &[&str]) -> ChannelSet {
        let mut set = ChannelSet::new();
        for (i, tvg_id) in tvg_ids.iter().enumerate() {
            set.insert(ChannelEntry {
                id: format!("ch{i}"),
                name: format!("Channel {i}"),
                group: String::new(),
                logo: String::new(),
                stream: String::new(),
                tvg_id: tvg_id.to_string(),
                original_url: String::new(),
            });
        }
        set
    }

    #[test]
    fn test_single_payload_exact_output() {
        let payload = concat!(
            "<tv>\n",
            "<channel id=\"abc\"/>\n",
            "<programme channel=\"abc\"><title>X</title></programme>\n",
            "</tv>"
        )
        .to_string();

        let combined = combine_and_filter(&[payload], &channel_set(&["abc"]));
        assert_eq!(
            combined,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <tv>\n\
             <channel id=\"abc\"/>\n\
             <programme channel=\"abc\"><title>X</title></programme>\n\
             </tv>"
        );
    }

    #[test]
    fn test_unknown_ids_and_other_elements_are_dropped() {
        let payload = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<tv>\n",
            "<channel id=\"abc\">\n",
            "<display-name>ABC</display-name>\n",
            "</channel>\n",
            "<channel id=\"zzz\">\n",
            "<display-name>ZZZ</display-name>\n",
            "</channel>\n",
            "<programme channel=\"abc\"><title>Kept</title></programme>\n",
            "<programme channel=\"zzz\"><title>Dropped</title></programme>\n",
            "</tv>"
        )
        .to_string();

        let combined = combine_and_filter(&[payload], &channel_set(&["abc"]));

        // Known-id declarations survive; closing tags, sub-elements, the
        // XML declaration of the payload and the unknown channel do not.
        assert!(combined.contains("<channel id=\"abc\">"));
        assert!(combined.contains("<programme channel=\"abc\"><title>Kept</title></programme>"));
        assert!(!combined.contains("zzz"));
        assert!(!combined.contains("display-name"));
        assert!(!combined.contains("</channel>"));
        assert_eq!(combined.matches("<?xml").count(), 1);
    }

    #[test]
    fn test_lines_outside_tv_span_are_ignored() {
        let payload = concat!(
            "<channel id=\"abc\"/>\n",
            "<tv>\n",
            "<channel id=\"abc\"/>\n",
            "</tv>\n",
            "<programme channel=\"abc\"><title>After</title></programme>"
        )
        .to_string();

        let combined = combine_and_filter(&[payload], &channel_set(&["abc"]));
        assert_eq!(combined.matches("<channel id=\"abc\"/>").count(), 1);
        assert!(!combined.contains("After"));
    }

    #[test]
    fn test_duplicates_across_sources_are_not_deduplicated() {
        let source = concat!(
            "<tv>\n",
            "<channel id=\"bbc1\"/>\n",
            "<programme channel=\"bbc1\"><title>News</title></programme>\n",
            "</tv>"
        )
        .to_string();

        let combined =
            combine_and_filter(&[source.clone(), source], &channel_set(&["bbc1"]));

        assert_eq!(combined.matches("<channel id=\"bbc1\"/>").count(), 2);
        assert_eq!(combined.matches("<title>News</title>").count(), 2);
        assert_eq!(combined.matches("<tv>").count(), 1);
        assert_eq!(combined.matches("</tv>").count(), 1);
    }

    #[test]
    fn test_every_kept_programme_references_a_known_id() {
        let payload = concat!(
            "<tv>\n",
            "<programme channel=\"abc\"><title>A</title></programme>\n",
            "<programme channel=\"def\"><title>B</title></programme>\n",
            "<programme channel=\"ghi\"><title>C</title></programme>\n",
            "</tv>"
        )
        .to_string();

        let set = channel_set(&["abc", "ghi"]);
        let combined = combine_and_filter(&[payload], &set);

        let guide_ids = set.guide_ids();
        for line in combined.lines().filter(|l| l.contains("<programme")) {
            assert!(guide_ids
                .iter()
                .any(|id| line.contains(&format!("channel=\"{id}\""))));
        }
        assert!(!combined.contains("def"));
    }

    #[test]
    fn test_empty_guide_id_never_matches() {
        let payload = concat!(
            "<tv>\n",
            "<channel id=\"abc\"/>\n",
            "</tv>"
        )
        .to_string();

        // One entry with an empty tvg-id: the filter set is empty, so
        // nothing survives.
        let combined = combine_and_filter(&[payload], &channel_set(&[""]));
        assert_eq!(
            combined,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<tv>\n</tv>"
        );
    }

    #[tokio::test]
    async fn test_all_sources_failing_falls_back_to_placeholder() {
        // Nothing listens on port 1; both fetches fail fast.
        let aggregator = EpgAggregator::new(vec![
            "http://127.0.0.1:1/guide1.xml".to_string(),
            "http://127.0.0.1:1/guide2.xml.gz".to_string(),
        ]);
        let set = channel_set(&["bbc1.uk"]);

        let guide = aggregator.generate(&set).await;
        assert_eq!(guide, synthesize_placeholder(&set));
    }

    #[tokio::test]
    async fn test_empty_source_list_falls_back_to_placeholder() {
        let aggregator = EpgAggregator::new(Vec::new());
        let set = channel_set(&["bbc1.uk"]);

        let guide = aggregator.generate(&set).await;
        assert_eq!(guide, synthesize_placeholder(&set));
    }
}
