//! Placeholder guide synthesizer

use crate::models::ChannelSet;

use super::XML_DECLARATION;

// Fixed window wide enough to cover any plausible "now".
const PLACEHOLDER_START: &str = "20250101000000 +0000";
const PLACEHOLDER_STOP: &str = "20251231235959 +0000";

/// Build the fallback guide used when no remote source produced data.
///
/// Emits one `<channel>` block and one `<programme>` block per entry, in
/// set order, under a single `<tv>` root. Valid even for an empty set.
pub fn synthesize_placeholder(channels: &ChannelSet) -> String {
    let mut guide = vec![XML_DECLARATION.to_string(), "<tv>".to_string()];

    for entry in channels.iter() {
        let guide_id = entry.guide_id();

        guide.push(format!(r#"<channel id="{guide_id}">"#));
        guide.push(format!("<display-name>{}</display-name>", entry.name));
        if !entry.logo.is_empty() {
            guide.push(format!(r#"<icon src="{}"/>"#, entry.logo));
        }
        guide.push("</channel>".to_string());

        guide.push(format!(
            r#"<programme start="{PLACEHOLDER_START}" stop="{PLACEHOLDER_STOP}" channel="{guide_id}">"#
        ));
        guide.push("<title>Programming available</title>".to_string());
        guide.push("<desc>Watch this channel via IPTV</desc>".to_string());
        guide.push("</programme>".to_string());
    }

    guide.push("</tv>".to_string());
    guide.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChannelEntry;

    fn entry(id: &str, tvg_id: &str, logo: &str) -> ChannelEntry {
        ChannelEntry {
            id: id.to_string(),
            name: format!("{id} name"),
            group: String::new(),
            logo: logo.to_string(),
            stream: String::new(),
            tvg_id: tvg_id.to_string(),
            original_url: String::new(),
        }
    }

    #[test]
    fn test_empty_set_still_yields_a_document() {
        let guide = synthesize_placeholder(&ChannelSet::new());
        assert_eq!(
            guide,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<tv>\n</tv>"
        );
    }

    #[test]
    fn test_one_channel_and_one_programme_block_per_entry() {
        let mut set = ChannelSet::new();
        set.insert(entry("bbc1", "bbc1.uk", "http://logos.example.com/bbc1.png"));
        set.insert(entry("rtp1", "", ""));

        let guide = synthesize_placeholder(&set);

        assert_eq!(guide.matches("<tv>").count(), 1);
        assert_eq!(guide.matches("</tv>").count(), 1);
        assert_eq!(guide.matches("<channel id=").count(), 2);
        assert_eq!(guide.matches("</channel>").count(), 2);
        assert_eq!(guide.matches("<programme ").count(), 2);
        assert_eq!(guide.matches("</programme>").count(), 2);
    }

    #[test]
    fn test_guide_id_fallback_and_optional_icon() {
        let mut set = ChannelSet::new();
        set.insert(entry("bbc1", "bbc1.uk", "http://logos.example.com/bbc1.png"));
        set.insert(entry("rtp1", "", ""));

        let guide = synthesize_placeholder(&set);

        // tvg-id used when present, channel id otherwise.
        assert!(guide.contains(r#"<channel id="bbc1.uk">"#));
        assert!(guide.contains(r#"channel="bbc1.uk">"#));
        assert!(guide.contains(r#"<channel id="rtp1">"#));

        // Icon only for the entry that has a logo.
        assert_eq!(guide.matches("<icon src=").count(), 1);
        assert!(guide.contains(r#"<icon src="http://logos.example.com/bbc1.png"/>"#));
    }

    #[test]
    fn test_programme_window_is_the_fixed_literal_span() {
        let mut set = ChannelSet::new();
        set.insert(entry("bbc1", "bbc1.uk", ""));

        let guide = synthesize_placeholder(&set);
        assert!(guide.contains(
            r#"<programme start="20250101000000 +0000" stop="20251231235959 +0000" channel="bbc1.uk">"#
        ));
    }
}
