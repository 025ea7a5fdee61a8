use super::attributes::{attribute_list, parse_attributes};

/// Represents parsed stream information from #EXT-X-STREAM-INF tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamInfo {
    pub bandwidth: Option<u64>,
    pub average_bandwidth: Option<u64>,
    pub resolution: Option<String>,
    pub codecs: Option<String>,
    pub frame_rate: Option<f64>,
}

impl StreamInfo {
    pub const TAG: &'static str = "#EXT-X-STREAM-INF";

    /// Parse from #EXT-X-STREAM-INF tag line.
    ///
    /// Malformed values leave their field unset.
    pub fn parse(line: &str) -> Self {
        let content = match attribute_list(line, Self::TAG) {
            Some(c) => c,
            None => return Self::default(),
        };

        let mut info = Self::default();

        for attr in parse_attributes(content) {
            let value = attr.value;
            match attr.key.as_str() {
                "BANDWIDTH" => info.bandwidth = value.parse().ok(),
                "AVERAGE-BANDWIDTH" => info.average_bandwidth = value.parse().ok(),
                "RESOLUTION" => info.resolution = Some(value),
                "CODECS" => info.codecs = Some(value),
                "FRAME-RATE" => info.frame_rate = value.parse().ok(),
                _ => {}
            }
        }

        info
    }
}

/// Represents an alternate rendition declared by #EXT-X-MEDIA.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaInfo {
    pub media_type: Option<String>,
    pub group_id: Option<String>,
    pub name: Option<String>,
    pub language: Option<String>,
    pub uri: Option<String>,
}

impl MediaInfo {
    pub const TAG: &'static str = "#EXT-X-MEDIA";

    /// Parse from #EXT-X-MEDIA tag line. Returns `None` for other lines.
    pub fn parse(line: &str) -> Option<Self> {
        let content = attribute_list(line, Self::TAG)?;

        let mut info = Self::default();

        for attr in parse_attributes(content) {
            let value = Some(attr.value);
            match attr.key.as_str() {
                "TYPE" => info.media_type = value,
                "GROUP-ID" => info.group_id = value,
                "NAME" => info.name = value,
                "LANGUAGE" => info.language = value,
                "URI" => info.uri = value,
                _ => {}
            }
        }

        Some(info)
    }
}
