use super::classifier::{LineClassifier, LineType};

/// One media segment: its tag lines followed by exactly one locator line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    lines: Vec<String>,
}

impl Segment {
    fn new(mut tags: Vec<String>, locator: &str) -> Self {
        tags.push(locator.to_string());
        Self { lines: tags }
    }

    /// Tag lines in source order, without the locator.
    pub fn tags(&self) -> &[String] {
        &self.lines[..self.lines.len() - 1]
    }

    /// The segment URI as written in the playlist. Identifies the segment
    /// across refreshes.
    pub fn locator(&self) -> &str {
        self.lines.last().map(String::as_str).unwrap_or_default()
    }

    /// All lines of the record, locator last.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// The parsed state of a media playlist at one fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaPlaylist {
    headers: Vec<String>,
    segments: Vec<Segment>,
}

impl MediaPlaylist {
    pub fn parse(raw: &str) -> Self {
        parse_media(raw)
    }

    /// Playlist-level tags, in source order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn locators(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(Segment::locator)
    }

    pub fn contains_locator(&self, locator: &str) -> bool {
        self.locators().any(|l| l == locator)
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

/// Group the lines of a media playlist into segment records.
///
/// Header tags are taken from the lines before the first locator and from
/// any lines left after the last one, which is where #EXT-X-ENDLIST sits.
/// Trailing tags without a locator do not form a segment.
pub fn parse_media(raw: &str) -> MediaPlaylist {
    let mut playlist = MediaPlaylist::default();
    let mut pending: Vec<String> = Vec::new();

    for line in raw.lines() {
        let line = LineClassifier::clean(line);

        match LineClassifier::classify(line) {
            LineType::Empty => {}
            LineType::Uri => {
                if playlist.segments.is_empty() {
                    collect_headers(&pending, &mut playlist.headers);
                }
                let tags = std::mem::take(&mut pending);
                playlist.segments.push(Segment::new(tags, line));
            }
            _ => pending.push(line.to_string()),
        }
    }

    collect_headers(&pending, &mut playlist.headers);

    playlist
}

fn collect_headers(lines: &[String], headers: &mut Vec<String>) {
    headers.extend(
        lines
            .iter()
            .filter(|line| LineClassifier::classify(line).is_header())
            .cloned(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIVE: &str = "\
#EXTM3U
#EXT-X-VERSION:3
#EXT-X-TARGETDURATION:6
#EXT-X-MEDIA-SEQUENCE:100
#EXT-X-PROGRAM-DATE-TIME:2024-01-01T00:00:00.000Z
#EXTINF:6.000,
seg100.ts
#EXTINF:6.000,
seg101.ts
#EXT-X-DISCONTINUITY
#EXTINF:5.005,
https://cdn.example.com/seg102.ts
";

    #[test]
    fn test_groups_tags_with_locator() {
        let playlist = parse_media(LIVE);
        assert_eq!(playlist.len(), 3);

        let first = &playlist.segments()[0];
        assert_eq!(first.locator(), "seg100.ts");
        assert_eq!(first.tags().len(), 6);
        assert_eq!(first.tags().last().unwrap(), "#EXTINF:6.000,");

        let last = &playlist.segments()[2];
        assert_eq!(last.locator(), "https://cdn.example.com/seg102.ts");
        assert_eq!(last.tags(), ["#EXT-X-DISCONTINUITY", "#EXTINF:5.005,"]);
    }

    #[test]
    fn test_headers_from_leading_lines() {
        let playlist = parse_media(LIVE);
        assert_eq!(
            playlist.headers(),
            [
                "#EXT-X-VERSION:3",
                "#EXT-X-TARGETDURATION:6",
                "#EXT-X-MEDIA-SEQUENCE:100",
            ]
        );
    }

    #[test]
    fn test_endlist_is_a_header() {
        let raw = format!("{LIVE}#EXT-X-ENDLIST\n");
        let playlist = parse_media(&raw);
        assert_eq!(playlist.len(), 3);
        assert_eq!(playlist.headers().last().unwrap(), "#EXT-X-ENDLIST");
    }

    #[test]
    fn test_no_segments_is_empty_not_error() {
        let playlist = parse_media("#EXTM3U\n#EXT-X-VERSION:3\n#EXTINF:6.0,\n");
        assert!(playlist.is_empty());
        assert_eq!(playlist.headers(), ["#EXT-X-VERSION:3"]);

        assert!(parse_media("").is_empty());
    }

    #[test]
    fn test_reparse_is_idempotent() {
        let a = parse_media(LIVE);
        let b = parse_media(LIVE);
        assert!(a.locators().eq(b.locators()));
        assert_eq!(a, b);
    }

    #[test]
    fn test_leading_byte_order_mark() {
        let playlist = parse_media(&format!("\u{feff}{LIVE}"));
        assert_eq!(playlist.len(), 3);
        assert_eq!(playlist.segments()[0].locator(), "seg100.ts");
        assert_eq!(playlist.segments()[0].tags()[0], "#EXTM3U");
    }

    #[test]
    fn test_contains_locator() {
        let playlist = parse_media(LIVE);
        assert!(playlist.contains_locator("seg101.ts"));
        assert!(!playlist.contains_locator("seg103.ts"));
    }
}
