//! Change detection between consecutive fetches of one media playlist.

use crate::hls::{MediaPlaylist, Segment};

/// How a displayed segment relates to the previous fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Locator not present in the previous fetch.
    New,
    /// Seen before, odd display position.
    Carried,
    /// Seen before, even display position. Drawn muted for banding.
    Alternate,
}

impl Classification {
    pub fn is_new(&self) -> bool {
        matches!(self, Self::New)
    }

    pub fn is_carried(&self) -> bool {
        matches!(self, Self::Carried | Self::Alternate)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderChange {
    pub line: String,
    pub changed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentChange {
    pub segment: Segment,
    pub classification: Classification,
}

/// Everything one refresh shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffResult {
    pub headers: Vec<HeaderChange>,
    pub segments: Vec<SegmentChange>,
}

impl DiffResult {
    pub fn new_segment_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| s.classification.is_new())
            .count()
    }

    pub fn changed_header_count(&self) -> usize {
        self.headers.iter().filter(|h| h.changed).count()
    }
}

/// A previous snapshot without segments is no baseline at all.
fn baseline(previous: Option<&MediaPlaylist>) -> Option<&MediaPlaylist> {
    previous.filter(|p| !p.is_empty())
}

/// Compare header tags by exact line, ignoring their order.
///
/// Without a baseline nothing is reported as changed.
pub fn diff_headers(current: &MediaPlaylist, previous: Option<&MediaPlaylist>) -> Vec<HeaderChange> {
    let previous = baseline(previous);

    current
        .headers()
        .iter()
        .map(|line| HeaderChange {
            line: line.clone(),
            changed: previous.is_some_and(|p| !p.headers().contains(line)),
        })
        .collect()
}

/// Classify the last `count` segments of `current` against `previous`.
///
/// Identity is the locator line only, so rewritten tags such as
/// #EXT-X-PROGRAM-DATE-TIME do not make a segment look new. Without a
/// baseline every segment is new. Order is preserved.
pub fn diff_segments(
    current: &MediaPlaylist,
    previous: Option<&MediaPlaylist>,
    count: usize,
) -> Vec<SegmentChange> {
    let previous = baseline(previous);
    let segments = current.segments();
    let shown = &segments[segments.len() - count.min(segments.len())..];

    shown
        .iter()
        .enumerate()
        .map(|(position, segment)| {
            let seen = previous.is_some_and(|p| p.contains_locator(segment.locator()));
            let classification = if !seen {
                Classification::New
            } else if position % 2 == 0 {
                Classification::Alternate
            } else {
                Classification::Carried
            };

            SegmentChange {
                segment: segment.clone(),
                classification,
            }
        })
        .collect()
}

/// Holds the snapshot of the last successful fetch and diffs new ones
/// against it. Only one snapshot is ever retained.
#[derive(Debug, Default)]
pub struct DiffEngine {
    previous: Option<MediaPlaylist>,
}

impl DiffEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff `snapshot` against the stored one, then make it the new baseline.
    pub fn apply(&mut self, snapshot: MediaPlaylist, count: usize) -> DiffResult {
        let result = DiffResult {
            headers: diff_headers(&snapshot, self.previous.as_ref()),
            segments: diff_segments(&snapshot, self.previous.as_ref(), count),
        };

        self.previous = Some(snapshot);
        result
    }

    pub fn previous(&self) -> Option<&MediaPlaylist> {
        self.previous.as_ref()
    }

    /// Forget the baseline, e.g. when switching variants.
    pub fn reset(&mut self) {
        self.previous = None;
    }
}
