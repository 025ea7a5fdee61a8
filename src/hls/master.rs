use super::{
    classifier::{LineClassifier, LineType},
    resolve::resolve_against,
    stream_info::{MediaInfo, StreamInfo},
};
use crate::{Error, Result};
use url::Url;

/// Where a variant's media playlist lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantLocation {
    /// Absolute location, spelled as the playlist wrote it when it was
    /// already absolute.
    Resolved(String),
    /// The reference could not be turned into a URL. Holds the raw text.
    Invalid(String),
}

impl VariantLocation {
    fn from_reference(reference: &str, base: &Url) -> Self {
        match resolve_against(reference, base) {
            Ok(url) => Self::Resolved(url),
            Err(e) => {
                tracing::debug!(reference, error = %e, "Unresolvable variant reference");
                Self::Invalid(reference.to_string())
            }
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Resolved(location) => location,
            Self::Invalid(_) => "invalid-url",
        }
    }
}

/// One selectable rendition of a master playlist.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    /// RESOLUTION for stream variants, NAME for alternate renditions.
    pub resolution: String,
    pub bandwidth: u64,
    pub codecs: String,
    pub location: VariantLocation,
    /// Tag lines that preceded the variant's reference, in source order.
    pub tags: Vec<String>,
}

impl Variant {
    pub fn display_resolution(&self) -> &str {
        if self.resolution.is_empty() {
            "audio-only"
        } else {
            &self.resolution
        }
    }

    /// The media playlist URL, or an error for an unresolvable reference.
    pub fn url(&self) -> Result<Url> {
        match &self.location {
            VariantLocation::Resolved(location) => Ok(Url::parse(location)?),
            VariantLocation::Invalid(raw) => Err(Error::InvalidUrl(raw.clone())),
        }
    }
}

/// Tags collected for the variant currently being read.
#[derive(Debug, Default)]
struct PendingVariant {
    tags: Vec<String>,
}

impl PendingVariant {
    fn push(&mut self, line: &str) {
        self.tags.push(line.to_string());
    }

    /// Close a variant declared by #EXT-X-STREAM-INF + reference line.
    fn finish_stream(self, location: VariantLocation) -> Variant {
        // A repeated declaration overrides the earlier one.
        let info = self
            .tags
            .iter()
            .filter(|tag| LineClassifier::classify(tag).declares_variant())
            .map(|tag| StreamInfo::parse(tag))
            .last()
            .unwrap_or_default();

        Variant {
            resolution: info.resolution.unwrap_or_default(),
            bandwidth: info.bandwidth.unwrap_or_default(),
            codecs: info.codecs.unwrap_or_default(),
            location,
            tags: self.tags,
        }
    }

    /// Close a variant declared entirely by one #EXT-X-MEDIA line.
    fn finish_rendition(self, info: MediaInfo, location: VariantLocation) -> Variant {
        Variant {
            resolution: info.name.unwrap_or_default(),
            bandwidth: 0,
            codecs: String::new(),
            location,
            tags: self.tags,
        }
    }
}

/// Parse the variants of a master playlist, in source order.
///
/// `base` is the URL the playlist was fetched from and anchors relative
/// references. Unknown tags are kept on the variant but otherwise ignored.
pub fn parse_master(raw: &str, base: &Url) -> Vec<Variant> {
    let mut variants = Vec::new();
    let mut pending = PendingVariant::default();

    for line in raw.lines() {
        let line = LineClassifier::clean(line);
        let line_type = LineClassifier::classify(line);

        match line_type {
            LineType::Empty => continue,
            LineType::Uri => {
                let location = VariantLocation::from_reference(line, base);
                variants.push(std::mem::take(&mut pending).finish_stream(location));
            }
            _ => {
                pending.push(line);

                if !line_type.declares_rendition() {
                    continue;
                }

                // Renditions without a URI (e.g. closed captions) are not
                // separately playable and stay attached to the next variant.
                let Some(info) = MediaInfo::parse(line) else {
                    continue;
                };
                let Some(uri) = info.uri.clone() else {
                    continue;
                };

                let location = VariantLocation::from_reference(&uri, base);
                variants.push(std::mem::take(&mut pending).finish_rendition(info, location));
            }
        }
    }

    variants
}

/// A fetched master playlist. Rebuilt wholesale on every refresh.
#[derive(Debug, Clone)]
pub struct MasterPlaylist {
    url: Url,
    variants: Vec<Variant>,
}

impl MasterPlaylist {
    pub fn parse(raw: &str, url: Url) -> Self {
        let variants = parse_master(raw, &url);
        Self { url, variants }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Look up a variant by its 0-based position.
    pub fn variant(&self, index: usize) -> Result<&Variant> {
        self.variants.get(index).ok_or(Error::Selection {
            index: index + 1,
            count: self.variants.len(),
        })
    }

    /// Look up a variant by the 1-based number shown to the user.
    pub fn select(&self, number: usize) -> Result<&Variant> {
        match number.checked_sub(1) {
            Some(index) => self.variant(index),
            None => Err(Error::Selection {
                index: number,
                count: self.variants.len(),
            }),
        }
    }
}
