/// Represents the type of a line in an M3U8 playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    Empty,
    ExtM3U,
    ExtXStreamInf,
    ExtXMedia,
    ExtXIFrameStreamInf,
    ExtInf,
    ExtXProgramDateTime,
    ExtXDiscontinuity,
    ExtXVersion,
    ExtXTargetDuration,
    ExtXMediaSequence,
    ExtXDiscontinuitySequence,
    ExtXEndList,
    ExtXPlaylistType,
    ExtXIFramesOnly,
    UnknownExtTag,
    Comment,
    Uri,
}

impl LineType {
    /// Any line starting with `#`. Comments group with the segment they precede.
    pub fn is_tag(&self) -> bool {
        !matches!(self, Self::Empty | Self::Uri)
    }

    pub fn is_uri(&self) -> bool {
        matches!(self, Self::Uri)
    }

    /// Playlist-level tags shown in the header section.
    pub fn is_header(&self) -> bool {
        matches!(
            self,
            Self::ExtXVersion
                | Self::ExtXTargetDuration
                | Self::ExtXMediaSequence
                | Self::ExtXDiscontinuitySequence
                | Self::ExtXEndList
                | Self::ExtXPlaylistType
                | Self::ExtXIFramesOnly
        )
    }

    pub fn declares_variant(&self) -> bool {
        matches!(self, Self::ExtXStreamInf)
    }

    pub fn declares_rendition(&self) -> bool {
        matches!(self, Self::ExtXMedia)
    }
}

/// Classifier for M3U8 lines.
pub struct LineClassifier;

impl LineClassifier {
    /// Trim surrounding whitespace and a leading byte order mark.
    pub fn clean(line: &str) -> &str {
        line.trim().trim_start_matches('\u{feff}').trim_start()
    }

    /// Classify a line from an M3U8 playlist.
    pub fn classify(line: &str) -> LineType {
        let line = Self::clean(line);

        if line.is_empty() {
            return LineType::Empty;
        }

        if !line.starts_with('#') {
            return LineType::Uri;
        }

        if !line.starts_with("#EXT") {
            return LineType::Comment;
        }

        // Tags with attributes or values carry a ':'; the rest are bare names.
        let name = line[1..].split(':').next().unwrap_or_default();

        match name {
            "EXTM3U" => LineType::ExtM3U,
            "EXT-X-STREAM-INF" => LineType::ExtXStreamInf,
            "EXT-X-MEDIA" => LineType::ExtXMedia,
            "EXT-X-I-FRAME-STREAM-INF" => LineType::ExtXIFrameStreamInf,
            "EXTINF" => LineType::ExtInf,
            "EXT-X-PROGRAM-DATE-TIME" => LineType::ExtXProgramDateTime,
            "EXT-X-DISCONTINUITY" => LineType::ExtXDiscontinuity,
            "EXT-X-VERSION" => LineType::ExtXVersion,
            "EXT-X-TARGETDURATION" => LineType::ExtXTargetDuration,
            "EXT-X-MEDIA-SEQUENCE" => LineType::ExtXMediaSequence,
            "EXT-X-DISCONTINUITY-SEQUENCE" => LineType::ExtXDiscontinuitySequence,
            "EXT-X-ENDLIST" => LineType::ExtXEndList,
            "EXT-X-PLAYLIST-TYPE" => LineType::ExtXPlaylistType,
            "EXT-X-I-FRAMES-ONLY" => LineType::ExtXIFramesOnly,
            _ => LineType::UnknownExtTag,
        }
    }
}
