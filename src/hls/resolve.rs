use crate::Result;
use url::Url;

/// Resolve a playlist reference against the URL of the playlist it came from.
pub fn resolve(candidate: &str, base: &str) -> Result<String> {
    let base = Url::parse(base)?;
    resolve_against(candidate, &base)
}

/// Resolve against an already parsed base.
///
/// References carrying their own scheme are validated and returned exactly as
/// written. Anything else is joined onto the directory of `base`, inheriting
/// its scheme and host.
pub fn resolve_against(candidate: &str, base: &Url) -> Result<String> {
    let candidate = candidate.trim();

    match Url::parse(candidate) {
        Ok(_) => Ok(candidate.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => Ok(base.join(candidate)?.into()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    const MASTER: &str = "https://host/path/master.m3u8";

    #[test]
    fn test_absolute_is_unchanged() {
        let url = resolve("https://cdn.example.com/live/720p/index.m3u8?token=abc", MASTER).unwrap();
        assert_eq!(url, "https://cdn.example.com/live/720p/index.m3u8?token=abc");
    }

    #[test]
    fn test_absolute_keeps_source_text() {
        for absolute in [
            "HTTPS://CDN.Example.com/live/../720p/index.m3u8",
            "https://cdn.example.com:443/a/./b.m3u8",
            "https://cdn.example.com",
        ] {
            assert_eq!(resolve(absolute, MASTER).unwrap(), absolute);
        }
    }

    #[test]
    fn test_relative_joins_base_directory() {
        let url = resolve("720p/index.m3u8", MASTER).unwrap();
        assert_eq!(url, "https://host/path/720p/index.m3u8");

        let url = resolve("segment_001.ts", "http://host:8080/a/b/media.m3u8").unwrap();
        assert_eq!(url, "http://host:8080/a/b/segment_001.ts");
    }

    #[test]
    fn test_scheme_relative_inherits_scheme() {
        let url = resolve("//edge.example.com/v.m3u8", MASTER).unwrap();
        assert_eq!(url, "https://edge.example.com/v.m3u8");
    }

    #[test]
    fn test_unparseable_base_is_typed_error() {
        let err = resolve("720p.m3u8", "not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_malformed_candidate_is_typed_error() {
        let err = resolve("http://[::1", MASTER).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }
}
