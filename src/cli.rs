use anyhow::Context;
use clap::Parser;
use hlstail::TailConfig;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Define CLI arguments
#[derive(Debug, Parser)]
#[command(
    name = "hlstail",
    version,
    about = "Query an HLS playlist and then tail the new segments of a selected variant",
    override_usage = "hlstail [OPTIONS] <PLAYLIST>"
)]
pub struct Cli {
    /// Master playlist URL
    pub playlist: String,

    /// The number of segments to display
    #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    pub count: u32,

    /// The number of seconds to wait between updates
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: u64,

    /// The number of the variant you'd like to use (0 prompts)
    #[arg(short, long, default_value_t = 0)]
    pub variant: usize,

    /// HTTP request timeout in seconds
    #[arg(short, long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Extra request header, e.g. "Cookie: session=abc". Repeatable.
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Write logs to this file (the terminal is taken over by the display)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected \"Name: Value\", got {s:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing header name in {s:?}"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

impl Cli {
    pub fn into_config(self) -> anyhow::Result<TailConfig> {
        let url = Url::parse(&self.playlist)
            .with_context(|| format!("Invalid playlist URL: {}", self.playlist))?;

        let mut config = TailConfig::new(url)
            .with_count(self.count as usize)
            .with_interval(Duration::from_secs(self.interval))
            .with_variant(self.variant)
            .with_timeout(Duration::from_secs(self.timeout));

        for (name, value) in self.headers {
            config = config.with_header(name, value);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["hlstail", "https://host/master.m3u8"]);
        let config = cli.into_config().unwrap();
        assert_eq!(config.count, 5);
        assert_eq!(config.interval, Duration::from_secs(3));
        assert_eq!(config.variant, 0);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from([
            "hlstail",
            "--count",
            "8",
            "-i",
            "2",
            "--variant",
            "3",
            "-H",
            "Referer: https://example.com/",
            "https://host/master.m3u8",
        ]);
        let config = cli.into_config().unwrap();
        assert_eq!(config.count, 8);
        assert_eq!(config.interval, Duration::from_secs(2));
        assert_eq!(config.variant, 3);
        assert_eq!(
            config.headers,
            [("Referer".to_string(), "https://example.com/".to_string())]
        );
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(Cli::try_parse_from(["hlstail", "-i", "0", "https://host/m.m3u8"]).is_err());
    }

    #[test]
    fn test_relative_playlist_rejected() {
        let cli = Cli::parse_from(["hlstail", "master.m3u8"]);
        assert!(cli.into_config().is_err());
    }

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("Cookie: a=b; c=d").unwrap(),
            ("Cookie".to_string(), "a=b; c=d".to_string())
        );
        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(": value").is_err());
    }
}
