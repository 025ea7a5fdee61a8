use std::time::Duration;
use url::Url;

pub const DEFAULT_COUNT: usize = 5;
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(3);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Runtime settings for one tailing session.
#[derive(Debug, Clone)]
pub struct TailConfig {
    /// Master playlist URL.
    pub url: Url,
    /// Segments shown per refresh.
    pub count: usize,
    /// Delay between polls of the media playlist.
    pub interval: Duration,
    /// 1-based variant to start tailing without prompting. 0 prompts.
    pub variant: usize,
    /// Per-request HTTP timeout.
    pub timeout: Duration,
    /// Extra headers sent with every playlist request.
    pub headers: Vec<(String, String)>,
}

impl TailConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            count: DEFAULT_COUNT,
            interval: DEFAULT_INTERVAL,
            variant: 0,
            timeout: DEFAULT_TIMEOUT,
            headers: Vec::new(),
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count.max(1);
        self
    }

    /// Sub-second intervals are rounded up to one second.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval.max(Duration::from_secs(1));
        self
    }

    pub fn with_variant(mut self, variant: usize) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}
