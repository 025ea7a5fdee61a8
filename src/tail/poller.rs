use super::Controls;
use crate::{
    Result,
    diff::DiffEngine,
    fetch::ManifestSource,
    hls::MediaPlaylist,
    render::{self, Screen},
    terminal::Display,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use url::Url;

/// The background activity: fetch, parse, diff and draw one media playlist
/// on a fixed cadence.
pub struct Poller {
    source: Arc<dyn ManifestSource>,
    display: Arc<dyn Display>,
    controls: Arc<Controls>,
    url: Url,
    count: usize,
    interval: Duration,
    engine: DiffEngine,
    /// Last successful segment screen and when it was drawn.
    last_render: Option<(Screen, DateTime<Utc>)>,
    paused_shown: bool,
}

impl Poller {
    pub fn new(
        source: Arc<dyn ManifestSource>,
        display: Arc<dyn Display>,
        controls: Arc<Controls>,
        url: Url,
        count: usize,
        interval: Duration,
        engine: DiffEngine,
    ) -> Self {
        Self {
            source,
            display,
            controls,
            url,
            count,
            interval,
            engine,
            last_render: None,
            paused_shown: false,
        }
    }

    /// Poll until `token` is cancelled, then hand back the diff state.
    ///
    /// The first poll happens immediately. A cancellation during a fetch
    /// abandons it; nothing is drawn for an abandoned poll.
    pub async fn run(mut self, token: CancellationToken) -> Result<DiffEngine> {
        let controls = self.controls.clone();
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::info!(
            url = %self.url,
            variant = controls.selected().map_or(0, |index| index + 1),
            interval_secs = self.interval.as_secs(),
            "Tailing variant"
        );

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                _ = controls.changed() => {
                    if controls.is_paused() {
                        self.show_paused()?;
                    } else {
                        // Resuming waits for the next tick.
                        self.paused_shown = false;
                    }
                    continue;
                }
                _ = ticker.tick() => {}
            }

            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                result = self.tick() => result?,
            }
        }

        tracing::debug!(url = %self.url, "Poller stopped");
        Ok(self.engine)
    }

    /// One timer tick. Paused ticks never fetch.
    pub async fn tick(&mut self) -> Result<()> {
        if self.controls.is_paused() {
            return self.show_paused();
        }
        self.paused_shown = false;
        self.poll().await
    }

    async fn poll(&mut self) -> Result<()> {
        let fetched = self.source.fetch_text(&self.url).await;
        let now = Utc::now();
        let width = self.display.width();

        let text = match fetched {
            Ok(text) => text,
            Err(e) if e.is_recoverable() => {
                // The baseline stays as it was; the next success diffs against it.
                tracing::warn!(url = %self.url, code = e.error_code(), error = %e, "Poll failed");
                return self
                    .display
                    .draw(&render::fetch_error_screen(&e.to_string(), width, now));
            }
            Err(e) => return Err(e),
        };

        let snapshot = MediaPlaylist::parse(&text);
        let diff = self.engine.apply(snapshot, self.count);
        tracing::debug!(
            url = %self.url,
            shown = diff.segments.len(),
            new = diff.new_segment_count(),
            changed_headers = diff.changed_header_count(),
            "Playlist refreshed"
        );

        let screen = render::segment_screen(&diff, width, now);
        self.display.draw(&screen)?;
        self.last_render = Some((screen, now));
        Ok(())
    }

    /// Draw the pause banner once per pause.
    fn show_paused(&mut self) -> Result<()> {
        if self.paused_shown {
            return Ok(());
        }
        self.paused_shown = true;

        let width = self.display.width();
        let screen = match &self.last_render {
            Some((last, at)) => render::paused_screen(last, *at, width),
            None => render::paused_screen(&Screen::new(), Utc::now(), width),
        };
        self.display.draw(&screen)
    }

    pub fn engine(&self) -> &DiffEngine {
        &self.engine
    }
}
