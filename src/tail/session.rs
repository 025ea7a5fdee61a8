use super::{Controls, Poller, SelectionBuffer};
use crate::{
    Error, Result,
    config::TailConfig,
    diff::DiffEngine,
    fetch::ManifestSource,
    hls::MasterPlaylist,
    render::{self, MenuNotice},
    terminal::{Command, Display, Keymap},
};
use crossterm::event::KeyEvent;
use futures::{Stream, StreamExt};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    SelectingVariant,
    Tailing,
    Paused,
    Reselecting,
    Terminated,
}

/// Why the input side ended the tailing phase.
enum Stop {
    Mode(Mode),
    Input(Error),
}

/// The tailing controller. Owns all session state; the only state shared
/// with the poller task is [`Controls`].
pub struct Session {
    config: TailConfig,
    source: Arc<dyn ManifestSource>,
    display: Arc<dyn Display>,
    controls: Arc<Controls>,
    mode: Mode,
    master: Option<MasterPlaylist>,
    selected: Option<Url>,
    engine: DiffEngine,
    preselect: usize,
}

impl Session {
    pub fn new(
        config: TailConfig,
        source: Arc<dyn ManifestSource>,
        display: Arc<dyn Display>,
    ) -> Self {
        let preselect = config.variant;
        Self {
            config,
            source,
            display,
            controls: Arc::new(Controls::new()),
            mode: Mode::SelectingVariant,
            master: None,
            selected: None,
            engine: DiffEngine::new(),
            preselect,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn controls(&self) -> &Arc<Controls> {
        &self.controls
    }

    /// Drive the session from `keys` until the user quits or a fatal error.
    ///
    /// A closed key stream counts as quit.
    pub async fn run<S>(&mut self, keys: &mut S) -> Result<()>
    where
        S: Stream<Item = Result<KeyEvent>> + Unpin,
    {
        loop {
            match self.mode {
                Mode::SelectingVariant => self.select_variant(keys).await?,
                Mode::Tailing | Mode::Paused => self.tail(keys).await?,
                Mode::Reselecting => self.mode = Mode::SelectingVariant,
                Mode::Terminated => {
                    tracing::info!("Session terminated");
                    return Ok(());
                }
            }
        }
    }

    async fn fetch_master(&self) -> Result<MasterPlaylist> {
        let text = self.source.fetch_text(&self.config.url).await?;
        let master = MasterPlaylist::parse(&text, self.config.url.clone());
        tracing::info!(url = %self.config.url, variants = master.len(), "Loaded master playlist");
        Ok(master)
    }

    /// Fetch the master playlist. Only the first load is fatal; later
    /// failures keep the list already on screen.
    async fn load_master(&mut self) -> Result<Option<String>> {
        match self.fetch_master().await {
            Ok(master) => {
                self.master = Some(master);
                Ok(None)
            }
            Err(e) if e.is_recoverable() && self.master.is_some() => {
                tracing::warn!(code = e.error_code(), error = %e, "Master refresh failed");
                Ok(Some(e.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    fn draw_menu(&self, notice: MenuNotice<'_>) -> Result<()> {
        match &self.master {
            Some(master) => self
                .display
                .draw(&render::variant_menu(
                    master,
                    self.display.width(),
                    self.controls.selected(),
                    notice,
                )),
            None => Ok(()),
        }
    }

    fn variant_count(&self) -> usize {
        self.master.as_ref().map_or(0, MasterPlaylist::len)
    }

    /// Try to start tailing the 1-based `number`. On error nothing changes.
    fn choose(&mut self, number: usize) -> Result<()> {
        let master = self.master.as_ref().ok_or(Error::Selection {
            index: number,
            count: 0,
        })?;
        let url = master.select(number)?.url()?;

        self.controls.select(number - 1);
        self.selected = Some(url);
        self.mode = Mode::Tailing;
        Ok(())
    }

    fn commit(&mut self, number: usize) -> Result<bool> {
        match self.choose(number) {
            Ok(()) => Ok(true),
            Err(e) if e.is_recoverable() => {
                tracing::debug!(number, error = %e, "Rejected selection");
                self.draw_menu(MenuNotice::Error(&e.to_string()))?;
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    async fn select_variant<S>(&mut self, keys: &mut S) -> Result<()>
    where
        S: Stream<Item = Result<KeyEvent>> + Unpin,
    {
        let failure = self.load_master().await?;

        let preselect = std::mem::take(&mut self.preselect);
        if preselect != 0 && self.commit(preselect)? {
            return Ok(());
        }
        if preselect == 0 {
            match &failure {
                Some(reason) => self.draw_menu(MenuNotice::Error(reason))?,
                None => self.draw_menu(MenuNotice::None)?,
            }
        }

        let mut buffer = SelectionBuffer::new();

        while let Some(key) = keys.next().await {
            let Some(command) = Command::decode(&key?, Keymap::Selecting) else {
                continue;
            };

            let committed = match command {
                Command::Quit => {
                    self.mode = Mode::Terminated;
                    return Ok(());
                }
                Command::Refresh => {
                    buffer = SelectionBuffer::new();
                    match self.load_master().await? {
                        Some(reason) => self.draw_menu(MenuNotice::Error(&reason))?,
                        None => self.draw_menu(MenuNotice::None)?,
                    }
                    None
                }
                Command::Digit(digit) => buffer.push(digit, self.variant_count()),
                Command::Confirm => buffer.confirm(),
                Command::Erase => {
                    buffer.erase();
                    None
                }
                _ => None,
            };

            match committed {
                Some(number) => {
                    if self.commit(number)? {
                        return Ok(());
                    }
                }
                None if !buffer.is_empty() => {
                    self.draw_menu(MenuNotice::Typing(buffer.as_str()))?
                }
                None if matches!(command, Command::Erase) => self.draw_menu(MenuNotice::None)?,
                None => {}
            }
        }

        self.mode = Mode::Terminated;
        Ok(())
    }

    fn spawn_poller(&mut self, url: Url) -> (CancellationToken, JoinHandle<Result<DiffEngine>>) {
        let token = CancellationToken::new();
        let poller = Poller::new(
            self.source.clone(),
            self.display.clone(),
            self.controls.clone(),
            url,
            self.config.count,
            self.config.interval,
            std::mem::take(&mut self.engine),
        );
        let handle = tokio::spawn(poller.run(token.clone()));
        (token, handle)
    }

    async fn tail<S>(&mut self, keys: &mut S) -> Result<()>
    where
        S: Stream<Item = Result<KeyEvent>> + Unpin,
    {
        let url = self
            .selected
            .clone()
            .ok_or_else(|| Error::Internal("tailing without a selected variant".to_string()))?;

        self.controls.resume();
        self.mode = Mode::Tailing;
        let (token, mut handle) = self.spawn_poller(url);

        let mut finished = None;
        let stop = loop {
            tokio::select! {
                joined = &mut handle => {
                    finished = Some(joined);
                    break None;
                }
                key = keys.next() => {
                    let key = match key {
                        Some(Ok(key)) => key,
                        Some(Err(e)) => break Some(Stop::Input(e)),
                        None => break Some(Stop::Mode(Mode::Terminated)),
                    };
                    match Command::decode(&key, Keymap::Tailing) {
                        Some(Command::Pause) => {
                            self.controls.pause();
                            self.mode = Mode::Paused;
                        }
                        Some(Command::Resume) => {
                            self.controls.resume();
                            self.mode = Mode::Tailing;
                        }
                        Some(Command::ChangeVariant) => break Some(Stop::Mode(Mode::Reselecting)),
                        Some(Command::Quit) => break Some(Stop::Mode(Mode::Terminated)),
                        _ => {}
                    }
                }
            }
        };

        // The poller must be gone before anything else touches the baseline.
        let joined = match finished {
            Some(joined) => joined,
            None => {
                token.cancel();
                handle.await
            }
        };
        self.engine = joined.map_err(|e| Error::Internal(e.to_string()))??;

        match stop {
            Some(Stop::Mode(Mode::Reselecting)) => {
                tracing::info!("Changing variant");
                self.engine.reset();
                self.selected = None;
                self.mode = Mode::Reselecting;
                Ok(())
            }
            Some(Stop::Mode(mode)) => {
                self.mode = mode;
                Ok(())
            }
            Some(Stop::Input(e)) => Err(e),
            None => Err(Error::Internal("poller exited unexpectedly".to_string())),
        }
    }
}
