//! In-memory collaborators for controller tests.

use crate::{
    Error, Result,
    fetch::ManifestSource,
    render::Screen,
    terminal::Display,
};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use url::Url;

#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    Fail(String),
}

/// Replies queued per URL. The last reply for a URL repeats.
#[derive(Default)]
pub struct ScriptedSource {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    fetches: Mutex<HashMap<String, usize>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, url: &str, reply: Reply) {
        self.replies
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(reply);
    }

    pub fn text(&self, url: &str, body: &str) {
        self.reply(url, Reply::Text(body.to_string()));
    }

    pub fn fail(&self, url: &str, reason: &str) {
        self.reply(url, Reply::Fail(reason.to_string()));
    }

    pub fn fetches(&self, url: &str) -> usize {
        self.fetches.lock().unwrap().get(url).copied().unwrap_or_default()
    }
}

#[async_trait]
impl ManifestSource for ScriptedSource {
    async fn fetch_text(&self, url: &Url) -> Result<String> {
        *self
            .fetches
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default() += 1;

        let reply = {
            let mut replies = self.replies.lock().unwrap();
            let queue = replies.get_mut(url.as_str());
            match queue {
                Some(queue) if queue.len() > 1 => queue.pop_front(),
                Some(queue) => queue.front().cloned(),
                None => None,
            }
        };

        match reply {
            Some(Reply::Text(body)) => Ok(body),
            Some(Reply::Fail(reason)) => Err(Error::FetchFailed {
                url: url.to_string(),
                reason,
            }),
            None => Err(Error::FetchFailed {
                url: url.to_string(),
                reason: "HTTP 404 Not Found".to_string(),
            }),
        }
    }
}

/// Keeps every frame drawn.
#[derive(Default)]
pub struct RecordingDisplay {
    frames: Mutex<Vec<Screen>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<Screen> {
        self.frames.lock().unwrap().clone()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.lock().unwrap().len()
    }

    pub fn last_text(&self) -> String {
        self.frames
            .lock()
            .unwrap()
            .last()
            .map(Screen::to_plain_text)
            .unwrap_or_default()
    }
}

impl Display for RecordingDisplay {
    fn width(&self) -> u16 {
        60
    }

    fn draw(&self, screen: &Screen) -> Result<()> {
        self.frames.lock().unwrap().push(screen.clone());
        Ok(())
    }
}
