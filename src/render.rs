//! Turns parse and diff results into screens of styled lines.
//!
//! Nothing here touches the terminal; the display only ever receives a
//! finished [`Screen`].

pub mod screen;

pub use screen::{DisplayLine, Screen, Style};

use crate::{
    diff::{Classification, DiffResult, HeaderChange, SegmentChange},
    hls::MasterPlaylist,
};
use chrono::{DateTime, SecondsFormat, Utc};

pub const SELECT_ACTIONS: &str = "actions: (q)uit (r)efresh";
pub const TAIL_ACTIONS: &str = "actions: (q)uit (p)ause (r)esume (c)hange variant";

/// Something to show under the variant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuNotice<'a> {
    None,
    /// Digits typed so far.
    Typing(&'a str),
    Error(&'a str),
}

impl Classification {
    pub fn style(&self) -> Style {
        match self {
            Self::New => Style::Emphasized,
            Self::Alternate => Style::Muted,
            Self::Carried => Style::Plain,
        }
    }
}

/// Map a diff to display lines: header tags, then segments in order, with
/// a blank line between groups.
pub fn project(diff: &DiffResult) -> Vec<DisplayLine> {
    let mut lines = project_headers(&diff.headers);
    if !lines.is_empty() {
        lines.push(DisplayLine::blank());
    }
    lines.extend(project_segments(&diff.segments));
    lines
}

pub fn project_headers(headers: &[HeaderChange]) -> Vec<DisplayLine> {
    headers
        .iter()
        .map(|h| {
            let style = if h.changed {
                Style::Emphasized
            } else {
                Style::Muted
            };
            DisplayLine::new(h.line.clone(), style)
        })
        .collect()
}

pub fn project_segments(segments: &[SegmentChange]) -> Vec<DisplayLine> {
    let mut lines = Vec::new();

    for (i, change) in segments.iter().enumerate() {
        if i > 0 {
            lines.push(DisplayLine::blank());
        }
        let style = change.classification.style();
        lines.extend(
            change
                .segment
                .lines()
                .iter()
                .map(|line| DisplayLine::new(line.clone(), style)),
        );
    }

    lines
}

/// Centre `content` in a bar of `fill` characters `width` columns wide.
pub fn pad(content: &str, width: u16, fill: char) -> String {
    let width = usize::from(width);

    if content.is_empty() {
        return fill.to_string().repeat(width);
    }

    let side = width.saturating_sub(content.chars().count() + 2) / 2;
    let padding = fill.to_string().repeat(side);
    format!("{padding} {content} {padding}")
}

pub fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn title(text: &str, width: u16) -> DisplayLine {
    DisplayLine::plain(pad(&format!("[hlstail] {text}"), width, '='))
}

/// The variant list. `selected` is the 0-based index of the variant last
/// tailed; its row is drawn inverted.
pub fn variant_menu(
    master: &MasterPlaylist,
    width: u16,
    selected: Option<usize>,
    notice: MenuNotice<'_>,
) -> Screen {
    let mut screen = Screen::new();
    screen.push(title("Select a variant", width));
    screen.push(DisplayLine::blank());

    for (i, variant) in master.variants().iter().enumerate() {
        let mut line = format!(
            "{}) {} - {} -> {}",
            i + 1,
            variant.display_resolution(),
            variant.bandwidth,
            variant.location.as_str()
        );
        if !variant.codecs.is_empty() {
            line.push_str(&format!(" [{}]", variant.codecs));
        }
        let style = if selected == Some(i) {
            Style::Selected
        } else {
            Style::Plain
        };
        screen.push(DisplayLine::new(line, style));
    }

    if master.is_empty() {
        screen.push(DisplayLine::new("No variants found", Style::Muted));
    }

    screen.push(DisplayLine::blank());
    screen.push(DisplayLine::plain(pad("", width, '=')));
    screen.push(DisplayLine::blank());
    screen.push(DisplayLine::plain(SELECT_ACTIONS));

    match notice {
        MenuNotice::None => {}
        MenuNotice::Typing(digits) => {
            screen.push(DisplayLine::plain(format!("variant: {digits}")));
        }
        MenuNotice::Error(reason) => {
            screen.push(DisplayLine::blank());
            screen.push(DisplayLine::new(
                format!("Incorrect option provided, try again : {reason}"),
                Style::Emphasized,
            ));
        }
    }

    screen
}

fn tail_screen(body: Vec<DisplayLine>, width: u16, at: DateTime<Utc>) -> Screen {
    let mut screen = Screen::new();
    screen.push(title("Segment Data", width));
    screen.push(DisplayLine::blank());
    screen.extend(body);
    screen.push(DisplayLine::blank());
    screen.push_footer(DisplayLine::plain(pad(&timestamp(at), width, '=')));
    screen.push(DisplayLine::blank());
    screen.push(DisplayLine::plain(TAIL_ACTIONS));
    screen
}

pub fn segment_screen(diff: &DiffResult, width: u16, at: DateTime<Utc>) -> Screen {
    let body = if diff.segments.is_empty() {
        let mut body = project_headers(&diff.headers);
        body.push(DisplayLine::plain("Unable to get segments"));
        body
    } else {
        project(diff)
    };

    tail_screen(body, width, at)
}

/// One-line error in place of the segment data.
pub fn fetch_error_screen(reason: &str, width: u16, at: DateTime<Utc>) -> Screen {
    let line = DisplayLine::new(format!("Error getting variant data: {reason}"), Style::Emphasized);
    tail_screen(vec![line], width, at)
}

/// The last rendered screen with its footer turned into a pause banner.
pub fn paused_screen(last: &Screen, rendered_at: DateTime<Utc>, width: u16) -> Screen {
    let banner = DisplayLine::plain(pad(&format!("PAUSED @{}", timestamp(rendered_at)), width, '='));
    let mut screen = last.clone();
    if !screen.replace_footer(banner.clone()) {
        screen.push(banner);
    }
    screen
}
