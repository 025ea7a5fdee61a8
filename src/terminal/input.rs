use crate::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::{Stream, StreamExt, future};

/// A decoded keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Pause,
    Resume,
    ChangeVariant,
    Refresh,
    Quit,
    Digit(u8),
    Confirm,
    Erase,
}

/// Which key bindings apply. `r` means refresh on the variant list and
/// resume while tailing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keymap {
    Selecting,
    Tailing,
}

impl Command {
    pub fn decode(key: &KeyEvent, keymap: Keymap) -> Option<Self> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('d') => Some(Self::Quit),
                _ => None,
            };
        }

        match (key.code, keymap) {
            (KeyCode::Char('q'), _) => Some(Self::Quit),
            (KeyCode::Char('r'), Keymap::Selecting) => Some(Self::Refresh),
            (KeyCode::Char(c), Keymap::Selecting) if c.is_ascii_digit() => {
                Some(Self::Digit(c as u8 - b'0'))
            }
            (KeyCode::Enter, Keymap::Selecting) => Some(Self::Confirm),
            (KeyCode::Backspace, Keymap::Selecting) => Some(Self::Erase),
            (KeyCode::Char('p'), Keymap::Tailing) => Some(Self::Pause),
            (KeyCode::Char('r'), Keymap::Tailing) => Some(Self::Resume),
            (KeyCode::Char('c'), Keymap::Tailing) => Some(Self::ChangeVariant),
            _ => None,
        }
    }
}

/// Key presses from the terminal. Requires raw mode.
pub fn key_events() -> impl Stream<Item = Result<KeyEvent>> + Unpin {
    EventStream::new().filter_map(|event| {
        future::ready(match event {
            Ok(Event::Key(key)) => Some(Ok(key)),
            Ok(_) => None,
            Err(e) => Some(Err(e.into())),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_r_depends_on_keymap() {
        assert_eq!(
            Command::decode(&key('r'), Keymap::Selecting),
            Some(Command::Refresh)
        );
        assert_eq!(
            Command::decode(&key('r'), Keymap::Tailing),
            Some(Command::Resume)
        );
    }

    #[test]
    fn test_digits_only_while_selecting() {
        assert_eq!(
            Command::decode(&key('7'), Keymap::Selecting),
            Some(Command::Digit(7))
        );
        assert_eq!(Command::decode(&key('7'), Keymap::Tailing), None);
    }

    #[test]
    fn test_tailing_commands() {
        assert_eq!(Command::decode(&key('p'), Keymap::Tailing), Some(Command::Pause));
        assert_eq!(
            Command::decode(&key('c'), Keymap::Tailing),
            Some(Command::ChangeVariant)
        );
        assert_eq!(Command::decode(&key('c'), Keymap::Selecting), None);
        assert_eq!(Command::decode(&key('q'), Keymap::Tailing), Some(Command::Quit));
    }

    #[test]
    fn test_ctrl_c_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Command::decode(&ctrl_c, Keymap::Tailing), Some(Command::Quit));
        assert_eq!(Command::decode(&ctrl_c, Keymap::Selecting), Some(Command::Quit));
    }

    #[test]
    fn test_escape_sequences_ignored() {
        assert_eq!(Command::decode(&key('['), Keymap::Selecting), None);
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(Command::decode(&esc, Keymap::Tailing), None);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut release = key('q');
        release.kind = KeyEventKind::Release;
        assert_eq!(Command::decode(&release, Keymap::Tailing), None);
    }
}
