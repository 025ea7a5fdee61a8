pub mod display;
pub mod input;

pub use display::{Terminal, TerminalGuard};
pub use input::{Command, Keymap, key_events};

use crate::{Result, render::Screen};

/// Fallback when the terminal cannot report its size.
pub const DEFAULT_WIDTH: u16 = 80;

/// A device that can show one [`Screen`] at a time.
///
/// Shared by the input and polling activities; implementations must
/// serialise `draw` so frames never interleave.
pub trait Display: Send + Sync {
    fn width(&self) -> u16;

    fn draw(&self, screen: &Screen) -> Result<()>;
}
