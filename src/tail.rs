pub mod controls;
pub mod poller;
pub mod selection;
pub mod session;

#[cfg(test)]
mod testing;

pub use controls::Controls;
pub use poller::Poller;
pub use selection::SelectionBuffer;
pub use session::{Mode, Session};
