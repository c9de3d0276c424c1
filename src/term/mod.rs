//! crossterm implementation of the window, backend and input contracts.

mod backend;
mod input;
mod window;

pub use backend::TermBackend;
pub use input::{TermInput, map_key_event};
pub use window::{TermWindow, to_term_color};
