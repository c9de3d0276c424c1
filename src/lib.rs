pub mod app;
pub mod capability;
pub mod config;
pub mod drawer;
pub mod fingerprint;
pub mod flash;
pub mod input;
pub mod layout;
pub mod logging;
pub mod palette;
pub mod term;
pub mod terminal;
pub mod types;
pub mod ui_state;
pub mod visual;
pub mod window;
