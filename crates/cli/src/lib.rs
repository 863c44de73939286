//! `stockroom-cli` — the interactive command interface.
//!
//! Everything here sits on top of the catalog; the menu holds no business
//! rules of its own.

pub mod config;
pub mod menu;
pub mod prompt;

pub use config::Config;
pub use menu::Session;
