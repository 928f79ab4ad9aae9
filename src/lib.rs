pub mod cli;
pub mod config;
pub mod defaults;
pub mod density;
pub mod error;
pub mod export;
pub mod loader;
pub mod logging;
pub mod model;
pub mod persist;
pub mod policy;
pub mod recorder;
pub mod scheduler;
pub mod sequencer;
pub mod state;
pub mod ticker;
pub mod timeline;
pub mod tui;
pub mod ui;
