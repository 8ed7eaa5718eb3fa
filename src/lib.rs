//! recordpad - Elm-style record editor for tabular and JSON-lines data
//!
//! Files are read into one of two canonical models (a [`model::Table`] or a
//! [`model::LineSet`]), edited through a grid or line editor driven by
//! [`Msg`]s, and written back whole through [`Cmd::Persist`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod grid;
pub mod ingest;
pub mod lines;
pub mod messages;
pub mod model;
pub mod persist;
pub mod repl;
pub mod runtime;
pub mod tracing;
pub mod update;
pub mod util;
pub mod view;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::AppConfig;
pub use messages::Msg;
pub use model::AppModel;
