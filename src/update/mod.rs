//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions. Each returns the
//! side effects the host must perform, if any.

mod app;
mod grid;
mod lines;

use crate::commands::{Cmd, NotifyLevel};
use crate::messages::Msg;
use crate::model::AppModel;

pub use app::update_app;
pub use grid::update_grid;
pub use lines::update_lines;

/// Main update function - dispatches to sub-handlers
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    let span = tracing::debug_span!("update", msg = ?msg).entered();

    let cmd = match msg {
        Msg::Grid(m) => grid::update_grid(model, m),
        Msg::Lines(m) => lines::update_lines(model, m),
        Msg::App(m) => app::update_app(model, m),
    };

    #[cfg(debug_assertions)]
    {
        if let Some(cmd) = &cmd {
            tracing::trace!(?cmd, "update produced command");
        }
        drop(span);
    }
    cmd
}

/// Ask the host to write the whole document
pub(crate) fn persist(model: &mut AppModel) -> Option<Cmd> {
    let request = model.document.persist_request()?;
    model.ui.pending_writes += 1;
    tracing::debug!(
        "Persisting {} ({} content)",
        model.document.display_name(),
        request.kind()
    );
    Some(Cmd::Persist(request))
}

/// Record a status message and ask the host to show it
pub(crate) fn notify(model: &mut AppModel, level: NotifyLevel, message: impl Into<String>) -> Cmd {
    let message = message.into();
    model.ui.set_status(level, message.clone());
    Cmd::Notify { level, message }
}
