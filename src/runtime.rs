//! Terminal host: executes commands returned by `update`
//!
//! Persistence runs on a single worker thread fed through a channel, so writes
//! complete in the order they were requested. Results come back as messages on
//! the host's own channel and are dispatched like any other message.

use std::io::Write;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::JoinHandle;

use crate::commands::{Cmd, NotifyLevel};
use crate::ingest::SourceFormat;
use crate::messages::{AppMsg, LineMsg, Msg};
use crate::model::AppModel;
use crate::persist::{write_document, PersistRequest};
use crate::update::update;

/// One queued write
struct PersistJob {
    path: PathBuf,
    format: SourceFormat,
    request: PersistRequest,
}

pub struct Host<W: Write> {
    pub model: AppModel,
    out: W,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    persist_tx: Option<Sender<PersistJob>>,
    worker: Option<JoinHandle<()>>,
    system_clipboard: bool,
    /// In-process clipboard, used when the system clipboard is off or unavailable
    clipboard: String,
}

impl<W: Write> Host<W> {
    pub fn new(model: AppModel, out: W, system_clipboard: bool) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        let (persist_tx, persist_rx) = mpsc::channel::<PersistJob>();

        let results = msg_tx.clone();
        let worker = std::thread::spawn(move || {
            for job in persist_rx {
                let result = write_document(&job.path, job.format, &job.request)
                    .map_err(|e| e.to_string());
                if results
                    .send(Msg::App(AppMsg::PersistCompleted(result)))
                    .is_err()
                {
                    break;
                }
            }
        });

        Self {
            model,
            out,
            msg_tx,
            msg_rx,
            persist_tx: Some(persist_tx),
            worker: Some(worker),
            system_clipboard,
            clipboard: String::new(),
        }
    }

    /// Run one message through `update` and execute what it returns
    pub fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd);
        }
    }

    pub fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::Persist(request) => {
                let job = PersistJob {
                    path: self.model.document.path.clone(),
                    format: self.model.document.format,
                    request,
                };
                let sent = self
                    .persist_tx
                    .as_ref()
                    .is_some_and(|tx| tx.send(job).is_ok());
                if !sent {
                    let _ = self.msg_tx.send(Msg::App(AppMsg::PersistCompleted(Err(
                        "persistence worker is not running".to_string(),
                    ))));
                }
            }
            Cmd::Notify { level, message } => {
                match level {
                    NotifyLevel::Info => tracing::info!("{}", message),
                    NotifyLevel::Warning => tracing::warn!("{}", message),
                    NotifyLevel::Error => tracing::error!("{}", message),
                }
                let _ = writeln!(self.out, "[{}] {}", level.label(), message);
            }
            Cmd::WriteClipboard(text) => self.write_clipboard(text),
            Cmd::ReadClipboard { target } => {
                let text = self.read_clipboard();
                self.dispatch(Msg::Lines(LineMsg::Paste { target, text }));
            }
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }
        }
    }

    fn write_clipboard(&mut self, text: String) {
        if self.system_clipboard {
            match arboard::Clipboard::new().and_then(|mut c| c.set_text(text.clone())) {
                Ok(()) => return,
                Err(e) => tracing::warn!("System clipboard unavailable: {}", e),
            }
        }
        self.clipboard = text;
    }

    fn read_clipboard(&mut self) -> String {
        if self.system_clipboard {
            match arboard::Clipboard::new().and_then(|mut c| c.get_text()) {
                Ok(text) => return text,
                Err(e) => tracing::warn!("System clipboard unavailable: {}", e),
            }
        }
        self.clipboard.clone()
    }

    /// In-process clipboard content
    pub fn clipboard(&self) -> &str {
        &self.clipboard
    }

    /// Dispatch every message that has already arrived
    pub fn drain(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
        }
    }

    /// Block until every requested write has reported back
    pub fn wait_for_writes(&mut self) {
        while self.model.ui.is_saving() {
            match self.msg_rx.recv() {
                Ok(msg) => self.dispatch(msg),
                Err(_) => break,
            }
        }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.out
    }

    /// Finish pending writes and stop the worker
    pub fn shutdown(mut self) -> (AppModel, W) {
        self.wait_for_writes();
        self.persist_tx = None;
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!("Persistence worker panicked");
            }
        }
        (self.model, self.out)
    }
}
