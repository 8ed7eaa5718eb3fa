//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use recordpad::commands::Cmd;
use recordpad::model::{AppModel, Document};
use recordpad::persist::PersistRequest;
use recordpad::runtime::Host;
use recordpad::update::update;
use recordpad::{AppConfig, Msg};
use tempfile::TempDir;

/// Write `content` to `name` inside a fresh temp dir.
///
/// The dir is returned so the caller keeps it alive for the test's duration.
pub fn temp_file(name: &str, content: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("write temp file");
    (dir, path)
}

/// Open a file with default config
pub fn open(path: &Path) -> Document {
    Document::open(path, &AppConfig::default()).expect("open document")
}

/// Build a model for text content written to a temp file named `name`
pub fn test_model(name: &str, content: &str) -> (TempDir, AppModel) {
    let (dir, path) = temp_file(name, content.as_bytes());
    let model = AppModel::new(open(&path), AppConfig::default());
    (dir, model)
}

/// Host that writes into a byte buffer and keeps the clipboard in-process
pub fn test_host(model: AppModel) -> Host<Vec<u8>> {
    Host::new(model, Vec::new(), false)
}

/// Run a sequence of messages, collecting every command produced
pub fn run(model: &mut AppModel, msgs: impl IntoIterator<Item = Msg>) -> Vec<Cmd> {
    msgs.into_iter()
        .filter_map(|msg| update(model, msg))
        .collect()
}

/// Number of persist requests across all commands
pub fn persist_count(cmds: &[Cmd]) -> usize {
    cmds.iter().map(|c| c.persist_requests().len()).sum()
}

/// The single persist request in `cmd`, panicking otherwise
pub fn single_persist(cmd: &Cmd) -> &PersistRequest {
    let requests = cmd.persist_requests();
    assert_eq!(requests.len(), 1, "expected one persist in {:?}", cmd);
    requests[0]
}

/// Output the host has written so far
pub fn host_output(host: &mut Host<Vec<u8>>) -> String {
    String::from_utf8_lossy(host.out()).into_owned()
}
