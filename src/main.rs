use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};

use anyhow::{Context, Result};
use clap::Parser;

use recordpad::cli::{CliArgs, CommandSource};
use recordpad::model::{AppModel, Document};
use recordpad::repl::{parse_command, Command, HELP};
use recordpad::runtime::Host;
use recordpad::view::render;
use recordpad::AppConfig;

fn main() -> Result<()> {
    let startup = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;

    recordpad::tracing::init();

    let config = AppConfig::load().with_rows_per_page(startup.rows_per_page);
    let document = Document::open(&startup.path, &config)
        .with_context(|| format!("Failed to open {}", startup.path.display()))?;

    let input: Box<dyn BufRead> = match &startup.source {
        CommandSource::Stdin => Box::new(BufReader::new(io::stdin())),
        CommandSource::Script(path) => Box::new(BufReader::new(
            File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?,
        )),
    };
    let interactive = startup.source == CommandSource::Stdin;

    let model = AppModel::new(document, config);
    let mut host = Host::new(model, io::stdout(), startup.system_clipboard);
    let screen = render(&host.model);
    write!(host.out(), "{}", screen)?;

    for line in input.lines() {
        let line = line.context("Failed to read command")?;
        host.drain();

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Nothing) => {}
            Ok(Command::Help) => writeln!(host.out(), "{}", HELP)?,
            Ok(Command::Show) => {
                host.wait_for_writes();
                let screen = render(&host.model);
                write!(host.out(), "{}", screen)?;
            }
            Ok(Command::Msg(msg)) => host.dispatch(msg),
            Err(e) => writeln!(host.out(), "[error] {}", e)?,
        }

        if interactive {
            host.out().flush()?;
        }
    }

    let (model, mut out) = host.shutdown();
    out.flush()?;
    match model.ui.last_save_error {
        Some(e) => anyhow::bail!("Last save failed: {}", e),
        None => Ok(()),
    }
}
