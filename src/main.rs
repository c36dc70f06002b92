use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{ArgAction, Parser};
use tracing::debug;

use config::Config;
use generator::{Generated, Options, StubGenerator};
use index::IndexMode;
use tool_dir::ToolDir;

/// Scaffold a test page and link it from the index page beside it
#[derive(Parser, Debug)]
struct Cli {
    /// directory to write into, by default the one holding this executable
    #[arg(short, long, env = "STUB_DIR")]
    dir: Option<PathBuf>,

    /// HTML-escape the title and file name
    #[arg(long)]
    escape: bool,

    /// insert the link inside the index's last list instead of appending it
    #[arg(long)]
    insert: bool,

    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// file name of the new page, relative to the directory
    file: String,

    /// title of the new page, used verbatim
    title: String,

    #[arg(hide = true)]
    extra: Vec<String>,
}

fn run(cli: &Cli) -> Result<Generated> {
    let dir = ToolDir::locate(cli.dir.as_deref())?;
    let config = Config::load(dir.root())?;

    let options = Options {
        escape: cli.escape || config.escape,
        index_mode: if cli.insert || config.insert {
            IndexMode::Insert
        } else {
            IndexMode::Append
        },
    };
    debug!(dir = %dir.root().display(), ?options, "resolved");

    StubGenerator::new(dir, &config.index, options)?.generate(&cli.file, &cli.title)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if !cli.extra.is_empty() {
        debug!(extra = ?cli.extra, "ignoring extra arguments");
    }

    if let Err(e) = run(&cli) {
        eprintln!("failed: {:?}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

mod config;
mod generator;
mod index;
mod logging;
mod stub;
mod tests;
mod tool_dir;
mod util;
