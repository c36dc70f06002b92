use crate::index::{IndexFile, IndexMode};
use crate::stub::StubDocument;
use crate::tool_dir::ToolDir;
use anyhow::{Context, Result};
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{debug, info};

#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub struct Options {
    pub escape: bool,
    pub index_mode: IndexMode,
}

/// where a single invocation wrote to
#[derive(Eq, PartialEq, Debug)]
pub struct Generated {
    pub stub: PathBuf,
    pub index: PathBuf,
}

/// Writes a stub page into the tool directory and links it from the index.
///
/// The two writes are independent: if the index update fails the stub stays
/// on disk, unlinked.
#[derive(Debug)]
pub struct StubGenerator {
    dir: ToolDir,
    index: IndexFile,
    options: Options,
}

impl StubGenerator {
    pub fn new(dir: ToolDir, index_name: &str, options: Options) -> Result<Self> {
        let index = IndexFile::new(dir.resolve(index_name)?, options.escape);

        Ok(StubGenerator {
            dir,
            index,
            options,
        })
    }

    pub fn generate(&self, file: &str, title: &str) -> Result<Generated> {
        let stub = self.dir.resolve(file)?;

        write_stub(&stub, &StubDocument::new(title, self.options.escape))?;
        debug!(stub = %stub.display(), "wrote stub");

        self.index
            .add(file, self.options.index_mode)
            .context(format!(
                "{} was written but is not linked from {}",
                stub.display(),
                self.index.path().display()
            ))?;

        let generated = Generated {
            stub,
            index: self.index.path().to_path_buf(),
        };
        info!(
            stub = %generated.stub.display(),
            index = %generated.index.display(),
            "generated"
        );

        Ok(generated)
    }
}

fn write_stub(path: &Path, document: &StubDocument) -> Result<()> {
    let mut f = File::create(path).context(format!("create(\"{}\")", path.display()))?;

    f.write_all(document.render().as_bytes())
        .context(format!("write(\"{}\")", path.display()))?;

    Ok(())
}
