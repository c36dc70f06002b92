use std::{
    env,
    fmt::{self, Display},
    io,
    path::{Component, Path, PathBuf},
};

/// The directory the tool writes into, which is where it lives unless overridden.
#[derive(Eq, PartialEq, Debug)]
pub struct ToolDir {
    root: PathBuf,
}

#[derive(Eq, PartialEq, Debug)]
pub enum Error {
    ToolDirNotFound(PathBuf),
    ExecutableUnknown(io::ErrorKind),
    OutsideToolDir(String),
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Self::ToolDirNotFound(path) => {
                write!(f, "{} is not an existing directory", path.display())
            }
            Self::ExecutableUnknown(kind) => write!(
                f,
                "cannot locate the directory of the running executable ({:?}), pass --dir",
                kind
            ),
            Self::OutsideToolDir(file) => {
                write!(f, "\"{}\" does not name a file inside the tool directory", file)
            }
        }
    }
}

impl ToolDir {
    /// explicit directory if given, otherwise the one holding the executable
    pub fn locate(explicit: Option<&Path>) -> Result<Self, Error> {
        let root = match explicit {
            Some(dir) => dir.to_path_buf(),
            None => {
                let exe = env::current_exe()
                    .and_then(|exe| exe.canonicalize())
                    .map_err(|e| Error::ExecutableUnknown(e.kind()))?;
                executable_dir(&exe)?
            }
        };

        if root.is_dir() {
            Ok(ToolDir { root })
        } else {
            Err(Error::ToolDirNotFound(root))
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// resolve a relative file name, refusing anything which could land outside the directory
    pub fn resolve(&self, file: &str) -> Result<PathBuf, Error> {
        let relative = Path::new(file);
        let contained = !file.is_empty()
            && relative
                .components()
                .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

        if contained && relative.file_name().is_some() {
            Ok(self.root.join(relative))
        } else {
            Err(Error::OutsideToolDir(file.to_owned()))
        }
    }
}

fn executable_dir(exe: &Path) -> Result<PathBuf, Error> {
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or(Error::ExecutableUnknown(io::ErrorKind::NotFound))
}
