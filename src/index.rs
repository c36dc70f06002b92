use crate::util::substitute;
use anyhow::{Context, Result};
use lol_html::{element, html_content::ContentType, HtmlRewriter, Settings};
use std::{
    cell::{Cell, RefCell},
    fmt::{self, Display},
    fs::{self, File, OpenOptions},
    io::{ErrorKind, Read, Write},
    path::{Path, PathBuf},
    rc::Rc,
};
use tempfile::NamedTempFile;
use tracing::debug;

/// How a new entry reaches the index page.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub enum IndexMode {
    /// raw bytes at the end of the file, prior content never read
    #[default]
    Append,
    /// Just before the `</ul>` of the last list that is not nested in another list.
    ///
    /// Falls back to `Append` when there is no such list, or when it is never
    /// closed, in which case the end of the file is already inside it.
    Insert,
}

#[derive(Eq, PartialEq, Debug)]
pub enum Error {
    EntryNotPlaced(PathBuf),
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Self::EntryNotPlaced(path) => write!(
                f,
                "no closing tag found for the target list in {}, index left untouched",
                path.display()
            ),
        }
    }
}

const LIST_SELECTOR: &str = "ul";

/// a top-level list, by the order of its start tag among all lists
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
struct ListPosition {
    ordinal: usize,
    closed: bool,
}

/// The aggregating page linking every generated stub.
#[derive(Eq, PartialEq, Debug)]
pub struct IndexFile {
    path: PathBuf,
    escape: bool,
}

impl IndexFile {
    pub fn new(path: PathBuf, escape: bool) -> Self {
        IndexFile { path, escape }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn fragment(&self, entry: &str) -> String {
        format!("<li>{}</li>", substitute(entry, self.escape))
    }

    pub fn add(&self, entry: &str, mode: IndexMode) -> Result<()> {
        match mode {
            IndexMode::Append => self.append(entry),
            IndexMode::Insert => self.insert(entry),
        }
    }

    /// append the entry, creating the file if absent; duplicates are kept
    pub fn append(&self, entry: &str) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .context(format!("open(\"{}\")", self.path.display()))?;

        f.write_all(self.fragment(entry).as_bytes())
            .context(format!("write(\"{}\")", self.path.display()))?;

        Ok(())
    }

    /// rewrite the whole page with the entry as the last item of its last top-level list
    pub fn insert(&self, entry: &str) -> Result<()> {
        let mut src_buf = Vec::new();

        match File::open(&self.path) {
            Ok(mut f) => {
                f.read_to_end(&mut src_buf)
                    .context(format!("read(\"{}\")", self.path.display()))?;
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(index = %self.path.display(), "no index yet, appending");
                return self.append(entry);
            }
            Err(e) => {
                return Err(
                    anyhow::Error::from(e).context(format!("open(\"{}\")", self.path.display()))
                );
            }
        }

        let target = match last_top_level_list(&src_buf)? {
            Some(ListPosition { closed: true, ordinal }) => ordinal,
            Some(ListPosition { closed: false, .. }) => {
                debug!(index = %self.path.display(), "last list is still open, appending");
                return self.append(entry);
            }
            None => {
                debug!(index = %self.path.display(), "no list in index, appending");
                return self.append(entry);
            }
        };

        let dst_buf = insert_before_end_tag(&src_buf, target, &self.fragment(entry))?
            .ok_or_else(|| Error::EntryNotPlaced(self.path.clone()))?;

        self.replace(&dst_buf)
    }

    /// swap in the new content in one rename, so a failed write leaves the old index intact
    fn replace(&self, content: &[u8]) -> Result<()> {
        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let permissions = fs::metadata(&self.path)
            .context(format!("metadata(\"{}\")", self.path.display()))?
            .permissions();

        let mut tmp =
            NamedTempFile::new_in(dir).context(format!("tempfile(\"{}\")", dir.display()))?;
        tmp.write_all(content)
            .context(format!("write(\"{}\")", tmp.path().display()))?;
        tmp.as_file()
            .set_permissions(permissions)
            .context(format!("chmod(\"{}\")", tmp.path().display()))?;

        tmp.persist(&self.path)
            .context(format!("rename(\"{}\")", self.path.display()))?;

        Ok(())
    }
}

fn last_top_level_list(html: &[u8]) -> Result<Option<ListPosition>> {
    let depth = Rc::new(Cell::new(0_usize));
    let top_level = Rc::new(RefCell::new(Vec::<ListPosition>::new()));
    let mut ordinal = 0_usize;

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![element!(LIST_SELECTOR, |el| {
                ordinal += 1;
                let outermost = depth.get() == 0;
                depth.set(depth.get() + 1);
                if outermost {
                    top_level.borrow_mut().push(ListPosition {
                        ordinal,
                        closed: false,
                    });
                }

                let depth = Rc::clone(&depth);
                let top_level = Rc::clone(&top_level);
                el.on_end_tag(move |_end| {
                    depth.set(depth.get().saturating_sub(1));
                    if outermost {
                        // nested lists are never recorded, so the last one is ours
                        if let Some(list) = top_level.borrow_mut().last_mut() {
                            list.closed = true;
                        }
                    }
                    Ok(())
                })?;
                Ok(())
            })],
            ..Settings::default()
        },
        |_c: &[u8]| (), // only scanning
    );

    rewriter.write(html)?;
    rewriter.end()?;

    let last = top_level.borrow().last().copied();
    Ok(last)
}

/// `None` if the list's end tag never came, so nothing was inserted
fn insert_before_end_tag(
    html: &[u8],
    ordinal: usize,
    fragment: &str,
) -> Result<Option<Vec<u8>>> {
    let inserted = Rc::new(Cell::new(false));
    let mut seen = 0_usize;
    let mut dst_buf = Vec::new();

    let mut rewriter = HtmlRewriter::new(
        Settings {
            element_content_handlers: vec![element!(LIST_SELECTOR, |el| {
                seen += 1;
                if seen == ordinal {
                    let fragment = fragment.to_owned();
                    let inserted = Rc::clone(&inserted);
                    el.on_end_tag(move |end| {
                        end.before(&fragment, ContentType::Html);
                        inserted.set(true);
                        Ok(())
                    })?;
                }
                Ok(())
            })],
            ..Settings::default()
        },
        |c: &[u8]| dst_buf.extend_from_slice(c),
    );

    rewriter.write(html)?;
    rewriter.end()?;

    Ok(inserted.get().then_some(dst_buf))
}
