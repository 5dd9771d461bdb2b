mod diagnostics;
mod natural;
mod pairing;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use common::{file_name, file_stem, ClientResourceView, MediaKind};
use serde::Serialize;
use tracing::{info, warn};
use walkdir::{DirEntry, WalkDir};

pub use diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
pub use natural::{natural_cmp, natural_sort};
pub use pairing::{first_digits, is_plausible, pair_resources, similarity, ResourcePair};

/// In-memory index of a source tree, keyed by identifier folder.
///
/// Built once by [`Library::build`] and never mutated afterwards. Cloning is
/// cheap and every clone shares the same index.
#[derive(Clone, Debug)]
pub struct Library {
    inner: Arc<LibraryInner>,
}

#[derive(Debug)]
struct LibraryInner {
    root: PathBuf,
    identifiers: Vec<String>,
    groups: HashMap<String, IdentifierGroup>,
    diagnostics: Vec<Diagnostic>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdentifierGroup {
    images: Vec<PathBuf>,
    resources: Vec<ResourcePair>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    pub identifiers: usize,
    pub images: usize,
    pub resources: usize,
    pub diagnostics: usize,
}

impl Library {
    /// Scans `root` and pairs every identifier folder's audio and subtitle
    /// files. Pairing problems go to `sink` and never fail the build; only an
    /// unreadable or non-directory root does.
    pub fn build(root: impl AsRef<Path>, sink: &dyn DiagnosticSink) -> Result<Self, LibraryError> {
        let root = fs::canonicalize(root.as_ref())?;
        if !root.is_dir() {
            return Err(LibraryError::NotADirectory(root));
        }

        let identifier_dirs = collect_identifier_dirs(&root)?;
        info!("Found {} identifier folders in {}", identifier_dirs.len(), root.display());

        let mut identifiers = Vec::with_capacity(identifier_dirs.len());
        let mut groups = HashMap::with_capacity(identifier_dirs.len());
        let mut diagnostics = Vec::new();

        for (identifier, dir) in identifier_dirs {
            let mut found = Vec::new();
            let group = build_group(&identifier, &dir, &mut found);
            for diagnostic in &found {
                sink.report(diagnostic);
            }
            diagnostics.append(&mut found);
            groups.insert(identifier.clone(), group);
            identifiers.push(identifier);
        }

        let library = Self {
            inner: Arc::new(LibraryInner {
                root,
                identifiers,
                groups,
                diagnostics,
            }),
        };
        let stats = library.stats();
        info!(
            "Indexed {} identifiers: {} images, {} resources, {} diagnostics",
            stats.identifiers, stats.images, stats.resources, stats.diagnostics
        );
        Ok(library)
    }

    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    /// Identifiers in discovery order.
    pub fn identifiers(&self) -> &[String] {
        &self.inner.identifiers
    }

    /// One page of [`Library::identifiers`]. Pages past the end are empty.
    pub fn page(&self, page: usize, page_size: usize) -> &[String] {
        let identifiers = self.identifiers();
        let start = page.saturating_mul(page_size);
        if start >= identifiers.len() {
            return &[];
        }
        let end = start.saturating_add(page_size).min(identifiers.len());
        &identifiers[start..end]
    }

    pub fn group(&self, identifier: &str) -> Result<&IdentifierGroup, LookupError> {
        self.inner
            .groups
            .get(identifier)
            .ok_or_else(|| LookupError::UnknownIdentifier(identifier.to_string()))
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.inner.diagnostics
    }

    pub fn stats(&self) -> LibraryStats {
        let groups = self.inner.groups.values();
        let (images, resources) = groups.fold((0, 0), |(images, resources), group| {
            (images + group.images.len(), resources + group.resources.len())
        });
        LibraryStats {
            identifiers: self.inner.identifiers.len(),
            images,
            resources,
            diagnostics: self.inner.diagnostics.len(),
        }
    }
}

impl IdentifierGroup {
    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    pub fn resources(&self) -> &[ResourcePair] {
        &self.resources
    }

    pub fn image_path(&self, index: usize) -> Result<&Path, LookupError> {
        self.images
            .get(index)
            .map(PathBuf::as_path)
            .ok_or(LookupError::IndexOutOfRange {
                index,
                len: self.images.len(),
            })
    }

    pub fn resource_pair(&self, index: usize) -> Result<&ResourcePair, LookupError> {
        self.resources
            .get(index)
            .ok_or(LookupError::IndexOutOfRange {
                index,
                len: self.resources.len(),
            })
    }

    /// Names only: image file names and audio stems, never a directory.
    pub fn client_view(&self) -> ClientResourceView {
        ClientResourceView {
            images: self.images.iter().map(|path| file_name(path)).collect(),
            resources: self
                .resources
                .iter()
                .map(|pair| file_stem(&pair.audio))
                .collect(),
        }
    }
}

#[derive(Debug)]
pub enum LibraryError {
    Io(std::io::Error),
    NotADirectory(PathBuf),
}

impl std::fmt::Display for LibraryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LibraryError::Io(err) => write!(f, "io error: {}", err),
            LibraryError::NotADirectory(path) => {
                write!(f, "not a directory: {}", path.display())
            }
        }
    }
}

impl std::error::Error for LibraryError {}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::Io(err)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LookupError {
    UnknownIdentifier(String),
    IndexOutOfRange { index: usize, len: usize },
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupError::UnknownIdentifier(identifier) => {
                write!(f, "unknown identifier: {}", identifier)
            }
            LookupError::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range ({} entries)", index, len)
            }
        }
    }
}

impl std::error::Error for LookupError {}

fn collect_identifier_dirs(root: &Path) -> Result<Vec<(String, PathBuf)>, LibraryError> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Skipping unreadable entry in {}: {}", root.display(), err);
                continue;
            }
        };
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                warn!("Skipping identifier folder with a non-UTF-8 name: {:?}", raw);
                continue;
            }
        };
        if name.starts_with('.') {
            continue;
        }
        dirs.push((name, path));
    }
    dirs.sort_by(|a, b| natural_cmp(&a.0, &b.0));
    Ok(dirs)
}

fn build_group(identifier: &str, dir: &Path, diagnostics: &mut Vec<Diagnostic>) -> IdentifierGroup {
    let mut images = Vec::new();
    let mut audio = Vec::new();
    let mut subtitles = Vec::new();

    let walker = WalkDir::new(dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Skipping unreadable path under {}: {}", dir.display(), err);
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        match MediaKind::from_path(path) {
            MediaKind::Image => images.push(path.to_path_buf()),
            MediaKind::Audio => audio.push(path.to_path_buf()),
            MediaKind::Subtitle => subtitles.push(path.to_path_buf()),
            MediaKind::Unclassified => {}
        }
    }

    natural_sort(&mut audio);
    natural_sort(&mut subtitles);
    let resources = pair_resources(identifier, audio, subtitles, diagnostics);

    IdentifierGroup { images, resources }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}
