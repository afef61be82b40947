use std::cmp::Ordering;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, info, warn};

use crate::entry::{Entry, ListItem, Listing};
use crate::error::FsError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FileContent {
    pub(crate) path: PathBuf,
    pub(crate) text: String,
}

impl FileContent {
    pub(crate) fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

pub(crate) fn list_dir(dir: &Path) -> Listing {
    let mut dirs = Vec::new();
    let mut files = Vec::new();
    match fs::read_dir(dir) {
        Ok(read) => {
            for dent in read.filter_map(Result::ok) {
                let name = dent.file_name().to_string_lossy().to_string();
                if name.starts_with('.') {
                    continue;
                }
                let path = dent.path();
                // Follows symlinks; a dangling link is listed as a file.
                let is_dir = fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false);
                let entry = Entry { path, name, is_dir };
                if is_dir {
                    dirs.push(entry);
                } else {
                    files.push(entry);
                }
            }
        }
        Err(err) => warn!(dir = %dir.display(), error = %err, "cannot read directory"),
    }
    dirs.sort_by(|a, b| compare_names(&a.name, &b.name));
    files.sort_by(|a, b| compare_names(&a.name, &b.name));

    let mut items: Vec<ListItem> = dirs
        .into_iter()
        .chain(files)
        .map(ListItem::Entry)
        .collect();
    if items.is_empty() {
        items.push(ListItem::EmptyFolder);
    }
    debug!(dir = %dir.display(), count = items.len(), "listed directory");
    Listing {
        dir: dir.to_path_buf(),
        items,
    }
}

/// Case-insensitive order, with the raw name as tie-break.
pub(crate) fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Storage roots offered on the first screen. Configured roots win; otherwise
/// the home directory and the filesystem root.
pub(crate) fn storage_roots(configured: &[PathBuf]) -> Listing {
    let candidates = if configured.is_empty() {
        default_roots()
    } else {
        configured.to_vec()
    };
    let mut items: Vec<ListItem> = Vec::new();
    for path in candidates {
        let seen = items
            .iter()
            .any(|item| item.entry().is_some_and(|e| e.path == path));
        if seen || !path.is_dir() {
            continue;
        }
        items.push(ListItem::Entry(Entry {
            name: path.display().to_string(),
            path,
            is_dir: true,
        }));
    }
    if items.is_empty() {
        items.push(ListItem::EmptyFolder);
    }
    Listing {
        dir: PathBuf::new(),
        items,
    }
}

fn default_roots() -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = dirs::home_dir().into_iter().collect();
    if cfg!(unix) {
        roots.push(PathBuf::from("/"));
    }
    roots
}

pub(crate) fn read_text(path: &Path) -> Result<FileContent, FsError> {
    let file = File::open(path).map_err(|e| FsError::from_io("open", path, e))?;
    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    let mut text = String::new();
    loop {
        bytes.clear();
        let n = reader
            .read_until(b'\n', &mut bytes)
            .map_err(|e| FsError::from_io("read", path, e))?;
        if n == 0 {
            break;
        }
        let line = std::str::from_utf8(&bytes).map_err(|_| FsError::NotText {
            path: path.to_path_buf(),
        })?;
        text.push_str(line);
    }
    debug!(path = %path.display(), bytes = text.len(), "read file");
    Ok(FileContent {
        path: path.to_path_buf(),
        text,
    })
}

pub(crate) fn write_text(path: &Path, text: &str) -> Result<(), FsError> {
    let write = || -> io::Result<()> {
        let mut file = File::create(path)?;
        file.write_all(text.as_bytes())?;
        file.flush()
    };
    write().map_err(|source| FsError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = text.len(), "saved file");
    Ok(())
}

pub(crate) fn is_writable_dir(dir: &Path) -> bool {
    fs::metadata(dir)
        .map(|m| m.is_dir() && !m.permissions().readonly())
        .unwrap_or(false)
}

/// True for a directory itself, false for a link pointing at one.
pub(crate) fn is_real_dir(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.is_dir())
}

pub(crate) fn default_file_name() -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("New File {millis}.txt")
}

pub(crate) fn create_new_file(dir: &Path) -> Result<PathBuf, FsError> {
    if !is_writable_dir(dir) {
        return Err(FsError::PermissionDenied {
            path: dir.to_path_buf(),
        });
    }
    let path = dir.join(default_file_name());
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&path)
        .map_err(|e| FsError::from_io("create file", &path, e))?;
    info!(path = %path.display(), "created file");
    Ok(path)
}

/// Trims and checks a user-typed name.
pub(crate) fn validate_name(input: &str) -> Result<String, FsError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(FsError::EmptyInput);
    }
    if name.starts_with('.') {
        return Err(FsError::NameInvalid {
            reason: "Filename cannot start with a dot".to_string(),
        });
    }
    if name.contains('/') || name.contains(std::path::MAIN_SEPARATOR) {
        return Err(FsError::NameInvalid {
            reason: "Filename cannot contain a path separator".to_string(),
        });
    }
    Ok(name.to_string())
}

pub(crate) fn rename_entry(target: &Path, input: &str) -> Result<PathBuf, FsError> {
    let mut name = validate_name(input)?;
    let Some(parent) = target.parent() else {
        return Err(FsError::NameInvalid {
            reason: "Cannot rename a storage root".to_string(),
        });
    };
    if !target.is_dir() && Path::new(&name).extension().is_none() {
        name.push_str(".txt");
    }
    let renamed = parent.join(&name);
    if fs::symlink_metadata(&renamed).is_ok() {
        return Err(FsError::NameCollision { path: renamed });
    }
    fs::rename(target, &renamed).map_err(|e| FsError::from_io("rename", target, e))?;
    info!(from = %target.display(), to = %renamed.display(), "renamed");
    Ok(renamed)
}

pub(crate) fn delete_entry(path: &Path) -> Result<(), FsError> {
    let parent = path.parent().unwrap_or(path);
    if !is_writable_dir(parent) {
        return Err(FsError::PermissionDenied {
            path: parent.to_path_buf(),
        });
    }
    let meta = fs::symlink_metadata(path).map_err(|e| FsError::from_io("delete", path, e))?;
    // A link to a directory is unlinked, never followed.
    if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
    .map_err(|e| FsError::from_io("delete", path, e))?;
    info!(path = %path.display(), "deleted");
    Ok(())
}
