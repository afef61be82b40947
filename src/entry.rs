use std::path::{Path, PathBuf};

pub(crate) const EMPTY_FOLDER_TEXT: &str = "This folder is empty";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Entry {
    pub(crate) path: PathBuf,
    pub(crate) name: String,
    pub(crate) is_dir: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ListItem {
    Entry(Entry),
    EmptyFolder,
}

impl ListItem {
    pub(crate) fn label(&self) -> &str {
        match self {
            Self::Entry(entry) => &entry.name,
            Self::EmptyFolder => EMPTY_FOLDER_TEXT,
        }
    }

    pub(crate) fn entry(&self) -> Option<&Entry> {
        match self {
            Self::Entry(entry) => Some(entry),
            Self::EmptyFolder => None,
        }
    }
}

/// One directory as shown in the browser. Never empty: an empty or
/// unreadable directory holds a single `EmptyFolder`.
#[derive(Debug, Clone)]
pub(crate) struct Listing {
    pub(crate) dir: PathBuf,
    pub(crate) items: Vec<ListItem>,
}

impl Listing {
    pub(crate) fn position_of(&self, path: &Path) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.entry().is_some_and(|e| e.path == path))
    }

    #[cfg(test)]
    pub(crate) fn names(&self) -> Vec<&str> {
        self.items.iter().map(ListItem::label).collect()
    }
}
