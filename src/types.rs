use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Location {
    Roots,
    Dir(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Browser,
    Document,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PromptMode {
    Rename { target: PathBuf },
}

#[derive(Debug, Clone)]
pub(crate) struct PromptState {
    pub(crate) title: String,
    pub(crate) value: String,
    pub(crate) mode: PromptMode,
}

/// Modal yes/no questions that block other input until answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    None,
    Delete { target: PathBuf, is_dir: bool },
    SaveOnLeave,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Info,
    Error,
}
