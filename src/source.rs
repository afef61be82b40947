use std::path::PathBuf;

use url::Url;

use crate::error::FsError;

/// Resolves user input naming a file, either a plain path or a `file://` URI.
pub(crate) fn resolve(input: &str) -> Result<PathBuf, FsError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(FsError::EmptyInput);
    }
    if !trimmed.contains("://") {
        return Ok(PathBuf::from(trimmed));
    }
    let url = Url::parse(trimmed).map_err(|e| FsError::NameInvalid {
        reason: format!("Invalid URI: {e}"),
    })?;
    if url.scheme() != "file" {
        return Err(FsError::NameInvalid {
            reason: format!("Unsupported URI scheme '{}'", url.scheme()),
        });
    }
    url.to_file_path().map_err(|()| FsError::NameInvalid {
        reason: format!("URI does not name a local file: {url}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_pass_through() {
        assert_eq!(
            resolve(" notes/todo.txt ").unwrap(),
            PathBuf::from("notes/todo.txt")
        );
    }

    #[cfg(unix)]
    #[test]
    fn file_uri_is_decoded() {
        assert_eq!(
            resolve("file:///tmp/My%20Notes.txt").unwrap(),
            PathBuf::from("/tmp/My Notes.txt")
        );
    }

    #[test]
    fn other_schemes_are_rejected() {
        let err = resolve("https://example.com/a.txt").unwrap_err();
        assert!(matches!(err, FsError::NameInvalid { .. }));
    }

    #[test]
    fn blank_input_is_empty() {
        assert!(matches!(resolve("   "), Err(FsError::EmptyInput)));
    }
}
