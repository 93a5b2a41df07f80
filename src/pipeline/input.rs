//! Input loading: read the Markdown source into memory.
//!
//! The whole file is loaded up front and the handle is closed before any
//! transformation begins — there are no partial-read semantics anywhere in
//! the pipeline. Absence of the file is a terminal precondition failure
//! detected here, before any other work happens, so a missing input can
//! never leave a stale or partial output behind.

use crate::error::Md2PdfError;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Read the Markdown document at `path` as UTF-8 text.
pub fn load_document(path: &Path) -> Result<String, Md2PdfError> {
    if !path.is_file() {
        return Err(Md2PdfError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let mut file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => Md2PdfError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => Md2PdfError::FileNotFound {
            path: path.to_path_buf(),
        },
    })?;

    let mut text = String::new();
    file.read_to_string(&mut text).map_err(|e| match e.kind() {
        std::io::ErrorKind::InvalidData => Md2PdfError::InvalidUtf8 {
            path: path.to_path_buf(),
        },
        _ => Md2PdfError::Internal(format!("failed to read '{}': {e}", path.display())),
    })?;

    debug!("Loaded {} bytes from {}", text.len(), path.display());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_utf8_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "# Hello\n\nSome prose.").unwrap();
        let text = load_document(f.path()).unwrap();
        assert!(text.starts_with("# Hello"));
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let err = load_document(Path::new("/definitely/not/here.md")).unwrap_err();
        assert!(matches!(err, Md2PdfError::FileNotFound { .. }));
    }

    #[test]
    fn directory_is_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_document(dir.path()).unwrap_err();
        assert!(matches!(err, Md2PdfError::FileNotFound { .. }));
    }

    #[test]
    fn non_utf8_is_invalid_utf8() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(&[0xff, 0xfe, 0x00, 0x80]).unwrap();
        let err = load_document(f.path()).unwrap_err();
        assert!(matches!(err, Md2PdfError::InvalidUtf8 { .. }));
    }
}
