//! Font discovery and loading.
//!
//! ## Why discovery at all?
//!
//! `genpdf` embeds TTF fonts into the output file; it has no access to
//! built-in PDF fonts. That makes the font files a runtime artefact the
//! binary must locate, much like a native library: we probe an explicit
//! override first, then an environment variable, then the well-known system
//! locations where distribution packages install the Liberation families.
//! A miss is a dedicated [`Md2PdfError::FontsNotFound`] carrying every path
//! we tried plus an install hint, so the user never has to strace us.
//!
//! Liberation is the target family because its metrics match Helvetica/Arial
//! (the preset the style sheet was designed around) and because every major
//! distribution packages it under a predictable file naming scheme
//! (`LiberationSans-Regular.ttf` etc.) that matches what
//! [`genpdf::fonts::from_files`] expects.

use crate::error::Md2PdfError;
use genpdf::fonts::{self, FontData, FontFamily};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Environment variable overriding the font directory.
pub const FONT_DIR_ENV: &str = "MD2PDF_FONT_DIR";

const SANS_FAMILY: &str = "LiberationSans";
const MONO_FAMILY: &str = "LiberationMono";

/// System directories probed when no override is given.
const SYSTEM_FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/liberation-fonts",
    "/usr/local/share/fonts",
];

/// The loaded font families for one conversion.
pub struct FontSet {
    /// Proportional family for prose and headings.
    pub sans: FontFamily<FontData>,
    /// Monospace family for code.
    pub mono: FontFamily<FontData>,
    /// Directory the families were loaded from.
    pub dir: PathBuf,
}

/// Locate and load the font families.
///
/// Search order:
/// 1. `override_dir` (the config's `font_dir` / the CLI's `--font-dir`)
/// 2. the `MD2PDF_FONT_DIR` environment variable
/// 3. well-known system font directories
///
/// The first directory containing `LiberationSans-Regular.ttf` wins. When
/// the monospace family is missing from that directory, code falls back to
/// the sans family rather than failing the whole conversion.
pub fn discover(override_dir: Option<&Path>) -> Result<FontSet, Md2PdfError> {
    let mut searched: Vec<PathBuf> = Vec::new();

    let env_dir = std::env::var_os(FONT_DIR_ENV).map(PathBuf::from);
    let candidates = override_dir
        .map(Path::to_path_buf)
        .into_iter()
        .chain(env_dir)
        .chain(SYSTEM_FONT_DIRS.iter().map(PathBuf::from));

    for dir in candidates {
        if !dir.join(format!("{SANS_FAMILY}-Regular.ttf")).is_file() {
            searched.push(dir);
            continue;
        }
        debug!("Loading fonts from {}", dir.display());
        return load_from(&dir);
    }

    Err(Md2PdfError::FontsNotFound { searched })
}

fn load_from(dir: &Path) -> Result<FontSet, Md2PdfError> {
    let sans = fonts::from_files(dir, SANS_FAMILY, None).map_err(|e| Md2PdfError::RenderFailed {
        detail: format!("failed to load {SANS_FAMILY} from {}: {e}", dir.display()),
    })?;

    let mono = if dir.join(format!("{MONO_FAMILY}-Regular.ttf")).is_file() {
        fonts::from_files(dir, MONO_FAMILY, None).map_err(|e| Md2PdfError::RenderFailed {
            detail: format!("failed to load {MONO_FAMILY} from {}: {e}", dir.display()),
        })?
    } else {
        warn!(
            "{} has no {MONO_FAMILY} family; code blocks will use {SANS_FAMILY}",
            dir.display()
        );
        fonts::from_files(dir, SANS_FAMILY, None).map_err(|e| Md2PdfError::RenderFailed {
            detail: format!("failed to load {SANS_FAMILY} from {}: {e}", dir.display()),
        })?
    };

    Ok(FontSet {
        sans,
        mono,
        dir: dir.to_path_buf(),
    })
}

/// Whether a usable font directory exists without loading anything.
///
/// Integration tests use this to skip render assertions on machines without
/// the Liberation fonts installed.
pub fn available(override_dir: Option<&Path>) -> bool {
    let env_dir = std::env::var_os(FONT_DIR_ENV).map(PathBuf::from);
    override_dir
        .map(Path::to_path_buf)
        .into_iter()
        .chain(env_dir)
        .chain(SYSTEM_FONT_DIRS.iter().map(PathBuf::from))
        .any(|dir| dir.join(format!("{SANS_FAMILY}-Regular.ttf")).is_file())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fonts_report_searched_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        // An empty override dir falls through to the system locations; on a
        // machine without Liberation installed the error must list it.
        if let Err(Md2PdfError::FontsNotFound { searched }) = discover(Some(tmp.path())) {
            assert!(searched.iter().any(|p| p == tmp.path()));
        }
    }

    #[test]
    fn sans_regular_is_the_discovery_probe() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(!tmp.path().join("LiberationSans-Regular.ttf").exists());
    }

    #[test]
    fn discovered_dir_holds_the_loaded_family() {
        // Only meaningful on machines where discovery succeeds.
        if let Ok(set) = discover(None) {
            assert!(set.dir.join(format!("{SANS_FAMILY}-Regular.ttf")).is_file());
        }
    }
}
