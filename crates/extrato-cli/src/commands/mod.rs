pub mod parse;
pub mod report;

use std::path::Path;

/// Display name for a batch input: the file name, falling back to the full
/// path for odd inputs like "..".
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
