use std::path::Path;

/// Relative link from directory `from` to `to`, always with `/` separators.
///
/// Falls back to `to` itself when no relative path exists (e.g. one path is
/// absolute and the other is not).
pub fn relative_link(from: &Path, to: &Path) -> String {
    let relative = pathdiff::diff_paths(to, from).unwrap_or_else(|| to.to_path_buf());
    normalize_path_separator(&relative.to_string_lossy())
}

// Helper function for cross-platform path comparison
pub fn normalize_path_separator(s: &str) -> String {
    s.replace('\\', "/")
}
