// Small filesystem helpers shared by the command builder and the runner
use std::path::{Path, PathBuf};

/// File extensions and basenames treated as Ruby sources when filtering
/// folder checks.
const RUBY_EXTENSIONS: &[&str] = &["rb", "rake", "gemspec", "ru"];
const RUBY_BASENAMES: &[&str] = &["Gemfile", "Rakefile"];

/// Returns true iff `path` names a regular file the current user may execute.
///
/// This guards interpreter-manager resolution: a configured rvm/rbenv path
/// that is missing or not executable silently falls through to the bare
/// `rubocop` command instead of producing a confusing child-process failure.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    match path.metadata() {
        Ok(metadata) => metadata.is_file() && metadata.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

#[cfg(not(unix))]
pub fn is_executable(path: &Path) -> bool {
    // Windows has no execute bit; existence of a regular file is the best
    // cheap approximation.
    path.is_file()
}

/// Returns true for files RuboCop would lint.
pub fn is_ruby_file(path: &Path) -> bool {
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        if RUBY_EXTENSIONS.contains(&ext) {
            return true;
        }
    }
    if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
        return RUBY_BASENAMES.contains(&name);
    }
    false
}

/// Expand a leading `~/` to the user's home directory.
///
/// Paths without a tilde prefix are returned unchanged, as are paths when no
/// home directory can be determined.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Some(text) = path.to_str() else {
        return path.to_path_buf();
    };

    if text == "~" {
        return dirs::home_dir().unwrap_or_else(|| path.to_path_buf());
    }

    if let Some(rest) = text.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }

    path.to_path_buf()
}
