use std::path::{Path, PathBuf};

/// Expand a leading `~` in paths to the current user's home directory.
///
/// Returns `None` when the path needs expansion but `HOME` is unset, or when
/// it uses the `~username` form, which is not supported.
///
/// # Examples
///
/// ```
/// use cc_manager::utils::path::expand_tilde;
///
/// let path = expand_tilde("plugins").unwrap();
/// assert_eq!(path.to_str(), Some("plugins"));
/// ```
pub fn expand_tilde<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    let path = path.as_ref();
    let path_str = path.to_str()?;

    let Some(after_tilde) = path_str.strip_prefix('~') else {
        return Some(path.to_path_buf());
    };

    if !after_tilde.is_empty() && !after_tilde.starts_with('/') {
        return None;
    }

    let home = home_dir()?;
    Some(home.join(after_tilde.trim_start_matches('/')))
}

/// Get the home directory
pub fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}
