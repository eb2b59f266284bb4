//! Path validation and resolution of user-typed path tokens.
//!
//! None of these functions touch the filesystem except through `Path`
//! methods; none of them fail. An unresolvable token comes back as `None` and
//! the caller keeps its current root.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

/// Token meaning "one level up".
pub const UP_TOKEN: &str = "..";

/// Option flags that take a numeric value and are never paths.
pub const VALUE_FLAGS: [&str; 2] = ["-p", "-l"];

/// Volume separator that marks a path as absolute on drive-letter systems.
const VOLUME_SEPARATOR: char = ':';

/// Check that a string may be used as a path.
///
/// Empty strings and strings containing NUL or any other ASCII control
/// character are rejected.
pub fn is_path_valid(path: &str) -> bool {
    !path.is_empty() && !path.chars().any(|c| c.is_ascii_control())
}

/// Whether the token is the "go up one level" token.
pub fn is_up_token(token: &str) -> bool {
    token == UP_TOKEN
}

/// Whether a raw argument consists only of `.`, `/` and `\`.
///
/// Such arguments resolve to the current directory or one of its ancestors,
/// so destructive directory commands refuse them.
pub fn is_dots_and_slashes_only(raw: &str) -> bool {
    raw.chars().all(|c| matches!(c, '.' | '/' | '\\'))
}

/// Find the `ordinal`-th (1-based) path-looking word after the command name.
///
/// Integers and the value flags in [`VALUE_FLAGS`] are skipped, so in
/// `copy -p 3 a.txt backup` ordinal 1 is `a.txt` and ordinal 2 is `backup`.
pub fn find_path(words: &[String], ordinal: usize) -> Option<String> {
    if ordinal == 0 {
        return None;
    }

    words
        .iter()
        .skip(1)
        .filter(|word| word.parse::<i64>().is_err())
        .filter(|word| !VALUE_FLAGS.contains(&word.as_str()))
        .filter(|word| is_path_valid(word))
        .nth(ordinal - 1)
        .cloned()
}

/// Append a separator to a bare volume root such as `d:`.
pub fn normalize_volume_root(path: &str) -> String {
    if path.ends_with(VOLUME_SEPARATOR) {
        format!("{path}{MAIN_SEPARATOR}")
    } else {
        path.to_string()
    }
}

/// Whether `rel` should be taken verbatim instead of joined to a root.
///
/// A path counts as absolute when the platform says so. On Windows a token
/// carrying a volume separator (`d:`, `d:foo`) is absolute as well; elsewhere
/// `:` is an ordinary filename character.
pub fn is_absolute_token(rel: &str) -> bool {
    Path::new(rel).is_absolute() || (cfg!(windows) && rel.contains(VOLUME_SEPARATOR))
}

/// Resolve `rel` against `root`.
///
/// * empty → `root`
/// * `..` → parent of `root` (or `root` itself when it has no parent)
/// * absolute (see [`is_absolute_token`]) → `rel`
/// * otherwise → `root` joined with `rel`
pub fn make_full_path(root: &Path, rel: &str) -> PathBuf {
    if rel.is_empty() {
        return root.to_path_buf();
    }

    if is_up_token(rel) {
        return root
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf());
    }

    if is_absolute_token(rel) {
        return PathBuf::from(normalize_volume_root(rel));
    }

    root.join(rel)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_is_path_valid() {
        assert!(is_path_valid("docs/readme.md"));
        assert!(is_path_valid(".."));
        assert!(!is_path_valid(""));
        assert!(!is_path_valid("bad\0name"));
        assert!(!is_path_valid("tab\tname"));
    }

    #[test]
    fn test_find_path_skips_numbers_and_flags() {
        let input = words(&["copy", "-p", "3", "a.txt", "backup"]);
        assert_eq!(find_path(&input, 1).as_deref(), Some("a.txt"));
        assert_eq!(find_path(&input, 2).as_deref(), Some("backup"));
        assert_eq!(find_path(&input, 3), None);
    }

    #[test]
    fn test_find_path_ignores_command_word() {
        let input = words(&["dir"]);
        assert_eq!(find_path(&input, 1), None);

        let input = words(&["dir", ".."]);
        assert_eq!(find_path(&input, 1).as_deref(), Some(".."));
    }

    #[test]
    fn test_find_path_zero_ordinal() {
        let input = words(&["dir", "a"]);
        assert_eq!(find_path(&input, 0), None);
    }

    #[test]
    fn test_make_full_path_empty_is_root() {
        let root = Path::new("/home/user");
        assert_eq!(make_full_path(root, ""), PathBuf::from("/home/user"));
    }

    #[test]
    fn test_make_full_path_up_is_parent() {
        let root = Path::new("/home/user");
        assert_eq!(make_full_path(root, ".."), PathBuf::from("/home"));
        assert_eq!(make_full_path(Path::new("/"), ".."), PathBuf::from("/"));
    }

    #[test]
    fn test_make_full_path_joins_relative() {
        let root = Path::new("/home/user");
        assert_eq!(make_full_path(root, "docs"), PathBuf::from("/home/user/docs"));

        let root = Path::new("/home/user/");
        assert_eq!(make_full_path(root, "docs"), PathBuf::from("/home/user/docs"));
    }

    #[test]
    fn test_make_full_path_absolute_verbatim() {
        let root = Path::new("/home/user");
        assert_eq!(make_full_path(root, "/etc"), PathBuf::from("/etc"));
    }

    #[test]
    fn test_volume_root_normalized() {
        assert_eq!(normalize_volume_root("d:"), format!("d:{MAIN_SEPARATOR}"));
        assert_eq!(normalize_volume_root("/tmp"), "/tmp");
    }

    #[test]
    fn test_dots_and_slashes_guard() {
        assert!(is_dots_and_slashes_only(".."));
        assert!(is_dots_and_slashes_only("./.."));
        assert!(is_dots_and_slashes_only("\\"));
        assert!(!is_dots_and_slashes_only("../docs"));
        assert!(!is_dots_and_slashes_only(".git"));
    }
}
