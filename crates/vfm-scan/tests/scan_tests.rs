use std::fs;

use tempfile::TempDir;
use vfm_scan::{DisplayLine, FileLister, LAST_BRANCH, ScanOptions, TreeScanner, get_info};

fn sorted() -> ScanOptions {
    ScanOptions::builder().sort_by_name(true).build().unwrap()
}

/// Build a tree with several sibling groups at different depths.
fn create_test_tree() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    for dir in [
        "alpha/one/deep/deeper",
        "alpha/two",
        "beta",
        "gamma/x",
        "gamma/y",
        "gamma/z/inner",
    ] {
        fs::create_dir_all(root.join(dir)).unwrap();
    }
    fs::write(root.join("readme.md"), "# readme").unwrap();
    fs::write(root.join("alpha/one/file.txt"), "data").unwrap();
    temp
}

/// Depth of a tree line: every level adds a three-column prefix.
fn line_depth(line: &DisplayLine) -> usize {
    let text = line.plain_text();
    let corner = text
        .char_indices()
        .find(|(_, c)| *c == '├' || *c == '└')
        .map(|(i, _)| text[..i].chars().count())
        .unwrap();
    corner / 3 + 1
}

#[test]
fn test_no_line_deeper_than_max_depth() {
    let temp = create_test_tree();
    for max_depth in 1..=4 {
        let scan = TreeScanner::new(sorted()).scan(temp.path(), max_depth).unwrap();
        assert!(
            scan.lines.body().iter().all(|l| line_depth(l) <= max_depth),
            "depth {max_depth} exceeded"
        );
    }
}

#[test]
fn test_one_last_corner_per_sibling_group() {
    let temp = create_test_tree();
    let scan = TreeScanner::new(sorted()).scan(temp.path(), 3).unwrap();
    let lines: Vec<String> = scan.lines.body().iter().map(DisplayLine::plain_text).collect();

    let top_level: Vec<&String> = lines
        .iter()
        .filter(|l| !l.starts_with(' ') && !l.starts_with('│'))
        .collect();
    assert_eq!(top_level.len(), 3);
    assert_eq!(
        top_level.iter().filter(|l| l.starts_with(LAST_BRANCH)).count(),
        1
    );
    assert!(top_level.last().unwrap().starts_with(LAST_BRANCH));

    // gamma's children: x, y, z
    assert!(lines.contains(&"   ├──x".to_string()));
    assert!(lines.contains(&"   ├──y".to_string()));
    assert!(lines.contains(&"   └──z".to_string()));
    assert!(lines.contains(&"      └──inner".to_string()));
}

#[test]
fn test_full_expected_tree() {
    let temp = create_test_tree();
    let scan = TreeScanner::new(sorted()).scan(temp.path(), 2).unwrap();
    let lines: Vec<String> = scan.lines.body().iter().map(DisplayLine::plain_text).collect();
    assert_eq!(
        lines,
        vec![
            "├──alpha",
            "│  ├──one",
            "│  └──two",
            "├──beta",
            "└──gamma",
            "   ├──x",
            "   ├──y",
            "   └──z",
        ]
    );
}

#[test]
fn test_scanner_is_reentrant() {
    let temp = create_test_tree();
    let scanner = TreeScanner::new(sorted());
    let first = scanner.scan(temp.path(), 2).unwrap();
    let second = scanner.scan(temp.path(), 2).unwrap();
    assert_eq!(first.lines, second.lines);
}

#[test]
fn test_files_and_info_agree() {
    let temp = create_test_tree();
    let listing = FileLister::new(sorted()).list(temp.path()).unwrap();
    assert_eq!(listing.lines.plain_lines()[1..], ["readme.md".to_string()]);

    let info = get_info(&temp.path().join("readme.md"));
    assert_eq!(info.header().plain_text(), "File info: readme.md");
}

#[cfg(unix)]
#[test]
fn test_unreadable_branch_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let temp = create_test_tree();
    let locked = temp.path().join("alpha");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Privileged users can read anything; nothing to assert then.
    let readable = fs::read_dir(&locked).is_ok();
    let scan = TreeScanner::new(sorted()).scan(temp.path(), 2).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    if !readable {
        assert_eq!(scan.warnings.len(), 1);
        assert_eq!(scan.warnings[0].path, locked);
        let lines: Vec<String> = scan.lines.body().iter().map(DisplayLine::plain_text).collect();
        assert!(lines.contains(&"├──alpha".to_string()));
        assert!(lines.contains(&"└──gamma".to_string()));
    }
}
