use super::*;
use tempfile::TempDir;

fn touch(path: &Path) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "").unwrap();
}

#[test]
fn test_find_under_recurses_and_sorts() {
    let dir = TempDir::new().unwrap();
    touch(&dir.path().join("shop/migrations/__init__.py"));
    touch(&dir.path().join("accounts/migrations/__init__.py"));
    touch(&dir.path().join("migrations/__init__.py"));

    let found = find_under(dir.path(), "**/migrations/__init__.py");
    let relative: Vec<_> = found
        .iter()
        .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
        .collect();
    assert_eq!(
        relative,
        vec![
            PathBuf::from("accounts/migrations/__init__.py"),
            PathBuf::from("migrations/__init__.py"),
            PathBuf::from("shop/migrations/__init__.py"),
        ]
    );
}

#[test]
fn test_find_under_skips_hidden_and_vendored() {
    let dir = TempDir::new().unwrap();
    touch(&dir.path().join(".venv/lib/django/migrations/__init__.py"));
    touch(&dir.path().join("lib/site-packages/pkg/migrations/__init__.py"));
    touch(&dir.path().join("app/migrations/__init__.py"));

    let found = find_under(dir.path(), "**/migrations/__init__.py");
    assert_eq!(found.len(), 1);
    assert!(found[0].ends_with("app/migrations/__init__.py"));
}

#[test]
fn test_python_files_sorted_and_filtered() {
    let dir = TempDir::new().unwrap();
    touch(&dir.path().join("0002_b.py"));
    touch(&dir.path().join("0001_a.py"));
    touch(&dir.path().join("README.md"));
    std::fs::create_dir(dir.path().join("sub.py")).unwrap();

    let files = python_files(dir.path()).unwrap();
    let names: Vec<_> = files.iter().map(|p| file_stem(p)).collect();
    assert_eq!(names, vec!["0001_a", "0002_b"]);
}

#[test]
fn test_python_files_missing_dir() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        python_files(&dir.path().join("nope")),
        Err(DiscoverError::Io { .. })
    ));
}

#[test]
fn test_read_source_replaces_invalid_utf8() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("m.py");
    std::fs::write(&path, b"name = '\xff'\n").unwrap();
    assert!(read_source(&path).unwrap().contains('\u{FFFD}'));
}
