use std::fs;
use std::path::Path;

use tempfile::TempDir;
use test_log::test;
use tmpl::error::FailureKind;
use tmpl::renderer::{MiniJinjaRenderer, NO_VALUE};
use tmpl::spec::Spec;
use tmpl::template::{DirNode, FileNode, TemplateTree};
use tmpl::vars::VariableMap;

const NESTED_SPEC: &str = r#"
variables:
  name: World
template:
  dirs:
    - name: dirA
      files:
        - name: file1.txt
          content: "Hello {{ name }}"
      dirs:
        - name: dirB
          files:
            - name: file2.txt
              content: "{{ yell(name) }}"
"#;

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn test_builds_nested_tree() {
    let root = TempDir::new().unwrap();
    let cwd_before = std::env::current_dir().unwrap();

    let spec: Spec = NESTED_SPEC.parse().unwrap();
    spec.build(root.path()).unwrap();

    assert_eq!(read(root.path().join("dirA/file1.txt")), "Hello World");
    assert_eq!(read(root.path().join("dirA/dirB/file2.txt")), "WORLD");
    assert_eq!(std::env::current_dir().unwrap(), cwd_before);
}

#[test]
fn test_generated_tree_matches_expected() {
    let root = TempDir::new().unwrap();
    let expected = TempDir::new().unwrap();
    fs::create_dir_all(expected.path().join("dirA/dirB")).unwrap();
    fs::write(expected.path().join("dirA/file1.txt"), "Hello World").unwrap();
    fs::write(expected.path().join("dirA/dirB/file2.txt"), "WORLD").unwrap();

    let spec: Spec = NESTED_SPEC.parse().unwrap();
    spec.build(root.path()).unwrap();

    assert!(!dir_diff::is_different(root.path(), expected.path()).unwrap());
}

#[test]
fn test_failing_file_does_not_stop_siblings() {
    let root = TempDir::new().unwrap();
    let spec: Spec = r#"
variables:
  name: World
template:
  dirs:
    - name: dirA
      files:
        - name: file1.txt
          content: "{{ name "
      dirs:
        - name: dirB
          files:
            - name: file2.txt
              content: "Hello {{ name }}"
"#
    .parse()
    .unwrap();

    let err = spec.build(root.path()).unwrap_err();

    assert_eq!(read(root.path().join("dirA/dirB/file2.txt")), "Hello World");
    assert!(!root.path().join("dirA/file1.txt").exists());

    assert_eq!(err.len(), 1);
    let failure = &err.failures()[0];
    assert_eq!(failure.kind, FailureKind::Parse);
    assert_eq!(failure.path, root.path().join("dirA/file1.txt"));

    let report = err.to_string();
    assert!(report.contains("file1.txt"));
    assert!(!report.contains("file2.txt"));
}

#[test]
fn test_failures_are_reported_in_traversal_order() {
    let root = TempDir::new().unwrap();
    let tree = TemplateTree {
        files: vec![
            FileNode { name: "bad.txt".into(), content: "{{ nope(x) }}".into() },
            FileNode { name: "good.txt".into(), content: "ok".into() },
        ],
        dirs: vec![
            DirNode { name: "../escape".into(), files: vec![], dirs: vec![] },
            DirNode {
                name: "sub".into(),
                files: vec![FileNode { name: "broken.txt".into(), content: "{% if %}".into() }],
                dirs: vec![],
            },
        ],
    };

    let err = tree.build(root.path(), &VariableMap::new(), &MiniJinjaRenderer::new()).unwrap_err();

    let kinds: Vec<_> = err.failures().iter().map(|f| f.kind).collect();
    assert_eq!(kinds, [FailureKind::Execute, FailureKind::InvalidName, FailureKind::Parse]);
    assert_eq!(read(root.path().join("good.txt")), "ok");
    assert!(!root.path().parent().unwrap().join("escape").exists());
}

#[test]
fn test_missing_variable_renders_sentinel() {
    let root = TempDir::new().unwrap();
    let spec: Spec = r#"
template:
  files:
    - name: missing.txt
      content: "{{ missing }}"
"#
    .parse()
    .unwrap();

    spec.build(root.path()).unwrap();

    assert_eq!(read(root.path().join("missing.txt")), NO_VALUE);
}

#[test]
fn test_building_twice_succeeds() {
    let root = TempDir::new().unwrap();
    let spec: Spec = NESTED_SPEC.parse().unwrap();

    spec.build(root.path()).unwrap();
    spec.build(root.path()).unwrap();

    assert_eq!(read(root.path().join("dirA/dirB/file2.txt")), "WORLD");
}

#[test]
fn test_existing_file_is_truncated() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join("notes.txt"), "a much longer previous content").unwrap();

    let file = FileNode { name: "notes.txt".into(), content: "new".into() };
    file.build(root.path(), &VariableMap::new(), &MiniJinjaRenderer::new()).unwrap();

    assert_eq!(read(root.path().join("notes.txt")), "new");
}

#[test]
fn test_directory_creation_failure_skips_children() {
    let root = TempDir::new().unwrap();
    // A regular file where the directory should go.
    fs::write(root.path().join("src"), "").unwrap();

    let dir = DirNode {
        name: "src".into(),
        files: vec![FileNode { name: "main.rs".into(), content: "fn main() {}".into() }],
        dirs: vec![],
    };

    let err = dir.build(root.path(), &VariableMap::new(), &MiniJinjaRenderer::new()).unwrap_err();

    assert_eq!(err.len(), 1);
    assert_eq!(err.failures()[0].kind, FailureKind::CreateDir);
}

#[test]
fn test_overrides_win_over_spec_variables() {
    let root = TempDir::new().unwrap();
    let mut spec: Spec = NESTED_SPEC.parse().unwrap();
    let overrides = tmpl::vars::parse_key_values(["name=tmpl"]).unwrap();

    spec.merge_variables(&overrides);
    spec.build(root.path()).unwrap();

    assert_eq!(read(root.path().join("dirA/file1.txt")), "Hello tmpl");
}

#[test]
fn test_block_content_keeps_trailing_newline() {
    let root = TempDir::new().unwrap();
    let spec: Spec = r#"
variables:
  project: demo
template:
  files:
    - name: README.md
      content: |
        # {{ project }}
"#
    .parse()
    .unwrap();

    spec.build(root.path()).unwrap();

    assert_eq!(read(root.path().join("README.md")), "# demo\n");
}

#[test]
fn test_file_creation_failure_does_not_stop_siblings() {
    let root = TempDir::new().unwrap();
    // A directory where the file should go.
    fs::create_dir(root.path().join("notes.txt")).unwrap();

    let tree = TemplateTree {
        files: vec![
            FileNode { name: "notes.txt".into(), content: "lost".into() },
            FileNode { name: "after.txt".into(), content: "kept".into() },
        ],
        dirs: vec![],
    };

    let err = tree.build(root.path(), &VariableMap::new(), &MiniJinjaRenderer::new()).unwrap_err();

    assert_eq!(err.len(), 1);
    assert_eq!(err.failures()[0].kind, FailureKind::CreateFile);
    assert_eq!(err.failures()[0].path, root.path().join("notes.txt"));
    assert_eq!(read(root.path().join("after.txt")), "kept");
}
