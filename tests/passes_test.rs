use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

use tidydir::cleaner::{Action, CleanMode, Pass};
use tidydir::common::config::Config;
use tidydir::runner::{self, RunPlan, RunReport};
use tidydir::scanner::{walker, DirectorySet};

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

fn set_age(path: &Path, secs_ago: u64) {
    let file = std::fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() - Duration::from_secs(secs_ago))
        .unwrap();
}

fn chmod(path: &Path, mode: u32) {
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).unwrap();
}

fn mode_of(path: &Path) -> u32 {
    std::fs::metadata(path).unwrap().permissions().mode() & 0o777
}

fn run_passes(roots: &[&Path], config: &Config, passes: &[Pass], mode: CleanMode) -> RunReport {
    let extra: Vec<PathBuf> = roots[1..].iter().map(|p| p.to_path_buf()).collect();
    let dirs = DirectorySet::new(roots[0], &extra).unwrap();
    let plan = RunPlan {
        passes: passes.to_vec(),
        mode,
        echo: false,
        show_progress: false,
    };
    runner::run(&dirs, config, &plan).unwrap()
}

fn apply(root: &Path, passes: &[Pass]) -> RunReport {
    run_passes(&[root], &Config::default(), passes, CleanMode::Apply)
}

/// Sorted file names relative to `root`
fn listing(root: &Path) -> Vec<String> {
    let mut names: Vec<String> = walker::collect_files(root)
        .unwrap()
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().display().to_string())
        .collect();
    names.sort();
    names
}

// ─── Same content ─────────────────────────────────────────────────────────────

#[test]
fn test_same_content_keeps_oldest() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.txt");
    let b = dir.path().join("b.txt");
    write(&a, "identical");
    write(&b, "identical");
    set_age(&a, 7200);
    set_age(&b, 60);

    let report = apply(dir.path(), &[Pass::SameContent]);

    assert!(a.exists());
    assert!(!b.exists());
    assert_eq!(report.files_removed, 1);
    assert_eq!(report.bytes_freed, 9);
}

#[test]
fn test_same_content_one_survivor_per_group_across_roots() {
    let one = TempDir::new().unwrap();
    let two = TempDir::new().unwrap();
    let copies = [
        (one.path().join("x1"), 300),
        (one.path().join("deep/x2"), 100),
        (two.path().join("x3"), 500),
    ];
    for (path, age) in &copies {
        write(path, "group x");
        set_age(path, *age);
    }
    write(&two.path().join("y1"), "group y");
    write(&two.path().join("unique"), "alone");
    write(&one.path().join("y2"), "group y");

    run_passes(
        &[one.path(), two.path()],
        &Config::default(),
        &[Pass::SameContent],
        CleanMode::Apply,
    );

    assert!(two.path().join("x3").exists(), "oldest copy survives");
    assert!(!one.path().join("x1").exists());
    assert!(!one.path().join("deep/x2").exists());
    let y_left = [one.path().join("y2"), two.path().join("y1")]
        .iter()
        .filter(|p| p.exists())
        .count();
    assert_eq!(y_left, 1);
    assert!(two.path().join("unique").exists());
}

#[test]
fn test_overlapping_roots_never_delete_the_only_copy() {
    let dir = TempDir::new().unwrap();
    let only = dir.path().join("sub/only.txt");
    write(&only, "one of a kind");

    let sub = dir.path().join("sub");
    let report = run_passes(
        &[dir.path(), sub.as_path()],
        &Config::default(),
        &[Pass::SameContent, Pass::SameName],
        CleanMode::Apply,
    );

    assert!(only.exists());
    assert!(report.actions.is_empty());
}

// ─── Same name ────────────────────────────────────────────────────────────────

#[test]
fn test_same_name_keeps_newest() {
    let one = TempDir::new().unwrap();
    let two = TempDir::new().unwrap();
    let old = one.path().join("notes.md");
    let new = two.path().join("archive/notes.md");
    write(&old, "first draft");
    write(&new, "final");
    set_age(&old, 9000);
    set_age(&new, 10);

    run_passes(
        &[one.path(), two.path()],
        &Config::default(),
        &[Pass::SameName],
        CleanMode::Apply,
    );

    assert!(!old.exists());
    assert!(new.exists());
}

// ─── Invalid symbols ─────────────────────────────────────────────────────────

#[test]
fn test_symbols_renamed_with_defaults() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("bad:name?.txt"), "x");

    apply(dir.path(), &[Pass::InvalidSymbols]);

    assert_eq!(listing(dir.path()), vec!["bad_name_.txt"]);
}

#[test]
fn test_symbols_collision_gets_numbered() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("bad:name?.txt"), "renamed");
    write(&dir.path().join("bad_name_.txt"), "already here");

    let report = apply(dir.path(), &[Pass::InvalidSymbols]);

    assert_eq!(listing(dir.path()), vec!["bad_name_.txt", "bad_name__1.txt"]);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("bad_name__1.txt")).unwrap(),
        "renamed"
    );
    assert_eq!(
        report.actions,
        vec![Action::Renamed {
            pass: Pass::InvalidSymbols,
            from: std::fs::canonicalize(dir.path()).unwrap().join("bad:name?.txt"),
            to: std::fs::canonicalize(dir.path()).unwrap().join("bad_name__1.txt"),
        }]
    );
}

#[test]
fn test_symbols_many_files_sanitizing_to_one_name() {
    let dir = TempDir::new().unwrap();
    for name in ["f:x.txt", "f?x.txt", "f*x.txt", "f$x.txt"] {
        write(&dir.path().join(name), name);
    }

    apply(dir.path(), &[Pass::InvalidSymbols]);

    assert_eq!(
        listing(dir.path()),
        vec!["f_x.txt", "f_x_1.txt", "f_x_2.txt", "f_x_3.txt"]
    );
    let config = Config::default();
    for name in listing(dir.path()) {
        assert!(!config.has_invalid_symbol(std::ffi::OsStr::new(&name)));
    }
}

#[test]
fn test_symbols_in_subdirectories_stay_in_place() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("nested/q#1.log"), "x");

    apply(dir.path(), &[Pass::InvalidSymbols]);

    assert_eq!(listing(dir.path()), vec!["nested/q_1.log"]);
}

#[test]
fn test_symbols_custom_config() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("my file!.txt"), "x");
    let config = Config::from_json(
        r#"{"invalid symbols": [" ", "!"], "character to replace with": "-"}"#,
    )
    .unwrap();

    run_passes(&[dir.path()], &config, &[Pass::InvalidSymbols], CleanMode::Apply);

    assert_eq!(listing(dir.path()), vec!["my-file-.txt"]);
}

// ─── Empty, temporary, permissions ──────────────────────────────────────────

#[test]
fn test_symbols_rename_keeps_non_utf8_bytes() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = TempDir::new().unwrap();
    let original = dir.path().join(OsStr::from_bytes(b"bad:\xff.txt"));
    std::fs::write(&original, "raw").unwrap();

    let report = apply(dir.path(), &[Pass::InvalidSymbols]);

    let expected = dir.path().join(OsStr::from_bytes(b"bad_\xff.txt"));
    assert!(!original.exists());
    assert_eq!(std::fs::read_to_string(&expected).unwrap(), "raw");
    assert_eq!(report.files_renamed, 1);
}

#[test]
fn test_empty_files_removed() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("empty"), "");
    write(&dir.path().join("sub/also_empty.txt"), "");
    write(&dir.path().join("keep.txt"), "data");

    let report = apply(dir.path(), &[Pass::Empty]);

    assert_eq!(listing(dir.path()), vec!["keep.txt"]);
    assert_eq!(report.files_removed, 2);
    assert_eq!(report.bytes_freed, 0);
}

#[test]
fn test_temporary_files_removed() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("data.tmp"), "1");
    write(&dir.path().join("archive.backup.tmp"), "2");
    write(&dir.path().join("tmpdata"), "3");

    apply(dir.path(), &[Pass::Temporary]);

    assert_eq!(listing(dir.path()), vec!["tmpdata"]);
}

#[test]
fn test_permissions_reset_to_default() {
    let dir = TempDir::new().unwrap();
    let exec = dir.path().join("script.sh");
    let private = dir.path().join("nested/secret.txt");
    write(&exec, "#!/bin/sh");
    write(&private, "s");
    chmod(&exec, 0o755);
    chmod(&private, 0o600);

    // no "permissions" key: the 644 default applies
    let config = Config::from_json(r#"{"temporary files": [".swp"]}"#).unwrap();
    let report = run_passes(&[dir.path()], &config, &[Pass::Permissions], CleanMode::Apply);

    assert_eq!(mode_of(&exec), 0o644);
    assert_eq!(mode_of(&private), 0o644);
    assert_eq!(report.permissions_changed, 2);
}

#[test]
fn test_permissions_custom_mode() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("doc.txt");
    write(&file, "d");
    chmod(&file, 0o644);

    let config = Config::from_json(r#"{"permissions": "640"}"#).unwrap();
    run_passes(&[dir.path()], &config, &[Pass::Permissions], CleanMode::Apply);

    assert_eq!(mode_of(&file), 0o640);
}

// ─── Orchestration ───────────────────────────────────────────────────────────

#[test]
fn test_passes_run_in_fixed_order() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("a.tmp"), "");
    write(&dir.path().join("b:c"), "z");

    let report = apply(
        dir.path(),
        &[Pass::Temporary, Pass::Empty, Pass::InvalidSymbols],
    );

    assert_eq!(
        report.passes,
        vec![Pass::InvalidSymbols, Pass::Empty, Pass::Temporary]
    );
    // a.tmp is empty, so the empty pass takes it before the temporary pass runs
    let by_pass: Vec<Pass> = report.actions.iter().map(Action::pass).collect();
    assert_eq!(by_pass, vec![Pass::InvalidSymbols, Pass::Empty]);
}

#[test]
fn test_every_pass_is_idempotent() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("a.txt"), "dup");
    write(&dir.path().join("b.txt"), "dup");
    write(&dir.path().join("x/a.txt"), "namesake");
    write(&dir.path().join("bad#1.txt"), "sym");
    write(&dir.path().join("bad_1.txt"), "sym-collide");
    write(&dir.path().join("e"), "");
    write(&dir.path().join("t.tmp"), "tmp");
    chmod(&dir.path().join("b.txt"), 0o700);

    for pass in Pass::ALL {
        let first = apply(dir.path(), &[pass]);
        let second = apply(dir.path(), &[pass]);
        assert!(
            second.actions.is_empty(),
            "{:?} not idempotent: first {:?}, second {:?}",
            pass,
            first.actions,
            second.actions
        );
    }
}

#[test]
fn test_dry_run_changes_nothing() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("a.txt"), "dup");
    write(&dir.path().join("b.txt"), "dup");
    write(&dir.path().join("c?.txt"), "sym");
    write(&dir.path().join("d?.txt"), "sym2");
    write(&dir.path().join("c_.txt"), "taken");
    write(&dir.path().join("e"), "");
    write(&dir.path().join("t.tmp"), "tmp");
    chmod(&dir.path().join("a.txt"), 0o600);
    let before = listing(dir.path());

    let report = run_passes(
        &[dir.path()],
        &Config::default(),
        &Pass::ALL,
        CleanMode::DryRun,
    );

    assert_eq!(listing(dir.path()), before);
    assert_eq!(mode_of(&dir.path().join("a.txt")), 0o600);
    assert_eq!(report.mode, CleanMode::DryRun);
    assert!(report.files_removed >= 3);

    let root = std::fs::canonicalize(dir.path()).unwrap();
    let renamed: Vec<(PathBuf, PathBuf)> = report
        .actions
        .iter()
        .filter_map(|a| match a {
            Action::Renamed { from, to, .. } => Some((from.clone(), to.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(
        renamed,
        vec![
            (root.join("c?.txt"), root.join("c__1.txt")),
            (root.join("d?.txt"), root.join("d_.txt")),
        ]
    );
}

#[test]
fn test_dry_run_matches_apply_for_single_pass() {
    let dir = TempDir::new().unwrap();
    for name in ["x:1", "x?1", "y$", "z.tmp"] {
        write(&dir.path().join(name), name);
    }

    let planned = run_passes(
        &[dir.path()],
        &Config::default(),
        &[Pass::InvalidSymbols],
        CleanMode::DryRun,
    );
    let applied = apply(dir.path(), &[Pass::InvalidSymbols]);

    assert_eq!(planned.actions, applied.actions);
}

#[test]
fn test_temporary_symlink_to_file_removed() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    write(&data, "payload");
    std::os::unix::fs::symlink(&data, dir.path().join("link.tmp")).unwrap();

    let report = apply(dir.path(), &[Pass::Temporary]);

    assert_eq!(report.files_removed, 1);
    assert!(std::fs::symlink_metadata(dir.path().join("link.tmp")).is_err());
    assert_eq!(std::fs::read_to_string(&data).unwrap(), "payload");
}

#[test]
fn test_dry_run_matches_apply_across_passes() {
    let dir = TempDir::new().unwrap();
    let oldest = dir.path().join("x.txt");
    let newest = dir.path().join("sub/dup.txt");
    let other = dir.path().join("other/dup.txt");
    write(&oldest, "same");
    write(&newest, "same");
    write(&other, "different");
    set_age(&oldest, 3000);
    set_age(&other, 1000);
    set_age(&newest, 10);

    let passes = [Pass::SameContent, Pass::SameName];
    let planned = run_passes(&[dir.path()], &Config::default(), &passes, CleanMode::DryRun);
    let applied = apply(dir.path(), &passes);

    assert_eq!(planned.actions, applied.actions);
    assert_eq!(applied.files_removed, 1);
    assert!(oldest.exists());
    assert!(other.exists());
    assert!(!newest.exists());
}

#[test]
fn test_no_passes_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("e"), "");
    let report = apply(dir.path(), &[]);
    assert!(report.actions.is_empty());
    assert!(dir.path().join("e").exists());
}
