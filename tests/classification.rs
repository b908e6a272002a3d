// tests/classification.rs

use std::path::{Path, PathBuf};

use filewatch::watch::{Op, RawEvent, WatchTarget};
use proptest::prelude::*;

fn op_strategy() -> impl Strategy<Value = Op> {
    (0u8..32).prop_map(Op::from_bits_truncate)
}

#[test]
fn test_parent_dir_is_derived() {
    let t = WatchTarget::new("/srv/site/config.toml");
    assert_eq!(t.dir(), Path::new("/srv/site"));

    let t = WatchTarget::new("config.toml");
    assert_eq!(t.dir(), Path::new("."));

    let t = WatchTarget::new("./config.toml");
    assert_eq!(t.dir(), Path::new("."));
}

#[test]
fn test_relative_target_matches_event_under_dot() {
    // notify joins the registered "." with the entry name.
    let t = WatchTarget::new("config.toml");
    assert!(t.matches(Path::new("./config.toml")));
    assert!(t.matches(Path::new("config.toml")));
    assert!(!t.matches(Path::new("./config.toml.swp")));
}

#[test]
fn test_canonical_dir_matches_after_resolve() {
    let dir = tempfile::tempdir().unwrap();
    let canonical = dir.path().canonicalize().unwrap();
    let target = dir.path().join("notes.md");

    let t = WatchTarget::new(&target).resolve();

    assert!(t.matches(&canonical.join("notes.md")));
    assert!(!t.matches(&canonical.join("other.md")));
}

#[test]
fn test_vim_style_save() {
    let t = WatchTarget::new("/w/notes.md");
    let events = [
        RawEvent::new("/w/.notes.md.swp", Op::CREATE),
        RawEvent::new("/w/.notes.md.swp", Op::WRITE),
        RawEvent::new("/w/notes.md", Op::RENAME),
        RawEvent::new("/w/notes.md", Op::CREATE),
        RawEvent::new("/w/.notes.md.swp", Op::REMOVE),
    ];

    let qualifying: Vec<_> = events.iter().filter(|e| t.is_qualifying(e)).collect();
    assert_eq!(qualifying, vec![&RawEvent::new("/w/notes.md", Op::CREATE)]);
}

#[test]
fn test_vscode_style_save() {
    let t = WatchTarget::new("/w/notes.md");
    let events = [
        RawEvent::new("/w/notes.md", Op::WRITE),
        RawEvent::new("/w/notes.md", Op::CHMOD),
    ];

    let qualifying: Vec<_> = events.iter().filter(|e| t.is_qualifying(e)).collect();
    assert_eq!(qualifying, vec![&RawEvent::new("/w/notes.md", Op::WRITE)]);
}

#[test]
fn test_write_and_create_in_one_event_qualifies() {
    let t = WatchTarget::new("/w/notes.md");
    assert!(t.is_qualifying(&RawEvent::new("/w/notes.md", Op::WRITE | Op::CREATE)));
    assert!(t.is_qualifying(&RawEvent::new("/w/notes.md", Op::CREATE | Op::CHMOD)));
}

#[test]
fn test_non_change_ops_rejected() {
    let t = WatchTarget::new("/w/notes.md");
    for op in [Op::CHMOD, Op::REMOVE, Op::RENAME, Op::REMOVE | Op::RENAME, Op::empty()] {
        assert!(
            !t.is_qualifying(&RawEvent::new("/w/notes.md", op)),
            "op {:?} should not qualify",
            op
        );
    }
}

proptest! {
    #[test]
    fn test_siblings_never_qualify(
        name in "[a-z]{1,8}\\.(md|txt|swp)",
        op in op_strategy(),
    ) {
        prop_assume!(name != "notes.md");
        let t = WatchTarget::new("/w/notes.md");
        let ev = RawEvent::new(PathBuf::from("/w").join(&name), op);
        prop_assert!(!t.is_qualifying(&ev));
    }

    #[test]
    fn test_target_qualifies_iff_write_or_create(op in op_strategy()) {
        let t = WatchTarget::new("/w/notes.md");
        let ev = RawEvent::new("/w/notes.md", op);
        let expected = op.contains(Op::WRITE) || op.contains(Op::CREATE);
        prop_assert_eq!(t.is_qualifying(&ev), expected);
    }

    #[test]
    fn test_same_name_in_other_dir_never_qualifies(
        dir in "/[a-z]{1,6}",
        op in op_strategy(),
    ) {
        prop_assume!(dir != "/w");
        let t = WatchTarget::new("/w/notes.md");
        let ev = RawEvent::new(PathBuf::from(dir).join("notes.md"), op);
        prop_assert!(!t.is_qualifying(&ev));
    }
}
