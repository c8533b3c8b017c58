use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use super::*;

static SCRATCH_COUNTER: AtomicU64 = AtomicU64::new(0);

fn scratch_dir() -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system time")
        .as_nanos();
    let seq = SCRATCH_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("ami-core-test-{nanos}-{seq}"));
    fs::create_dir_all(&dir).expect("must create scratch dir");
    dir
}

fn store_in(dir: &Path) -> ManifestStore {
    ManifestStore::new(dir.join(MANIFEST_FILE))
}

fn entries(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[test]
fn identity_key_lowercases_and_trims() {
    assert_eq!(identity_key("  Flask  "), "flask");
    assert_eq!(identity_key("NumPy"), "numpy");
}

#[test]
fn probe_reports_absence_without_error() {
    let dir = scratch_dir();
    let (path, exists) = resolve_in(&dir, MANIFEST_FILE).expect("must resolve");
    assert!(!exists);
    assert_eq!(path, dir.join(MANIFEST_FILE));

    fs::write(&path, "").expect("must write");
    let (_, exists) = resolve_in(&dir, MANIFEST_FILE).expect("must resolve");
    assert!(exists);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn probe_dir_distinguishes_files_from_directories() {
    let dir = scratch_dir();
    let file = dir.join("plain-file");
    fs::write(&file, "").expect("must write");

    assert!(probe_dir(&dir).expect("must probe"));
    assert!(!probe_dir(&file).expect("must probe"));
    assert!(!probe_dir(&dir.join("missing")).expect("must probe"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn create_then_read_yields_no_entries() {
    let dir = scratch_dir();
    let store = store_in(&dir);
    store.create().expect("must create manifest");
    assert_eq!(store.read_all().expect("must read"), Vec::<String>::new());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn create_fails_when_manifest_already_exists() {
    let dir = scratch_dir();
    let store = store_in(&dir);
    store.create().expect("must create manifest");

    let err = store.create().expect_err("second create must fail");
    assert!(matches!(err, ManifestError::Create { .. }), "got: {err}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn read_all_missing_manifest_is_not_found() {
    let dir = scratch_dir();
    let store = store_in(&dir);
    let err = store.read_all().expect_err("missing manifest must error");
    assert!(matches!(err, ManifestError::NotFound(_)), "got: {err}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn read_all_drops_comments_and_blank_lines() {
    let dir = scratch_dir();
    let store = store_in(&dir);
    fs::write(store.path(), "# comment\n\nrequests\n").expect("must write");
    assert_eq!(store.read_all().expect("must read"), entries(&["requests"]));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn read_all_preserves_casing_and_hand_edited_duplicates() {
    let dir = scratch_dir();
    let store = store_in(&dir);
    fs::write(store.path(), "Requests\nrequests\n  flask  \n").expect("must write");
    assert_eq!(
        store.read_all().expect("must read"),
        entries(&["Requests", "requests", "flask"])
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn write_all_requires_existing_manifest() {
    let dir = scratch_dir();
    let store = store_in(&dir);
    let err = store
        .write_all(&entries(&["requests"]))
        .expect_err("write without manifest must fail");
    assert!(matches!(err, ManifestError::NotFound(_)), "got: {err}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn write_then_read_round_trips_entries() {
    let dir = scratch_dir();
    let store = store_in(&dir);
    store.create().expect("must create manifest");

    let written = entries(&["requests", "Flask", "pytest"]);
    store.write_all(&written).expect("must write");
    assert_eq!(store.read_all().expect("must read"), written);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn merge_appends_new_entries_in_caller_order() {
    let dir = scratch_dir();
    let store = store_in(&dir);
    store.create().expect("must create manifest");
    store.write_all(&entries(&["requests"])).expect("must seed");

    let appended = store
        .merge(&["flask", "pytest"])
        .expect("must merge");
    assert_eq!(appended, entries(&["flask", "pytest"]));
    assert_eq!(
        store.read_all().expect("must read"),
        entries(&["requests", "flask", "pytest"])
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn merge_twice_matches_merging_once() {
    let dir = scratch_dir();
    let store = store_in(&dir);
    store.create().expect("must create manifest");

    store.merge(&["requests", "flask"]).expect("must merge");
    let second = store.merge(&["requests", "flask"]).expect("must re-merge");
    assert!(second.is_empty(), "re-merge must append nothing");
    assert_eq!(
        store.read_all().expect("must read"),
        entries(&["requests", "flask"])
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn merge_treats_case_variants_as_the_same_package() {
    let dir = scratch_dir();
    let store = store_in(&dir);
    store.create().expect("must create manifest");
    store.write_all(&entries(&["flask"])).expect("must seed");

    let appended = store.merge(&["Flask"]).expect("must merge");
    assert!(appended.is_empty());
    assert_eq!(store.read_all().expect("must read"), entries(&["flask"]));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn merge_collapses_duplicates_within_the_request() {
    let dir = scratch_dir();
    let store = store_in(&dir);
    store.create().expect("must create manifest");

    let appended = store
        .merge(&["numpy", "NumPy", "requests"])
        .expect("must merge");
    assert_eq!(appended, entries(&["numpy", "requests"]));
    assert_eq!(
        store.read_all().expect("must read"),
        entries(&["numpy", "requests"])
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn merge_without_manifest_errors_only_when_it_must_write() {
    let dir = scratch_dir();
    let store = store_in(&dir);

    let appended = store.merge::<&str>(&[]).expect("empty merge is a no-op");
    assert!(appended.is_empty());

    let err = store
        .merge(&["requests"])
        .expect_err("merge that must write needs a manifest");
    assert!(matches!(err, ManifestError::NotFound(_)), "got: {err}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn remove_preserves_order_of_survivors() {
    let dir = scratch_dir();
    let store = store_in(&dir);
    store.create().expect("must create manifest");
    store
        .write_all(&entries(&["requests", "flask", "pytest", "numpy"]))
        .expect("must seed");

    let removed = store.remove(&["flask", "numpy"]).expect("must remove");
    assert_eq!(removed, entries(&["flask", "numpy"]));
    assert_eq!(
        store.read_all().expect("must read"),
        entries(&["requests", "pytest"])
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn remove_is_case_insensitive() {
    let dir = scratch_dir();
    let store = store_in(&dir);
    store.create().expect("must create manifest");
    store.write_all(&entries(&["Flask"])).expect("must seed");

    let removed = store.remove(&["flask"]).expect("must remove");
    assert_eq!(removed, entries(&["Flask"]));
    assert!(store.read_all().expect("must read").is_empty());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn remove_unknown_name_is_a_silent_no_op() {
    let dir = scratch_dir();
    let store = store_in(&dir);
    store.create().expect("must create manifest");
    store.write_all(&entries(&["requests"])).expect("must seed");

    let removed = store.remove(&["doesnotexist"]).expect("must not error");
    assert!(removed.is_empty());
    assert_eq!(store.read_all().expect("must read"), entries(&["requests"]));

    let _ = fs::remove_dir_all(&dir);
}
