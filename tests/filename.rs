use std::path::{Path, PathBuf};

use starlet::{FileIoDevice, HostFs, NAME_LEN_MAX};
use tempfile::TempDir;

fn build(root: &Path, raw: &[u8]) -> PathBuf {
    FileIoDevice::build_path(&HostFs::new(root), raw).expect("path construction failed")
}

#[test]
fn traversal_cannot_escape_the_root() {
    let root = TempDir::new().unwrap();
    let path = build(root.path(), b"/../../../etc/passwd");
    assert!(path.starts_with(root.path()));
    assert_eq!(path, root.path().join("etc/passwd"));
}

#[test]
fn parent_segments_collapse_within_the_path() {
    let root = TempDir::new().unwrap();
    assert_eq!(
        build(root.path(), b"/a/b/../c"),
        root.path().join("a").join("c")
    );
    assert_eq!(build(root.path(), b"/./a//b"), root.path().join("a/b"));
}

#[test]
fn name_stops_at_the_first_nul() {
    let root = TempDir::new().unwrap();
    assert_eq!(
        build(root.path(), b"/tmp/file.bin\0trailing-garbage"),
        root.path().join("tmp/file.bin")
    );
}

#[test]
fn name_is_clamped_to_the_declared_maximum() {
    let root = TempDir::new().unwrap();
    let mut raw = vec![b'/'];
    raw.extend(std::iter::repeat_n(b'a', NAME_LEN_MAX - 1));
    raw.extend(std::iter::repeat_n(b'b', 200));

    // Only the first NAME_LEN_MAX bytes may be consulted.
    let expected: String = "a".repeat(NAME_LEN_MAX - 1);
    assert_eq!(build(root.path(), &raw), root.path().join(expected));
}

#[test]
fn maximal_unterminated_name_is_not_read_past_its_bound() {
    let root = TempDir::new().unwrap();
    let raw = vec![b'x'; NAME_LEN_MAX];
    let expected: String = "x".repeat(NAME_LEN_MAX);
    assert_eq!(build(root.path(), &raw), root.path().join(expected));
}

#[test]
fn second_byte_zero_gains_the_title_segment() {
    let root = TempDir::new().unwrap();
    assert_eq!(
        build(root.path(), b"00010001/save.bin"),
        root.path().join("title/00010001/save.bin")
    );
    assert_eq!(
        build(root.path(), b"/0boot/meta.bin"),
        root.path().join("title/0boot/meta.bin")
    );
    // Second byte anything else stays at the root.
    assert_eq!(
        build(root.path(), b"/dev/fs/00/file.bin"),
        root.path().join("dev/fs/00/file.bin")
    );
}

#[test]
fn empty_name_resolves_to_the_root_itself() {
    let root = TempDir::new().unwrap();
    assert_eq!(build(root.path(), b""), root.path());
    assert_eq!(build(root.path(), b"\0whatever"), root.path());
}
