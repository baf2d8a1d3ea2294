//! Filesystem checkers. These perform blocking metadata queries on the
//! local filesystem; every I/O failure is reported as a failing verdict.

use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

use chk_core::{Predicate, Value, Verdict};
use tracing::debug;

fn path_of(role: &str, value: &Value) -> Result<PathBuf, String> {
    value.string_form().map(PathBuf::from).ok_or_else(|| {
        format!(
            "{role} value is not a string and has no string form, {}: {}",
            value.kind(),
            value
        )
    })
}

fn stat_error(path: &Path, err: io::Error) -> String {
    debug!(path = %path.display(), error = %err, "filesystem checker stat failed");
    format!("other stat error: {err}")
}

/// Whether metadata queries follow a final symlink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Links {
    Follow,
    Inspect,
}

/// Queries metadata; `Ok(None)` means the path does not exist.
fn lookup(path: &Path, links: Links) -> Result<Option<Metadata>, String> {
    let meta = match links {
        Links::Follow => fs::metadata(path),
        Links::Inspect => fs::symlink_metadata(path),
    };
    match meta {
        Ok(meta) => Ok(Some(meta)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(stat_error(path, err)),
    }
}

fn existing(value: &Value, links: Links) -> Result<(PathBuf, Metadata), String> {
    let path = path_of("obtained", value)?;
    match lookup(&path, links)? {
        Some(meta) => Ok((path, meta)),
        None => Err(format!("{} does not exist", path.display())),
    }
}

fn absent(value: &Value, links: Links) -> Result<bool, String> {
    let path = path_of("obtained", value)?;
    match lookup(&path, links)? {
        Some(_) => Err(format!("{} exists", path.display())),
        None => Ok(true),
    }
}

/// Passes when the path names a directory.
pub fn is_directory(obtained: &Value) -> Verdict {
    Verdict::from_result(existing(obtained, Links::Follow).and_then(|(path, meta)| {
        if meta.is_dir() {
            Ok(true)
        } else {
            Err(format!("{} is not a directory", path.display()))
        }
    }))
}

/// Passes when the path names a regular file with at least one byte.
pub fn is_non_empty_file(obtained: &Value) -> Verdict {
    Verdict::from_result(existing(obtained, Links::Follow).and_then(|(path, meta)| {
        if meta.is_dir() {
            Err(format!("{} is not a file", path.display()))
        } else if meta.len() == 0 {
            Err(format!("{} is empty", path.display()))
        } else {
            Ok(true)
        }
    }))
}

/// Passes when the path itself is a symbolic link.
pub fn is_symlink(obtained: &Value) -> Verdict {
    Verdict::from_result(existing(obtained, Links::Inspect).and_then(|(path, meta)| {
        if meta.file_type().is_symlink() {
            Ok(true)
        } else {
            Err(format!("{} is not a symlink", path.display()))
        }
    }))
}

/// Passes when nothing exists at the path, following symlinks.
pub fn does_not_exist(obtained: &Value) -> Verdict {
    Verdict::from_result(absent(obtained, Links::Follow))
}

/// Passes when nothing exists at the path, dangling symlinks included.
pub fn symlink_does_not_exist(obtained: &Value) -> Verdict {
    Verdict::from_result(absent(obtained, Links::Inspect))
}

fn resolve(path: &Path) -> Result<PathBuf, String> {
    fs::canonicalize(path).map_err(|err| {
        debug!(path = %path.display(), error = %err, "failed to canonicalize path");
        format!("failed to resolve {}: {err}", path.display())
    })
}

#[cfg(windows)]
fn same_resolved(a: &Path, b: &Path) -> bool {
    a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase()
}

#[cfg(not(windows))]
fn same_resolved(a: &Path, b: &Path) -> bool {
    a == b
}

/// Passes when both paths resolve to the same location.
pub fn same_path(obtained: &Value, expected: &Value) -> Verdict {
    let check = || -> Result<bool, String> {
        let obtained = resolve(&path_of("obtained", obtained)?)?;
        let expected = resolve(&path_of("expected", expected)?)?;
        Ok(same_resolved(&obtained, &expected))
    };
    Verdict::from_result(check())
}

/// Checks that a path is a directory.
pub const IS_DIRECTORY: Predicate = Predicate::unary("IsDirectory", &["obtained"], is_directory);

/// Checks that a path is a non-empty file.
pub const IS_NON_EMPTY_FILE: Predicate =
    Predicate::unary("IsNonEmptyFile", &["obtained"], is_non_empty_file);

/// Checks that a path is a symlink.
pub const IS_SYMLINK: Predicate = Predicate::unary("IsSymlink", &["obtained"], is_symlink);

/// Checks that a path does not exist.
pub const DOES_NOT_EXIST: Predicate =
    Predicate::unary("DoesNotExist", &["obtained"], does_not_exist);

/// Checks that a path does not exist, not even as a dangling symlink.
pub const SYMLINK_DOES_NOT_EXIST: Predicate =
    Predicate::unary("SymlinkDoesNotExist", &["obtained"], symlink_does_not_exist);

/// Checks that two paths resolve to the same location.
pub const SAME_PATH: Predicate = Predicate::binary("SamePath", &["obtained", "expected"], same_path);
