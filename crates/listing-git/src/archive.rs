//! Checking out a resolved ref and archiving its tree.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{Datelike, TimeZone, Timelike, Utc};
use git2::build::CheckoutBuilder;
use git2::{Commit, ObjectType, Repository, Tree};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Error, Result};
use crate::resolve::find_commit;

/// git filemode of an executable blob
const EXECUTABLE_MODE: i32 = 0o100755;

/// Check out `commit_ish` into the working tree with a detached HEAD.
pub fn checkout<'r>(repo: &'r Repository, commit_ish: &str) -> Result<Commit<'r>> {
    let checkout_failed = |e: git2::Error| Error::CheckoutFailed {
        commit_ish: commit_ish.to_string(),
        message: e.message().to_string(),
    };

    let commit = find_commit(repo, commit_ish)?;
    repo.checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().force()))
        .map_err(checkout_failed)?;
    repo.set_head_detached(commit.id()).map_err(checkout_failed)?;

    tracing::debug!(commit_ish = %commit_ish, commit = %commit.id(), "Checked out");
    Ok(commit)
}

/// Write the tree of `commit` as a zip archive at `dest`.
///
/// Every entry is placed under a single top-level directory named after the
/// file stem of `dest`, so `foo.zip` always extracts into `foo/`. Entries are
/// stamped with the commit time, which makes the archive a pure function of
/// the commit.
pub fn write_archive(repo: &Repository, commit: &Commit<'_>, dest: &Path) -> Result<()> {
    let prefix = dest
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::InvalidArchivePath {
            path: dest.to_path_buf(),
            reason: "file name is empty or not valid UTF-8".to_string(),
        })?;

    let tree = commit.tree()?;

    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(commit_time(commit));

    let mut zip = ZipWriter::new(File::create(dest)?);
    let root = format!("{prefix}/");
    zip.add_directory(root.as_str(), options)?;
    append_tree(repo, &mut zip, &tree, &root, options)?;
    zip.finish()?;

    tracing::debug!(dest = %dest.display(), commit = %commit.id(), "Wrote source archive");
    Ok(())
}

fn append_tree(
    repo: &Repository,
    zip: &mut ZipWriter<File>,
    tree: &Tree<'_>,
    prefix: &str,
    options: FileOptions,
) -> Result<()> {
    for entry in tree.iter() {
        let Some(name) = entry.name() else {
            tracing::warn!(prefix = %prefix, "Skipping tree entry with a non UTF-8 name");
            continue;
        };
        let path = format!("{prefix}{name}");

        match entry.kind() {
            Some(ObjectType::Tree) => {
                let dir = format!("{path}/");
                zip.add_directory(dir.as_str(), options)?;
                let subtree = repo.find_tree(entry.id())?;
                append_tree(repo, zip, &subtree, &dir, options)?;
            }
            Some(ObjectType::Blob) => {
                let blob = repo.find_blob(entry.id())?;
                let mode = if entry.filemode() == EXECUTABLE_MODE {
                    0o755
                } else {
                    0o644
                };
                zip.start_file(path, options.unix_permissions(mode))?;
                zip.write_all(blob.content())?;
            }
            // submodules
            _ => tracing::debug!(path = %path, "Skipping non-blob tree entry"),
        }
    }
    Ok(())
}

fn commit_time(commit: &Commit<'_>) -> zip::DateTime {
    let seconds = commit.time().seconds();
    let stamp = Utc
        .timestamp_opt(seconds, 0)
        .single()
        .and_then(|time| {
            zip::DateTime::from_date_and_time(
                u16::try_from(time.year()).ok()?,
                time.month() as u8,
                time.day() as u8,
                time.hour() as u8,
                time.minute() as u8,
                time.second() as u8,
            )
            .ok()
        });
    stamp.unwrap_or_else(|| {
        tracing::debug!(
            commit = %commit.id(),
            seconds,
            "Commit time does not fit a zip timestamp, using 1980-01-01"
        );
        zip::DateTime::default()
    })
}
