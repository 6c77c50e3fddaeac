// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

//! Recovers the original files from a consolidated artifact.
//!
//! Sections are located by looking for each entry's banner, in manifest
//! order, after the end of the previous banner. A file that contains the
//! literal banner of the entry that follows it cannot be split back.

use std::fs;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use tracing::info;

use crate::consolidator::banner;
use crate::error::Error;
use crate::error::Result;
use crate::manifest::Entry;
use crate::manifest::Manifest;

/// Finds the first occurrence of `needle` in `haystack` at or after `from`,
/// returning its (start, end).
fn find_from(haystack: &[u8], needle: &[u8], from: usize) -> Option<(usize, usize)> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| (from + i, from + i + needle.len()))
}

/// Joins `path` to `dest_dir`, refusing paths that would land outside it.
fn dest_path(dest_dir: &Path, path: &Path) -> Result<PathBuf> {
    let escapes = path.components().any(|c| {
        matches!(
            c,
            Component::RootDir | Component::Prefix(_) | Component::ParentDir
        )
    });
    if escapes {
        return Err(Error::InvalidManifest(format!(
            "{} is not relative to {}",
            path.display(),
            dest_dir.display()
        )));
    }
    Ok(dest_dir.join(path))
}

/// Splits `artifact` into the contents of each entry of `manifest`.
pub fn split<'m>(artifact: &[u8], manifest: &'m Manifest) -> Result<Vec<(&'m Entry, Vec<u8>)>> {
    manifest.validate()?;
    let prefix = manifest.comment_prefix.as_str();
    let mut pos = 0;
    if let Some(ref provenance) = manifest.provenance {
        let provenance_banner = banner(prefix, provenance);
        if !artifact.starts_with(provenance_banner.as_bytes()) {
            return Err(Error::MissingBanner {
                label: provenance.clone(),
            });
        }
        pos = provenance_banner.len();
    }
    // (banner start, banner end) of each entry
    let mut bounds = Vec::with_capacity(manifest.entries.len());
    for (i, entry) in manifest.entries.iter().enumerate() {
        let (start, end) = find_from(artifact, banner(prefix, &entry.label).as_bytes(), pos)
            .filter(|(start, _)| i > 0 || *start == pos)
            .ok_or_else(|| Error::MissingBanner {
                label: entry.label.clone(),
            })?;
        bounds.push((start, end));
        pos = end;
    }
    Ok(manifest
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let start = bounds[i].1;
            let end = bounds.get(i + 1).map_or(artifact.len(), |b| b.0);
            (entry, artifact[start..end].to_vec())
        })
        .collect())
}

/// Splits the artifact at `artifact_path` and writes each section under
/// `dest_dir`, returning the paths written. Absolute entry paths and
/// paths with `..` are rejected before anything is written.
pub fn split_file(
    artifact_path: &Path,
    manifest: &Manifest,
    dest_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let paths = manifest
        .entries
        .iter()
        .map(|entry| dest_path(dest_dir, &entry.path))
        .collect::<Result<Vec<_>>>()?;
    let artifact = fs::read(artifact_path).map_err(Error::input(artifact_path))?;
    let mut written = Vec::new();
    for ((_, contents), path) in split(&artifact, manifest)?.into_iter().zip(paths) {
        info!("Extracting file: {}...", path.display());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(Error::output(parent))?;
        }
        fs::write(&path, contents).map_err(Error::output(&path))?;
        written.push(path);
    }
    Ok(written)
}
