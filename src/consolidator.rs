// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::info;

use crate::error::Error;
use crate::error::Result;
use crate::manifest::Manifest;

/// Returns the banner line for `label`, padded with blank lines.
pub fn banner(comment_prefix: &str, label: &str) -> String {
    format!("\n{} {}\n\n", comment_prefix, label)
}

#[derive(Debug, Clone)]
pub struct Consolidator<'a> {
    manifest: &'a Manifest,
    target: PathBuf,
    base_dir: Option<PathBuf>,
}

impl<'a> Consolidator<'a> {
    pub fn new(manifest: &'a Manifest) -> Consolidator<'a> {
        Consolidator {
            manifest,
            target: manifest.target.clone(),
            base_dir: None,
        }
    }

    /// Overrides the manifest's target.
    pub fn target<P: Into<PathBuf>>(&mut self, target: P) -> &mut Self {
        self.target = target.into();
        self
    }

    /// Directory relative input and target paths are resolved against,
    /// instead of the current one.
    pub fn base_dir<P: Into<PathBuf>>(&mut self, dir: P) -> &mut Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn target_path(&self) -> PathBuf {
        self.resolve(&self.target)
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match self.base_dir {
            Some(ref dir) => dir.join(path),
            None => path.to_path_buf(),
        }
    }

    /// Creates (or truncates) the target and writes the artifact to it.
    pub fn run(&self) -> Result<()> {
        self.manifest.validate()?;
        let target = self.target_path();
        debug!("creating {}", target.display());
        let fd = File::create(&target).map_err(Error::output(&target))?;
        let mut o = BufWriter::new(fd);
        self.write_sections(&mut o)?;
        o.flush().map_err(Error::output(&target))?;
        Ok(())
    }

    /// Writes the provenance banner and then each entry's banner and
    /// contents, in manifest order.
    pub fn write_to<W: Write>(&self, o: &mut W) -> Result<()> {
        self.manifest.validate()?;
        self.write_sections(o)
    }

    /// Same as `write_to`, for an already validated manifest.
    fn write_sections<W: Write>(&self, o: &mut W) -> Result<()> {
        let target = self.target_path();
        let prefix = self.manifest.comment_prefix.as_str();
        if let Some(ref provenance) = self.manifest.provenance {
            o.write_all(banner(prefix, provenance).as_bytes())
                .map_err(Error::output(&target))?;
        }
        for entry in &self.manifest.entries {
            info!("Writing comment: {}...", entry.label);
            o.write_all(banner(prefix, &entry.label).as_bytes())
                .map_err(Error::output(&target))?;
            info!("Writing file: {}...", entry.path.display());
            self.copy_file(o, &self.resolve(&entry.path), &target)?;
        }
        Ok(())
    }

    /// Copies `path` into `o` line by line, bytes untouched.
    fn copy_file<W: Write>(&self, o: &mut W, path: &Path, target: &Path) -> Result<()> {
        let fd = File::open(path).map_err(Error::input(path))?;
        let mut reader = BufReader::new(fd);
        let mut line = Vec::new();
        while reader
            .read_until(b'\n', &mut line)
            .map_err(Error::input(path))?
            > 0
        {
            o.write_all(&line).map_err(Error::output(target))?;
            line.clear(); // clear to reuse the buffer
        }
        Ok(())
    }
}

/// Consolidates the files in `manifest` into `target`.
pub fn consolidate(manifest: &Manifest, target: &Path) -> Result<()> {
    Consolidator::new(manifest).target(target).run()
}
