// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

//! The ordered list of files that make up a consolidated artifact.

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::error::Error;
use crate::error::Result;

pub const DEFAULT_TARGET: &str = "consolidated_rref.cpp";
pub const DEFAULT_COMMENT_PREFIX: &str = "//";
pub const DEFAULT_PROVENANCE: &str =
    "Consolidated rref program. See github.com/mbottini/rref for separate files.";

const RREF_FILES: [(&str, &str); 5] = [
    ("row.h", "Header file for Row class"),
    ("matrix.h", "Header file for Matrix class"),
    ("row.cpp", "Implementation file for Row class"),
    ("matrix.cpp", "Implementation file for Matrix class"),
    ("rref.cpp", "Main program"),
];

lazy_static! {
    static ref LINE_BREAK_RE: Regex = Regex::new(r"[\r\n]").unwrap();
}

/// A file and the label written in its banner.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Entry {
    pub path: PathBuf,
    pub label: String,
}

impl Entry {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(path: P, label: S) -> Entry {
        Entry {
            path: path.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub target: PathBuf,
    pub comment_prefix: String,
    /// Leading banner describing where the artifact comes from; `None`
    /// omits it.
    pub provenance: Option<String>,
    /// Order matters: it is the order of the sections in the artifact.
    pub entries: Vec<Entry>,
}

/// On-disk form; everything but the file list is optional.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ManifestFile {
    target: Option<PathBuf>,
    comment_prefix: Option<String>,
    provenance: Option<String>,
    files: Vec<Entry>,
}

impl Manifest {
    /// Manifest with the default target, prefix and provenance.
    pub fn new(entries: Vec<Entry>) -> Manifest {
        Manifest {
            target: PathBuf::from(DEFAULT_TARGET),
            comment_prefix: String::from(DEFAULT_COMMENT_PREFIX),
            provenance: Some(String::from(DEFAULT_PROVENANCE)),
            entries,
        }
    }

    /// The rref program: headers, then implementations, then main.
    pub fn rref() -> Manifest {
        Manifest::new(
            RREF_FILES
                .iter()
                .map(|(path, label)| Entry::new(*path, *label))
                .collect(),
        )
    }

    pub fn load(path: &Path) -> Result<Manifest> {
        let contents = fs::read_to_string(path).map_err(Error::input(path))?;
        Manifest::from_toml(path, &contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Manifest> {
        Manifest::from_toml(Path::new("<string>"), contents)
    }

    fn from_toml(path: &Path, contents: &str) -> Result<Manifest> {
        let file: ManifestFile = toml::from_str(contents).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = Manifest {
            target: file.target.unwrap_or_else(|| PathBuf::from(DEFAULT_TARGET)),
            comment_prefix: file
                .comment_prefix
                .unwrap_or_else(|| String::from(DEFAULT_COMMENT_PREFIX)),
            // An explicit empty string turns the provenance banner off.
            provenance: match file.provenance {
                None => Some(String::from(DEFAULT_PROVENANCE)),
                Some(p) if p.is_empty() => None,
                Some(p) => Some(p),
            },
            entries: file.files,
        };
        manifest.validate()?;
        Ok(manifest)
    }

    /// Checks that every banner fits in a single line and that there is
    /// something to consolidate.
    pub fn validate(&self) -> Result<()> {
        if self.entries.is_empty() {
            return Err(Error::InvalidManifest(String::from("no files listed")));
        }
        if self.comment_prefix.is_empty() || LINE_BREAK_RE.is_match(&self.comment_prefix) {
            return Err(Error::InvalidManifest(format!(
                "bad comment prefix {:?}",
                self.comment_prefix
            )));
        }
        if let Some(ref provenance) = self.provenance {
            if LINE_BREAK_RE.is_match(provenance) {
                return Err(Error::InvalidManifest(String::from(
                    "provenance spans more than one line",
                )));
            }
        }
        for entry in &self.entries {
            if entry.path.as_os_str().is_empty() {
                return Err(Error::InvalidManifest(format!(
                    "empty filename for \"{}\"",
                    entry.label
                )));
            }
            if LINE_BREAK_RE.is_match(&entry.label) {
                return Err(Error::InvalidManifest(format!(
                    "label for {} spans more than one line",
                    entry.path.display()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rref_order() {
        let manifest = Manifest::rref();
        let paths: Vec<_> = manifest
            .entries
            .iter()
            .map(|e| e.path.to_str().unwrap())
            .collect();
        assert_eq!(
            paths,
            vec!["row.h", "matrix.h", "row.cpp", "matrix.cpp", "rref.cpp"]
        );
        assert_eq!(manifest.entries[4].label, "Main program");
        assert_eq!(manifest.target, Path::new("consolidated_rref.cpp"));
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn toml_defaults() {
        let manifest = Manifest::from_toml_str(
            r#"
            [[files]]
            path = "row.h"
            label = "Header file for Row class"
            "#,
        )
        .unwrap();
        assert_eq!(manifest.target, Path::new(DEFAULT_TARGET));
        assert_eq!(manifest.comment_prefix, "//");
        assert_eq!(manifest.provenance.as_deref(), Some(DEFAULT_PROVENANCE));
        assert_eq!(
            manifest.entries,
            vec![Entry::new("row.h", "Header file for Row class")]
        );
    }

    #[test]
    fn toml_overrides() {
        let manifest = Manifest::from_toml_str(
            r##"
            target = "all.py"
            comment_prefix = "#"
            provenance = ""
            [[files]]
            path = "a.py"
            label = "A"
            [[files]]
            path = "b.py"
            label = "B"
            "##,
        )
        .unwrap();
        assert_eq!(manifest.target, Path::new("all.py"));
        assert_eq!(manifest.comment_prefix, "#");
        assert_eq!(manifest.provenance, None);
        assert_eq!(manifest.entries.len(), 2);
        assert_eq!(manifest.entries[1], Entry::new("b.py", "B"));
    }

    #[test]
    fn toml_without_files() {
        let err = Manifest::from_toml_str("target = \"x.cpp\"\n").unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn toml_empty_files() {
        let err = Manifest::from_toml_str("files = []\n").unwrap_err();
        assert!(matches!(err, Error::InvalidManifest(_)));
    }

    #[test]
    fn multiline_label() {
        let manifest = Manifest::new(vec![Entry::new("row.h", "Row\nheader")]);
        assert!(matches!(
            manifest.validate(),
            Err(Error::InvalidManifest(_))
        ));
    }

    #[test]
    fn bad_prefix() {
        let mut manifest = Manifest::rref();
        manifest.comment_prefix = String::new();
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn empty_filename() {
        let manifest = Manifest::new(vec![Entry::new("", "Nothing")]);
        assert!(manifest.validate().is_err());
    }
}
