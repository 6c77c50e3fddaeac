// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

//! Error types for the consolidator.

use std::io;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// An input file is missing or could not be read.
    #[error("error reading {}: {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output could not be created, written or flushed.
    #[error("error writing {}: {source}", path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid manifest: {0}")]
    InvalidManifest(String),

    #[error("error parsing manifest {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("banner for \"{label}\" not found in artifact")]
    MissingBanner { label: String },
}

impl Error {
    pub(crate) fn input(path: &Path) -> impl FnOnce(io::Error) -> Error + '_ {
        move |source| Error::InputRead {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn output(path: &Path) -> impl FnOnce(io::Error) -> Error + '_ {
        move |source| Error::OutputWrite {
            path: path.to_path_buf(),
            source,
        }
    }
}
