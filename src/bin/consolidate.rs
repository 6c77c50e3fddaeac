// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use std::io::IsTerminal;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing::Level;

use sourceconsolidator::split_file;
use sourceconsolidator::Consolidator;
use sourceconsolidator::Manifest;

#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Cli {
    /// TOML manifest listing the files; the rref program by default.
    #[clap(short, long)]
    pub manifest: Option<PathBuf>,
    /// Directory the listed files and the output are relative to.
    #[clap(short = 'C', long)]
    pub directory: Option<PathBuf>,
    /// The output file, overriding the manifest's target.
    #[clap(short, long)]
    pub output: Option<PathBuf>,
    /// Write the consolidated file to stdout.
    #[clap(long, conflicts_with_all = ["split", "output"])]
    pub stdout: bool,
    /// Leave out the leading provenance comment.
    #[clap(long)]
    pub no_provenance: bool,
    /// Split the output file back into the listed files under this
    /// directory, instead of consolidating.
    #[clap(long, value_name = "DIR")]
    pub split: Option<PathBuf>,
    /// Don't report progress.
    #[clap(short, long)]
    pub quiet: bool,
}

pub fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.quiet { Level::WARN } else { Level::INFO })
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();

    let mut manifest = match cli.manifest {
        Some(ref path) => Manifest::load(path)?,
        None => Manifest::rref(),
    };
    if cli.no_provenance {
        manifest.provenance = None;
    }
    let mut consolidator = Consolidator::new(&manifest);
    if let Some(ref dir) = cli.directory {
        consolidator.base_dir(dir);
    }
    if let Some(ref output) = cli.output {
        consolidator.target(output);
    }

    if let Some(ref dest) = cli.split {
        let target = consolidator.target_path();
        let written = split_file(&target, &manifest, dest)
            .with_context(|| format!("splitting {}", target.display()))?;
        info!("Extracted {} files into {}", written.len(), dest.display());
    } else if cli.stdout {
        let stdout = std::io::stdout();
        let mut o = stdout.lock();
        consolidator.write_to(&mut o)?;
        o.flush()?;
    } else {
        consolidator.run()?;
        info!("Wrote {}", consolidator.target_path().display());
    }
    Ok(())
}
