// Copyright (C) 2022 Leandro Lisboa Penz <lpenz@lpenz.org>
// This file is subject to the terms and conditions defined in
// file 'LICENSE', which is part of this source code package.

use anyhow::Result;
use goldenfile::Mint;

use sourceconsolidator::Consolidator;
use sourceconsolidator::Manifest;

const INPUT_DIR: &str = "tests/testdata/input";
const OUTPUT_DIR: &str = "tests/testdata/output";

#[test]
fn rref() -> Result<()> {
    let mut mint = Mint::new(OUTPUT_DIR);
    let mut golden = mint.new_goldenfile("consolidated_rref.cpp")?;
    let manifest = Manifest::rref();
    Consolidator::new(&manifest)
        .base_dir(format!("{}/rref", INPUT_DIR))
        .write_to(&mut golden)?;
    Ok(())
}
