// crates/charpress-cli/src/cmd/verify.rs

use std::path::PathBuf;

use anyhow::bail;
use clap::Args;

use charpress_core::Charset;

use crate::io::tables;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Original pattern table (CHRTBL)
    #[arg(long)]
    pub chr: PathBuf,

    /// Original color table (CLRTBL). Defaults to the `.clr` sibling of --chr.
    #[arg(long)]
    pub clr: Option<PathBuf>,

    /// Optimized pattern table. Defaults to `<chr>.opt`.
    #[arg(long)]
    pub opt_chr: Option<PathBuf>,

    /// Optimized color table. Defaults to `<clr>.opt`.
    #[arg(long)]
    pub opt_clr: Option<PathBuf>,
}

pub fn run(args: VerifyArgs) -> anyhow::Result<()> {
    let clr = match args.clr.clone() {
        Some(path) => path,
        None => match tables::default_clr_path(&args.chr) {
            Some(path) => path,
            None => bail!("--clr is required unless --chr has a .chr extension"),
        },
    };
    let opt_chr = args
        .opt_chr
        .clone()
        .unwrap_or_else(|| tables::default_opt_path(&args.chr));
    let opt_clr = args
        .opt_clr
        .clone()
        .unwrap_or_else(|| tables::default_opt_path(&clr));

    let reference = Charset::new(tables::read_table(&args.chr)?, tables::read_table(&clr)?)?;
    let optimized = Charset::new(tables::read_table(&opt_chr)?, tables::read_table(&opt_clr)?)?;

    if reference.len() != optimized.len() {
        bail!(
            "table sizes differ: original={} optimized={}",
            reference.len(),
            optimized.len()
        );
    }

    let mut mismatches = 0usize;
    for address in 0..reference.len() {
        let expected = reference.get(address);
        let found = optimized.get(address);
        if !expected.is_equivalent_to(found) {
            if mismatches < 8 {
                eprintln!("mismatch @{address}: expected {expected}, found {found}");
            }
            mismatches += 1;
        }
    }

    if mismatches > 0 {
        bail!("verify failed: {} of {} rows differ", mismatches, reference.len());
    }

    eprintln!(
        "verify ok: rows={} chr_crc32={:08x} clr_crc32={:08x}",
        reference.len(),
        tables::crc32(optimized.patterns()),
        tables::crc32(optimized.colors()),
    );

    Ok(())
}
