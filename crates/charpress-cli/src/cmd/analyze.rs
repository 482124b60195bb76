// crates/charpress-cli/src/cmd/analyze.rs

use std::io::Cursor;
use std::path::PathBuf;

use anyhow::bail;
use clap::Args;

use charpress_core::stats;

use crate::io::tables;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Pattern table input (CHRTBL)
    #[arg(long)]
    pub chr: PathBuf,

    /// Color table input (CLRTBL). Defaults to the `.clr` sibling of --chr.
    #[arg(long)]
    pub clr: Option<PathBuf>,

    /// Show the top N most frequent bytes per table
    #[arg(long, default_value_t = 8)]
    pub top: usize,

    /// Also report zstd compressed size (a real-world compressibility scoreboard)
    #[arg(long, default_value_t = true)]
    pub zstd: bool,

    /// Zstd compression level (1..=22 typical). Higher is slower.
    #[arg(long, default_value_t = 19)]
    pub zstd_level: i32,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let clr = match args.clr.clone() {
        Some(path) => path,
        None => match tables::default_clr_path(&args.chr) {
            Some(path) => path,
            None => bail!("--clr is required unless --chr has a .chr extension"),
        },
    };

    let chr_bytes = tables::read_table(&args.chr)?;
    let clr_bytes = tables::read_table(&clr)?;

    report("chr", &chr_bytes, &args)?;
    report("clr", &clr_bytes, &args)?;

    Ok(())
}

fn report(label: &str, bytes: &[u8], args: &AnalyzeArgs) -> anyhow::Result<()> {
    let n = bytes.len() as u64;
    let h = stats::histogram(bytes);
    let distinct = h.iter().filter(|&&c| c > 0).count();
    let entropy = stats::entropy_bits(bytes);

    let mut rows: Vec<(u8, u64)> = (0u8..=255u8)
        .map(|b| (b, h[b as usize]))
        .filter(|&(_b, c)| c > 0)
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    eprintln!("--- {label} ---");
    eprintln!("bytes           = {}", n);
    eprintln!("distinct_bytes  = {}/256", distinct);
    eprintln!("entropy_bits    = {:.6} (max 8.000000)", entropy);

    if args.zstd {
        let z = zstd_size(bytes, args.zstd_level)?;
        let ratio = if z == 0 { 0.0 } else { (n as f64) / (z as f64) };
        eprintln!("zstd_level      = {}", args.zstd_level);
        eprintln!("zstd_bytes      = {}", z);
        eprintln!("ratio_raw/zstd  = {:.4}x", ratio);
    }

    let topn = args.top.min(rows.len());
    for (i, (b, c)) in rows.iter().take(topn).enumerate() {
        let pct = if n == 0 {
            0.0
        } else {
            (*c as f64) * 100.0 / (n as f64)
        };
        eprintln!(
            "#{:>2} byte=0x{:02X} count={} ({:.3}%)",
            i + 1,
            b,
            c,
            pct
        );
    }

    Ok(())
}

fn zstd_size(bytes: &[u8], level: i32) -> anyhow::Result<usize> {
    let out = zstd::stream::encode_all(Cursor::new(bytes), level)?;
    Ok(out.len())
}
