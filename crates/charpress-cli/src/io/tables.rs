// crates/charpress-cli/src/io/tables.rs

use std::path::{Path, PathBuf};

use anyhow::Context;

/// Default color-table path: the `.clr` sibling of a `.chr` input.
pub fn default_clr_path(chr: &Path) -> Option<PathBuf> {
    let ext = chr.extension()?.to_str()?;
    if ext.eq_ignore_ascii_case("chr") {
        Some(chr.with_extension("clr"))
    } else {
        None
    }
}

/// Default output path: the `.opt` sibling, keeping the input name
/// (`tiles.chr` -> `tiles.chr.opt`).
pub fn default_opt_path(input: &Path) -> PathBuf {
    let mut name = input
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".opt");
    input.with_file_name(name)
}

pub fn read_table(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read table: {}", path.display()))
}

pub fn write_table(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("write table: {}", path.display()))?;
    Ok(())
}

pub fn crc32(bytes: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(bytes);
    hasher.finalize()
}
