use std::path::Path;

/// The 12-character uppercase ASCII title from a ROM's header (bytes
/// 0xA0..0xAC). Exposed for display; nothing else in the core reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RomHeader {
    pub title: String,
}

impl RomHeader {
    pub fn parse(rom: &[u8]) -> anyhow::Result<Self> {
        anyhow::ensure!(rom.len() >= 0xAC, "ROM is too small to contain a header");
        let title = String::from_utf8_lossy(&rom[0xA0..0xAC])
            .trim_end_matches('\0')
            .to_string();
        Ok(Self { title })
    }
}

/// Read a ROM image from disk. Parsing and loading into the memory map are
/// the outer driver's concern beyond this boundary; this only gets the
/// bytes off disk and off the filesystem-error path.
pub fn load_rom_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<u8>> {
    let bytes = std::fs::read(path.as_ref())
        .map_err(|e| anyhow::anyhow!("failed to read ROM at {}: {e}", path.as_ref().display()))?;
    Ok(bytes)
}
