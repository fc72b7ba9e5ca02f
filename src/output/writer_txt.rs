use std::fs;
use std::path::Path;

use anyhow::Context;

/// Write `paths` one per line. No header, no trailing newline after the last entry.
pub fn write_endpoints(path: &Path, paths: &[String]) -> anyhow::Result<()> {
    fs::write(path, paths.join("\n"))
        .with_context(|| format!("failed to write endpoints to {}", path.display()))?;
    Ok(())
}
