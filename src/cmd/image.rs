use anyhow::Result;
use serde_json::json;
use std::io::Write;
use std::path::Path;

use weightlog::core::store::StoreError;
use weightlog::output;

/// Write the photo attached to entry `id` to `dest`, or raw to stdout.
pub fn run(id: &str, dest: Option<&Path>, human: bool) -> Result<()> {
    let (_config, store) = super::open_store()?;
    let entry = store
        .get(id)
        .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
    let Some(bytes) = &entry.image else {
        anyhow::bail!("entry {} has no image", id);
    };

    if let Some(path) = dest {
        std::fs::write(path, bytes)?;
        if human {
            println!("Wrote {} bytes to {}", bytes.len(), path.display());
        } else {
            let out = output::success(
                "image",
                json!({ "id": id, "path": path.display().to_string(), "bytes": bytes.len() }),
            );
            println!("{}", serde_json::to_string(&out)?);
        }
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(bytes)?;
        stdout.flush()?;
    }
    Ok(())
}
