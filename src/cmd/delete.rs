use anyhow::Result;
use serde_json::json;

use weightlog::output;

pub fn run(ids: &[String], human_flag: bool) -> Result<()> {
    let (_config, mut store) = super::open_store()?;
    let change = store.delete(ids)?;

    let deleted = change.deleted_ids();

    if human_flag {
        let n = deleted.len();
        println!("Deleted {} entr{}", n, if n == 1 { "y" } else { "ies" });
        super::warn_if_unsaved(&change);
    } else {
        let out = output::success(
            "delete",
            json!({
                "deleted": deleted,
                "remaining": store.len(),
                "durability": super::durability(&change),
            }),
        );
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
