use anyhow::{Context, Result};
use stevedore::application::ProgressStore;
use stevedore::domain::entities::parse_ledger_key;
use stevedore::infrastructure::{JsonProgressRepository, LedgerLock};

use super::RunContext;

/// Clear ledger records so the next upload redoes those assets
pub fn cmd_reset(ctx: &RunContext, all: bool, assets: &[String]) -> Result<()> {
    let keys = assets
        .iter()
        .map(|a| parse_ledger_key(a).with_context(|| format!("cannot reset '{a}'")))
        .collect::<Result<Vec<_>>>()?;

    let _lock = LedgerLock::acquire(&ctx.progress_path)?;
    let mut store = ProgressStore::open(JsonProgressRepository::new(), &ctx.progress_path);

    if all {
        let cleared = store.reset_all()?;
        tracing::info!("cleared {cleared} record(s) from {}", ctx.progress_path.display());
        if ctx.is_json() {
            println!(
                "{}",
                serde_json::json!({
                    "event": "data",
                    "command": "reset",
                    "all": true,
                    "cleared": cleared,
                })
            );
        } else {
            println!(
                "Cleared {cleared} record(s) from {}",
                ctx.progress_path.display()
            );
        }
        return Ok(());
    }

    let mut reset = Vec::new();
    let mut not_found = Vec::new();
    for key in keys {
        if store.reset(key.as_str())? {
            tracing::info!("reset {key}");
            reset.push(key);
        } else {
            not_found.push(key);
        }
    }

    if ctx.is_json() {
        println!(
            "{}",
            serde_json::json!({
                "event": "data",
                "command": "reset",
                "all": false,
                "reset": reset,
                "not_found": not_found,
            })
        );
    } else {
        for key in &reset {
            println!("Reset {key}");
        }
        for key in &not_found {
            println!("No record for {key}");
        }
    }
    Ok(())
}
