use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use lookout::domain::services::{convert_file, convert_tree, serialize};

pub fn cmd_convert(path: &Path, in_place: bool, json: bool) -> Result<()> {
    if path.is_dir() {
        if !in_place {
            bail!(
                "{} is a directory; pass --in-place to convert every *.json under it",
                path.display()
            );
        }
        let written = convert_tree(path)?;
        report(&written, json);
        return Ok(());
    }

    if in_place {
        let descriptor = convert_file(path)?;
        report(&[descriptor], json);
        return Ok(());
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    println!("{}", serialize(&content)?);
    Ok(())
}

fn report(written: &[std::path::PathBuf], json: bool) {
    if json {
        let paths: Vec<String> = written.iter().map(|p| p.display().to_string()).collect();
        println!(
            "{}",
            serde_json::json!({"event": "converted", "command": "convert", "written": paths})
        );
        return;
    }
    for path in written {
        println!("{}", path.display());
    }
}
