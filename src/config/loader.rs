//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LookoutError, LookoutResult};

use super::types::Config;
use super::ConfigWarning;

/// Config file looked up in the checkout root
pub const DEFAULT_CONFIG_FILE: &str = "lookout.json";

/// TOML alternative to `lookout.json`
pub const TOML_CONFIG_FILE: &str = "lookout.toml";

/// The config file in `repo_root`, JSON first
pub fn find_config(repo_root: &Path) -> Option<PathBuf> {
    [DEFAULT_CONFIG_FILE, TOML_CONFIG_FILE]
        .iter()
        .map(|name| repo_root.join(name))
        .find(|path| path.is_file())
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
///
/// `*.toml` files are read as TOML, everything else as JSON.
pub fn load_with_warnings(path: &Path) -> LookoutResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    let invalid = |message: String| LookoutError::InvalidConfig {
        file: path.to_path_buf(),
        message,
    };

    let mut unknown_paths: Vec<String> = Vec::new();
    let is_toml = path.extension().map(|e| e == "toml").unwrap_or(false);

    let config: Config = if is_toml {
        let deserializer = toml::de::Deserializer::new(&content);
        serde_ignored::deserialize(deserializer, |p| unknown_paths.push(p.to_string()))
            .map_err(|e| invalid(e.to_string()))?
    } else {
        let mut deserializer = serde_json::Deserializer::from_str(&content);
        let config: Config = serde_ignored::deserialize(&mut deserializer, |p| {
            unknown_paths.push(p.to_string())
        })
        .map_err(|e| invalid(e.to_string()))?;
        deserializer.end().map_err(|e| invalid(e.to_string()))?;
        config
    };

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Apply environment variable overrides (LOOKOUT_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |name| std::env::var(name).ok())
}

pub(crate) fn apply_overrides(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
    // LOOKOUT_VLT
    if let Some(vlt) = var("LOOKOUT_VLT").filter(|v| !v.trim().is_empty()) {
        config.vlt = Some(vlt);
    }

    // LOOKOUT_INSTANCES (comma-separated)
    if let Some(instances) = var("LOOKOUT_INSTANCES") {
        let parsed: Vec<String> = instances
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if !parsed.is_empty() {
            config.instances = parsed;
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "instances",
        "jcrRootPaths",
        "slingInitialContentPaths",
        "filesystem",
        "jcr",
        "latencyMs",
        "commands",
        "watch",
        "command",
        "pwd",
        "vlt",
        "ignore",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
