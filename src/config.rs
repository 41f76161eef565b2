//! Loading checker options from a `phpcast.json` file.
//!
//! ```jsonc
//! {
//!     // Inherit from a shared file; relative to this one.
//!     "extends": "../phpcast.base.json",
//!     "inspection": {
//!         "reportCategory": "warning",
//!         "trustPropertyDocHints": "false",
//!         "skipDocOnlyReturns": true,
//!         "maxInferenceDepth": 200,
//!     },
//! }
//! ```
//!
//! Comments and trailing commas are accepted. Boolean options may be given
//! as strings.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use phpcast_checker::CheckerOptions;
use phpcast_common::DiagnosticCategory;
use serde::{Deserialize, Deserializer};

/// Conventional config file name.
pub const CONFIG_FILE_NAME: &str = "phpcast.json";

fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(value)) => Ok(Some(value)),
        Some(BoolOrString::String(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{text}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhpcastConfig {
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub inspection: Option<InspectionOptions>,
}

/// Raw inspection options; unset fields fall back to the base config, then
/// to [`CheckerOptions::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionOptions {
    #[serde(default)]
    pub report_category: Option<DiagnosticCategory>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub trust_property_doc_hints: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub skip_doc_only_returns: Option<bool>,
    #[serde(default)]
    pub max_inference_depth: Option<u32>,
}

pub fn parse_config(source: &str) -> Result<PhpcastConfig> {
    let normalized = normalize_jsonc(source);
    let config = serde_json::from_str(&normalized).context("failed to parse phpcast config JSON")?;
    Ok(config)
}

/// Load a config file and everything it extends.
pub fn load_config(path: &Path) -> Result<PhpcastConfig> {
    let mut visited = HashSet::new();
    load_config_inner(path, &mut visited)
}

fn load_config_inner(path: &Path, visited: &mut HashSet<PathBuf>) -> Result<PhpcastConfig> {
    let canonical = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if !visited.insert(canonical.clone()) {
        bail!("config extends cycle detected at {}", canonical.display());
    }

    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let mut config = parse_config(&source)
        .with_context(|| format!("failed to parse config: {}", path.display()))?;

    if let Some(extends) = config.extends.take() {
        let base_dir = path
            .parent()
            .ok_or_else(|| anyhow!("config has no parent directory"))?;
        let base_path = base_dir.join(extends);
        tracing::debug!(config = %path.display(), base = %base_path.display(), "following extends");
        let base = load_config_inner(&base_path, visited)?;
        config = merge_configs(base, config);
    }

    visited.remove(&canonical);
    Ok(config)
}

fn merge_configs(base: PhpcastConfig, child: PhpcastConfig) -> PhpcastConfig {
    let inspection = match (base.inspection, child.inspection) {
        (Some(base), Some(child)) => Some(InspectionOptions {
            report_category: child.report_category.or(base.report_category),
            trust_property_doc_hints: child
                .trust_property_doc_hints
                .or(base.trust_property_doc_hints),
            skip_doc_only_returns: child.skip_doc_only_returns.or(base.skip_doc_only_returns),
            max_inference_depth: child.max_inference_depth.or(base.max_inference_depth),
        }),
        (base, child) => child.or(base),
    };
    PhpcastConfig {
        extends: None,
        inspection,
    }
}

/// Apply a parsed config on top of the defaults.
pub fn resolve_checker_options(config: &PhpcastConfig) -> Result<CheckerOptions> {
    let mut resolved = CheckerOptions::default();
    let Some(options) = config.inspection.as_ref() else {
        return Ok(resolved);
    };

    if let Some(category) = options.report_category {
        resolved.report_category = category;
    }
    if let Some(trust) = options.trust_property_doc_hints {
        resolved.trust_property_doc_hints = trust;
    }
    if let Some(skip) = options.skip_doc_only_returns {
        resolved.skip_doc_only_returns = skip;
    }
    if let Some(depth) = options.max_inference_depth {
        if depth == 0 {
            bail!("maxInferenceDepth must be at least 1");
        }
        resolved.max_inference_depth = depth;
    }

    Ok(resolved)
}

/// Read `path` (following `extends`) and resolve checker options.
pub fn load_checker_options(path: &Path) -> Result<CheckerOptions> {
    let config = load_config(path)?;
    resolve_checker_options(&config)
        .with_context(|| format!("invalid options in {}", path.display()))
}

/// Strip `//` and `/* */` comments and trailing commas, leaving string
/// contents untouched.
fn normalize_jsonc(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(ch) = chars.next() {
        if in_string {
            out.push(ch);
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (ch, chars.peek().copied()) {
            ('"', _) => {
                in_string = true;
                out.push(ch);
            }
            ('/', Some('/')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut previous = '\0';
                for skipped in chars.by_ref() {
                    if previous == '*' && skipped == '/' {
                        break;
                    }
                    if skipped == '\n' {
                        out.push('\n');
                    }
                    previous = skipped;
                }
            }
            (']' | '}', _) => {
                // Drop a comma left dangling before the closing bracket.
                let trimmed = out.trim_end().len();
                if out[..trimmed].ends_with(',') {
                    out.truncate(trimmed - 1);
                }
                out.push(ch);
            }
            _ => out.push(ch),
        }
    }

    out
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
