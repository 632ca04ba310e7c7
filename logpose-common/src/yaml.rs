//! YAML loading helpers
//!
//! Episode files are either bare YAML or markdown with the YAML inside a
//! ```` ```yaml ```` fence.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use std::path::Path;

static YAML_FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```yaml\s*(.*?)\s*```").expect("fence pattern is valid"));

/// Return the body of the first ```` ```yaml ```` block, or the whole input
pub fn strip_markdown_fence(content: &str) -> &str {
    YAML_FENCE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map_or(content, |m| m.as_str())
}

/// Parse YAML (optionally fenced) into `T`, tagging errors with `path`
pub fn parse_document<T: DeserializeOwned>(content: &str, path: &Path) -> Result<T> {
    serde_yaml_ng::from_str(strip_markdown_fence(content)).map_err(|e| Error::yaml(path, e))
}

/// Read and parse a YAML file
pub async fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| Error::io(path, e))?;
    parse_document(&content, path)
}
