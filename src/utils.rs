// src/utils.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::types::Language;

/// Normalize a language code or name. Unknown or missing values are English.
pub fn normalize_language(lang: Option<&str>) -> Language {
    let Some(lang) = lang.map(|s| s.trim().to_lowercase()) else {
        return Language::En;
    };
    match lang.as_str() {
        "korean" | "한국어" => Language::Ko,
        "english" => Language::En,
        "japanese" | "日本語" => Language::Ja,
        "chinese" | "中文" => Language::Zh,
        code => Language::from_locale(code).unwrap_or_default(),
    }
}

/// Build output file path, refusing names that would escape `base`
pub fn output_file_path(base: &Path, filename: &str) -> Result<PathBuf> {
    let name = Path::new(filename)
        .file_name()
        .filter(|name| name.to_str() == Some(filename))
        .ok_or_else(|| anyhow::anyhow!("Invalid output file name: {}", filename))?;
    Ok(base.join(name))
}

/// Write bytes, creating parent directories as needed
pub async fn write_file_bytes(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent).await?;
    }

    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
    tokio::fs::create_dir_all(path)
        .await
        .with_context(|| format!("Failed to create directory: {}", path.display()))
}
