use crate::error::LoadError;
use itemdex_core::{Catalog, CatalogConfig, ConfigOverrides, RawItem};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Status shown to the user when the catalog cannot be loaded.
pub const LOAD_FAILURE_ZH: &str = "加载失败，请确认数据文件与配置文件路径正确。";
pub const LOAD_FAILURE_EN: &str =
    "Failed to load. Check that the data file and configuration file paths are correct.";

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub config_path: PathBuf,
    /// Overrides `dbPath` from the configuration.
    pub db_path: Option<PathBuf>,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            db_path: None,
        }
    }
}

impl LoadOptions {
    pub fn new(config_path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: config_path.into(),
            db_path: None,
        }
    }

    pub fn with_db_path(mut self, db_path: impl Into<PathBuf>) -> Self {
        self.db_path = Some(db_path.into());
        self
    }
}

/// Reads the user configuration and overlays it on the defaults. A missing
/// or unreadable file yields the defaults; malformed JSON is an error.
pub fn load_config(path: &Path) -> Result<CatalogConfig, LoadError> {
    let defaults = CatalogConfig::default();
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            log::info!("no config at {}, using defaults", path.display());
            return Ok(defaults);
        }
        Err(err) => {
            log::warn!("read config {}: {err}; using defaults", path.display());
            return Ok(defaults);
        }
    };
    let overrides: ConfigOverrides =
        serde_json::from_str(&raw).map_err(|source| LoadError::ParseConfig {
            path: path.to_path_buf(),
            source,
        })?;
    log::debug!("loaded config overrides from {}", path.display());
    Ok(defaults.merged(overrides))
}

/// Reads the item array. Entries that are not JSON objects are skipped.
pub fn load_items(path: &Path) -> Result<Vec<RawItem>, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::ReadData {
        path: path.to_path_buf(),
        source,
    })?;
    parse_items(&raw).map_err(|source| LoadError::ParseData {
        path: path.to_path_buf(),
        source,
    })
}

pub fn parse_items(raw: &str) -> Result<Vec<RawItem>, serde_json::Error> {
    let entries: Vec<Value> = serde_json::from_str(raw)?;
    let mut items = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.into_iter().enumerate() {
        if !entry.is_object() {
            log::warn!("skipping item #{idx}: not an object");
            continue;
        }
        items.push(serde_json::from_value(entry)?);
    }
    Ok(items)
}

/// Relative data paths are taken from the directory holding the config file.
pub fn resolve_db_path(config_path: &Path, db_path: &str) -> PathBuf {
    let db_path = Path::new(db_path);
    if db_path.is_absolute() {
        return db_path.to_path_buf();
    }
    config_path
        .parent()
        .map(|dir| dir.join(db_path))
        .unwrap_or_else(|| db_path.to_path_buf())
}

/// Loads configuration, then data, and builds the session catalog.
pub fn load_catalog(options: &LoadOptions) -> Result<Catalog, LoadError> {
    let config = load_config(&options.config_path)?;
    let db_path = match options.db_path.as_ref() {
        Some(path) => path.clone(),
        None => resolve_db_path(&options.config_path, &config.db_path),
    };
    let items = load_items(&db_path)?;
    log::info!("loaded {} item(s) from {}", items.len(), db_path.display());
    Ok(Catalog::new(config, items))
}

pub fn normalize_locale(locale: Option<&str>) -> String {
    let raw = locale.unwrap_or("zh_CN").trim();
    if raw.is_empty() {
        return "zh_CN".to_string();
    }
    let lowered = raw.replace('-', "_").to_ascii_lowercase();
    match lowered.as_str() {
        "zh" | "zh_cn" | "zh_hans" | "zh_hans_cn" | "cn" => "zh_CN".to_string(),
        "en" | "en_us" => "en_US".to_string(),
        _ => raw.replace('-', "_"),
    }
}

pub fn load_failure_message(locale: Option<&str>) -> &'static str {
    if normalize_locale(locale) == "en_US" {
        LOAD_FAILURE_EN
    } else {
        LOAD_FAILURE_ZH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).expect("write fixture");
        path
    }

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_config(&dir.path().join("config.json")).expect("config");
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(dir.path(), "config.json", "{ not json");
        let err = load_config(&path).expect_err("should fail");
        assert!(matches!(err, LoadError::ParseConfig { .. }));
        assert_eq!(err.path(), path.as_path());
    }

    #[test]
    fn config_overrides_merge_with_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(
            dir.path(),
            "config.json",
            r#"{"dbPath": "items.json", "cardDisplay": {"tagLimit": 3}}"#,
        );
        let config = load_config(&path).expect("config");
        assert_eq!(config.db_path, "items.json");
        assert_eq!(config.card_display.tag_limit, 3);
        assert!(config.card_display.show_tags);
    }

    #[test]
    fn string_tag_limit_is_not_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write(dir.path(), "config.json", r#"{"cardDisplay":{"tagLimit":"3"}}"#);
        let config = load_config(&path).expect("config");
        assert_eq!(config.card_display.tag_limit, 3);
        assert_eq!(config.card_display.meta_fields, vec!["hero", "size", "tier"]);
    }

    #[test]
    fn parse_items_skips_non_objects() {
        let items = parse_items(r#"[{"id": 1}, null, 3, {"id": "b", "extra": true}]"#)
            .expect("items");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id(), "b");
        assert_eq!(items[1].field_text("extra"), "true");
        assert!(parse_items(r#"{"id": 1}"#).is_err());
    }

    #[test]
    fn load_catalog_resolves_db_relative_to_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::create_dir(dir.path().join("data")).expect("mkdir");
        write(
            &dir.path().join("data"),
            "items.json",
            r#"[{"id": 1, "name_en": "Cutlass"}]"#,
        );
        let config_path = write(dir.path(), "config.json", r#"{"dbPath": "data/items.json"}"#);
        let catalog = load_catalog(&LoadOptions::new(config_path)).expect("catalog");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.items()[0].name_en, "Cutlass");
    }

    #[test]
    fn missing_data_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let options = LoadOptions::new(dir.path().join("config.json"))
            .with_db_path(dir.path().join("nope.json"));
        let err = load_catalog(&options).expect_err("should fail");
        assert!(matches!(err, LoadError::ReadData { .. }));
    }

    #[test]
    fn resolve_db_path_keeps_absolute_paths() {
        let absolute = std::env::temp_dir().join("items.json");
        let resolved = resolve_db_path(Path::new("conf/config.json"), absolute.to_str().expect("utf8"));
        assert_eq!(resolved, absolute);
        assert_eq!(
            resolve_db_path(Path::new("conf/config.json"), "../items.json"),
            PathBuf::from("conf/../items.json")
        );
    }

    #[test]
    fn normalizes_locale_codes() {
        assert_eq!(normalize_locale(None), "zh_CN");
        assert_eq!(normalize_locale(Some("en")), "en_US");
        assert_eq!(normalize_locale(Some("zh-Hans")), "zh_CN");
        assert_eq!(normalize_locale(Some("fr-FR")), "fr_FR");
        assert_eq!(load_failure_message(Some("en-US")), LOAD_FAILURE_EN);
        assert_eq!(load_failure_message(None), LOAD_FAILURE_ZH);
    }
}
