use crate::text::{to_num, Translator};
use serde_json::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_ICON_HEIGHT: f64 = 72.0;
pub const DEFAULT_TAG_LIMIT: usize = 8;

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn string_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogConfig {
    pub db_path: String,
    pub icon_base: String,
    pub filter_option_order: FilterOptionOrder,
    pub sort_option_labels: BTreeMap<String, String>,
    pub card_icon: CardIcon,
    pub card_display: CardDisplay,
    pub translation: TranslationConfig,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            db_path: "../resources/items_db.json".to_string(),
            icon_base: "../resources/images".to_string(),
            filter_option_order: FilterOptionOrder::default(),
            sort_option_labels: string_map(&[
                ("name", "名称"),
                ("damage", "伤害高到低"),
                ("heal", "治疗高到低"),
                ("shield", "护盾高到低"),
            ]),
            card_icon: CardIcon::default(),
            card_display: CardDisplay::default(),
            translation: TranslationConfig::default(),
        }
    }
}

impl CatalogConfig {
    pub fn merged(&self, overrides: ConfigOverrides) -> Self {
        merge_config(self, overrides)
    }

    pub fn translator(&self) -> Translator {
        Translator::new(
            self.translation.enabled,
            self.translation.exact.clone(),
            self.translation.field_labels.clone(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptionOrder {
    pub heroes: Vec<String>,
    pub tiers: Vec<String>,
    pub sizes: Vec<String>,
    pub sorts: Vec<String>,
    pub tags: Vec<String>,
}

impl Default for FilterOptionOrder {
    fn default() -> Self {
        Self {
            heroes: Vec::new(),
            tiers: strings(&["青铜", "白银", "黄金", "钻石", "传奇"]),
            sizes: strings(&["小型", "中型", "大型"]),
            sorts: strings(&["name", "damage", "heal", "shield"]),
            tags: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardIcon {
    pub base_height: f64,
    pub width_multiplier: BTreeMap<String, f64>,
}

impl Default for CardIcon {
    fn default() -> Self {
        let mut width_multiplier = BTreeMap::new();
        width_multiplier.insert("Small".to_string(), 0.5);
        width_multiplier.insert("Medium".to_string(), 1.0);
        width_multiplier.insert("Large".to_string(), 1.5);
        Self {
            base_height: DEFAULT_ICON_HEIGHT,
            width_multiplier,
        }
    }
}

impl CardIcon {
    pub fn effective_base_height(&self) -> f64 {
        if self.base_height.is_finite() && self.base_height != 0.0 {
            self.base_height
        } else {
            DEFAULT_ICON_HEIGHT
        }
    }

    pub fn width_for(&self, size_key: &str) -> f64 {
        let multiplier = self
            .width_multiplier
            .get(size_key)
            .copied()
            .filter(|value| value.is_finite() && *value != 0.0)
            .unwrap_or(1.0);
        self.effective_base_height() * multiplier
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDisplay {
    pub meta_fields: Vec<String>,
    pub stat_fields: Vec<String>,
    pub show_tags: bool,
    pub tag_limit: usize,
}

impl Default for CardDisplay {
    fn default() -> Self {
        Self {
            meta_fields: strings(&["hero", "size", "tier"]),
            stat_fields: strings(&["damage", "heal", "shield"]),
            show_tags: true,
            tag_limit: DEFAULT_TAG_LIMIT,
        }
    }
}

impl CardDisplay {
    pub fn effective_tag_limit(&self) -> usize {
        if self.tag_limit == 0 {
            DEFAULT_TAG_LIMIT
        } else {
            self.tag_limit
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationConfig {
    pub enabled: bool,
    pub field_labels: BTreeMap<String, String>,
    pub exact: BTreeMap<String, String>,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            field_labels: BTreeMap::new(),
            exact: BTreeMap::new(),
        }
    }
}

/// User configuration as read from disk. Every field is optional; absent
/// groups leave the defaults untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOverrides {
    #[serde(default)]
    pub db_path: Option<String>,
    #[serde(default)]
    pub icon_base: Option<String>,
    #[serde(default)]
    pub filter_option_order: Option<FilterOptionOrderOverrides>,
    #[serde(default)]
    pub sort_option_labels: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub card_icon: Option<CardIconOverrides>,
    #[serde(default)]
    pub card_display: Option<CardDisplayOverrides>,
    #[serde(default)]
    pub translation: Option<TranslationOverrides>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterOptionOrderOverrides {
    #[serde(default)]
    pub heroes: Option<Vec<String>>,
    #[serde(default)]
    pub tiers: Option<Vec<String>>,
    #[serde(default)]
    pub sizes: Option<Vec<String>>,
    #[serde(default)]
    pub sorts: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardIconOverrides {
    #[serde(default)]
    pub base_height: Option<Value>,
    #[serde(default)]
    pub width_multiplier: Option<BTreeMap<String, f64>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDisplayOverrides {
    #[serde(default)]
    pub meta_fields: Option<Vec<String>>,
    #[serde(default)]
    pub stat_fields: Option<Vec<String>>,
    #[serde(default)]
    pub show_tags: Option<bool>,
    #[serde(default)]
    pub tag_limit: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationOverrides {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub field_labels: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub exact: Option<BTreeMap<String, String>>,
}

/// Numeric-looking values are accepted in any JSON type; anything that is
/// not a positive number yields the default height.
fn coerce_base_height(value: &Value) -> f64 {
    let height = to_num(value);
    if height > 0.0 {
        height
    } else {
        DEFAULT_ICON_HEIGHT
    }
}

fn coerce_tag_limit(value: &Value) -> usize {
    let limit = to_num(value).trunc();
    if limit >= 1.0 {
        limit as usize
    } else {
        DEFAULT_TAG_LIMIT
    }
}

fn replace<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn extend<V>(slot: &mut BTreeMap<String, V>, value: Option<BTreeMap<String, V>>) {
    if let Some(value) = value {
        slot.extend(value);
    }
}

/// Overlays `overrides` on `defaults`. Scalars and lists are replaced; the
/// nested groups and their maps are merged key by key.
pub fn merge_config(defaults: &CatalogConfig, overrides: ConfigOverrides) -> CatalogConfig {
    let mut out = defaults.clone();
    replace(&mut out.db_path, overrides.db_path);
    replace(&mut out.icon_base, overrides.icon_base);

    if let Some(order) = overrides.filter_option_order {
        let target = &mut out.filter_option_order;
        replace(&mut target.heroes, order.heroes);
        replace(&mut target.tiers, order.tiers);
        replace(&mut target.sizes, order.sizes);
        replace(&mut target.sorts, order.sorts);
        replace(&mut target.tags, order.tags);
    }

    extend(&mut out.sort_option_labels, overrides.sort_option_labels);

    if let Some(icon) = overrides.card_icon {
        replace(
            &mut out.card_icon.base_height,
            icon.base_height.as_ref().map(coerce_base_height),
        );
        extend(&mut out.card_icon.width_multiplier, icon.width_multiplier);
    }

    if let Some(display) = overrides.card_display {
        let target = &mut out.card_display;
        replace(&mut target.meta_fields, display.meta_fields);
        replace(&mut target.stat_fields, display.stat_fields);
        replace(&mut target.show_tags, display.show_tags);
        replace(
            &mut target.tag_limit,
            display.tag_limit.as_ref().map(coerce_tag_limit),
        );
    }

    if let Some(translation) = overrides.translation {
        let target = &mut out.translation;
        replace(&mut target.enabled, translation.enabled);
        extend(&mut target.field_labels, translation.field_labels);
        extend(&mut target.exact, translation.exact);
    }

    out
}
