use crate::config::CatalogConfig;
use crate::text::{cn_first, en_first, parse_tokens, safe_str, to_num, Translator};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

pub const ICON_EXTENSION: &str = "webp";

/// An item record as found in the data file. Known fields are kept untyped
/// because the source mixes strings, numbers and nulls; read them through
/// the accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub name_cn: Value,
    #[serde(default)]
    pub name_en: Value,
    #[serde(default)]
    pub heroes: Value,
    #[serde(default)]
    pub size: Value,
    #[serde(default)]
    pub starting_tier: Value,
    #[serde(default)]
    pub tags: Value,
    #[serde(default)]
    pub hidden_tags: Value,
    #[serde(default)]
    pub damage: Value,
    #[serde(default)]
    pub heal: Value,
    #[serde(default)]
    pub shield: Value,
    #[serde(default)]
    pub skills: Value,
    #[serde(default)]
    pub skills_passive: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawItem {
    pub fn id(&self) -> String {
        safe_str(&self.id)
    }

    pub fn name_cn(&self) -> String {
        safe_str(&self.name_cn)
    }

    pub fn name_en(&self) -> String {
        safe_str(&self.name_en)
    }

    /// Looks up any field by its data-file key, known or extra.
    pub fn field(&self, key: &str) -> &Value {
        let known = match key {
            "id" => Some(&self.id),
            "name_cn" => Some(&self.name_cn),
            "name_en" => Some(&self.name_en),
            "heroes" => Some(&self.heroes),
            "size" => Some(&self.size),
            "starting_tier" => Some(&self.starting_tier),
            "tags" => Some(&self.tags),
            "hidden_tags" => Some(&self.hidden_tags),
            "damage" => Some(&self.damage),
            "heal" => Some(&self.heal),
            "shield" => Some(&self.shield),
            "skills" => Some(&self.skills),
            "skills_passive" => Some(&self.skills_passive),
            _ => None,
        };
        known
            .or_else(|| self.extra.get(key))
            .unwrap_or(&Value::Null)
    }

    pub fn field_text(&self, key: &str) -> String {
        safe_str(self.field(key))
    }

    pub fn field_num(&self, key: &str) -> f64 {
        to_num(self.field(key))
    }
}

/// Flattens a skill list into `"en cn"` pairs joined by spaces.
pub fn skill_text(skills: &Value) -> String {
    let Value::Array(entries) = skills else {
        return String::new();
    };
    entries
        .iter()
        .map(|entry| {
            format!(
                "{} {}",
                safe_str(entry.get("en").unwrap_or(&Value::Null)),
                safe_str(entry.get("cn").unwrap_or(&Value::Null))
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayItem {
    pub id: String,
    pub name_cn: String,
    pub name_en: String,
    pub hero: String,
    pub size_key: String,
    pub size: String,
    pub tier: String,
    pub tags: Vec<String>,
    pub damage: f64,
    pub heal: f64,
    pub shield: f64,
    pub icon: String,
    #[serde(skip)]
    pub raw: RawItem,
}

impl DisplayItem {
    /// Chinese name when present, English otherwise.
    pub fn sort_name(&self) -> &str {
        if self.name_cn.is_empty() {
            &self.name_en
        } else {
            &self.name_cn
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.binary_search_by(|probe| probe.as_str().cmp(tag)).is_ok()
    }
}

pub fn normalize(raw: RawItem, config: &CatalogConfig, translator: &Translator) -> DisplayItem {
    let mut tags = BTreeSet::new();
    tags.extend(parse_tokens(&safe_str(&raw.tags), translator));
    tags.extend(parse_tokens(&safe_str(&raw.hidden_tags), translator));

    let heroes = safe_str(&raw.heroes);
    let size = safe_str(&raw.size);
    let tier = safe_str(&raw.starting_tier);
    let id = raw.id();

    DisplayItem {
        name_cn: raw.name_cn(),
        name_en: raw.name_en(),
        hero: translator.translate_text(&cn_first(&heroes)),
        size_key: en_first(&size),
        size: translator.translate_text(&cn_first(&size)),
        tier: translator.translate_text(&cn_first(&tier)),
        tags: tags.into_iter().collect(),
        damage: to_num(&raw.damage),
        heal: to_num(&raw.heal),
        shield: to_num(&raw.shield),
        icon: format!("{}/{}.{}", config.icon_base, id, ICON_EXTENSION),
        id,
        raw,
    }
}
