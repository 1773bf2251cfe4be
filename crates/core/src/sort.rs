use crate::item::DisplayItem;
use crate::order::Collation;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Name,
    Damage,
    Heal,
    Shield,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Name,
        SortKey::Damage,
        SortKey::Heal,
        SortKey::Shield,
    ];

    /// Unrecognized keys sort by name.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "damage" => Self::Damage,
            "heal" => Self::Heal,
            "shield" => Self::Shield,
            _ => Self::Name,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Damage => "damage",
            Self::Heal => "heal",
            Self::Shield => "shield",
        }
    }

    fn stat(self, item: &DisplayItem) -> Option<f64> {
        match self {
            Self::Name => None,
            Self::Damage => Some(item.damage),
            Self::Heal => Some(item.heal),
            Self::Shield => Some(item.shield),
        }
    }
}

pub fn compare_items(
    a: &DisplayItem,
    b: &DisplayItem,
    key: SortKey,
    collation: &Collation,
) -> Ordering {
    match (key.stat(a), key.stat(b)) {
        (Some(left), Some(right)) => right
            .partial_cmp(&left)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name_en.cmp(&b.name_en)),
        _ => collation.compare(a.sort_name(), b.sort_name()),
    }
}

/// Returns the items in display order without touching the input slice.
pub fn sort_items<'a, I>(items: I, key: SortKey, collation: &Collation) -> Vec<&'a DisplayItem>
where
    I: IntoIterator<Item = &'a DisplayItem>,
{
    let mut out: Vec<&DisplayItem> = items.into_iter().collect();
    out.sort_by(|a, b| compare_items(a, b, key, collation));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use crate::item::{normalize, RawItem};
    use serde_json::{json, Value};

    fn build(values: Vec<Value>) -> Vec<DisplayItem> {
        let config = CatalogConfig::default();
        let translator = config.translator();
        values
            .into_iter()
            .map(|value| {
                let raw: RawItem = serde_json::from_value(value).expect("raw");
                normalize(raw, &config, &translator)
            })
            .collect()
    }

    fn names(items: &[&DisplayItem]) -> Vec<String> {
        items.iter().map(|item| item.name_en.clone()).collect()
    }

    #[test]
    fn parse_defaults_to_name() {
        assert_eq!(SortKey::parse("damage"), SortKey::Damage);
        assert_eq!(SortKey::parse(" Heal "), SortKey::Heal);
        assert_eq!(SortKey::parse("price"), SortKey::Name);
        assert_eq!(SortKey::parse(""), SortKey::Name);
    }

    #[test]
    fn stat_ties_break_on_ascending_english_name() {
        let items = build(vec![
            json!({"name_en": "B", "damage": 5}),
            json!({"name_en": "A", "damage": 5}),
            json!({"name_en": "C", "damage": 9}),
        ]);
        let sorted = sort_items(&items, SortKey::Damage, &Collation::code_point());
        assert_eq!(names(&sorted), ["C", "A", "B"]);
        assert_eq!(items[0].name_en, "B");
    }

    #[test]
    fn heal_and_shield_sort_descending() {
        let items = build(vec![
            json!({"name_en": "low", "heal": 1, "shield": 30}),
            json!({"name_en": "high", "heal": 10, "shield": "bad"}),
        ]);
        let collation = Collation::code_point();
        assert_eq!(names(&sort_items(&items, SortKey::Heal, &collation)), ["high", "low"]);
        assert_eq!(names(&sort_items(&items, SortKey::Shield, &collation)), ["low", "high"]);
    }

    #[test]
    fn name_sort_collates_chinese_names() {
        let items = build(vec![
            json!({"name_cn": "中", "name_en": "Alpha"}),
            json!({"name_cn": "波", "name_en": "Zulu"}),
            json!({"name_cn": "阿", "name_en": "Omega"}),
        ]);
        let sorted = sort_items(&items, SortKey::Name, &Collation::zh_hans());
        assert_eq!(names(&sorted), ["Omega", "Zulu", "Alpha"]);
    }

    #[test]
    fn name_sort_falls_back_to_english_name() {
        let items = build(vec![
            json!({"name_cn": "c", "name_en": "Alpha"}),
            json!({"name_en": "b"}),
            json!({"name_cn": "a", "name_en": "Zulu"}),
        ]);
        let sorted = sort_items(&items, SortKey::Name, &Collation::code_point());
        assert_eq!(names(&sorted), ["Zulu", "b", "Alpha"]);
    }
}
