use itemdex_core::{Query, SortKey};
use itemdex_data::{load_catalog, LoadOptions};
use std::path::PathBuf;

fn assets_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("assets")
}

fn catalog() -> itemdex_core::Catalog {
    load_catalog(&LoadOptions::new(assets_root().join("config.json"))).expect("load catalog")
}

fn ids(items: &[&itemdex_core::DisplayItem]) -> Vec<String> {
    items.iter().map(|item| item.id.clone()).collect()
}

#[test]
fn loads_and_normalizes_sample_items() {
    let catalog = catalog();
    assert_eq!(catalog.len(), 7);
    let cutlass = &catalog.items()[0];
    assert_eq!(cutlass.hero, "瓦妮莎");
    assert_eq!(cutlass.size, "小型");
    assert_eq!(cutlass.size_key, "Small");
    assert_eq!(cutlass.tier, "青铜");
    assert_eq!(cutlass.tags, vec!["伤害", "武器"]);
    let anchor = catalog
        .items()
        .iter()
        .find(|item| item.id == "old_anchor")
        .expect("anchor");
    assert_eq!(anchor.hero, "通用");
}

#[test]
fn sample_filter_options_follow_configured_order() {
    let options = catalog().filter_options();
    assert_eq!(options.heroes, vec!["瓦妮莎", "杜利", "朱尔斯", "通用"]);
    assert_eq!(options.sizes, vec!["小型", "中型", "大型"]);
    assert_eq!(options.tiers, vec!["青铜", "白银", "黄金", "钻石", "传奇"]);
    assert_eq!(options.tags[..3], ["武器", "护盾", "灼烧"]);
    assert_eq!(options.tags.len(), 8);
    let sort_keys: Vec<&str> = options.sorts.iter().map(|sort| sort.key.as_str()).collect();
    assert_eq!(sort_keys, ["name", "damage", "heal", "shield"]);
}

#[test]
fn damage_sort_breaks_ties_by_english_name() {
    let catalog = catalog();
    let found = catalog.search(&Query::default(), SortKey::Damage);
    assert_eq!(
        ids(&found),
        [
            "old_anchor",
            "fire_claw",
            "mech_pup",
            "cutlass",
            "bandage",
            "spice_cake",
            "tower_shield"
        ]
    );
}

#[test]
fn combined_filters_narrow_results() {
    let catalog = catalog();
    let by_keyword = catalog.search(&Query::default().keyword("SHIELD"), SortKey::Name);
    assert_eq!(ids(&by_keyword), ["tower_shield"]);

    let by_tags = catalog.search(&Query::default().tag("武器").tag("护盾"), SortKey::Name);
    assert_eq!(ids(&by_tags), ["old_anchor"]);

    let by_category = catalog.search(&Query::default().hero("杜利").tier("黄金"), SortKey::Name);
    assert_eq!(ids(&by_category), ["fire_claw"]);
}

#[test]
fn sample_cards_use_configured_fields() {
    let catalog = catalog();
    let card = catalog.card(&catalog.items()[0]);
    assert_eq!(card.title, "弯刀");
    assert_eq!(card.meta, "英雄: 瓦妮莎 | 尺寸: 小型 | 起始品质: 青铜 | 类型: 武器");
    assert_eq!(card.stats, "伤害 10 | 治疗 0 | 护盾 0 | 灼烧 0 | 冷却 4");
    assert_eq!(card.icon_url, "images/cutlass.webp");
    assert_eq!(card.icon_width, 36.0);

    let cake = catalog
        .items()
        .iter()
        .find(|item| item.id == "spice_cake")
        .expect("cake");
    let card = catalog.card(cake);
    assert_eq!(card.title, "Spice Cake");
    assert_eq!(card.subtitle, "Spice Cake");
    assert_eq!(card.chips, vec!["治疗", "灼烧", "食物"]);
}
