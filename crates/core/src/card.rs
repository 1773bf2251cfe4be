use crate::config::CatalogConfig;
use crate::item::DisplayItem;
use crate::text::{format_num, Translator};
use serde::Serialize;

pub const UNTITLED: &str = "(未命名)";

/// Inline image shown when an item icon fails to load.
pub const FALLBACK_ICON: &str = "data:image/svg+xml;utf8,%3Csvg%20xmlns%3D'http%3A%2F%2Fwww.w3.org%2F2000%2Fsvg'%20width%3D'128'%20height%3D'128'%3E%3Crect%20width%3D'100%25'%20height%3D'100%25'%20fill%3D'%23e7eef5'%2F%3E%3Ctext%20x%3D'50%25'%20y%3D'54%25'%20dominant-baseline%3D'middle'%20text-anchor%3D'middle'%20fill%3D'%235b7288'%20font-family%3D'sans-serif'%20font-size%3D'20'%3ENO%20ICON%3C%2Ftext%3E%3C%2Fsvg%3E";

const TOKEN_SEPARATOR: &str = " | ";

/// Everything the presentation layer needs to draw one card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub meta: String,
    pub stats: String,
    pub icon_url: String,
    pub fallback_icon: &'static str,
    pub icon_width: f64,
    pub icon_height: f64,
    pub chips: Vec<String>,
}

impl CardView {
    pub fn build(item: &DisplayItem, config: &CatalogConfig, translator: &Translator) -> Self {
        let name_en = translator.translate_text(&item.name_en);
        let title = if !item.name_cn.is_empty() {
            item.name_cn.clone()
        } else if !name_en.is_empty() {
            name_en.clone()
        } else {
            UNTITLED.to_string()
        };
        let subtitle = if item.name_cn.is_empty() {
            name_en
        } else {
            String::new()
        };

        let display = &config.card_display;
        let meta = join_tokens(
            display
                .meta_fields
                .iter()
                .map(|key| meta_token(item, key, translator)),
        );
        let stats = join_tokens(
            display
                .stat_fields
                .iter()
                .map(|key| stat_token(item, key, translator)),
        );
        let chips = if display.show_tags {
            item.tags
                .iter()
                .take(display.effective_tag_limit())
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        Self {
            id: item.id.clone(),
            title,
            subtitle,
            meta,
            stats,
            icon_url: item.icon.clone(),
            fallback_icon: FALLBACK_ICON,
            icon_width: config.card_icon.width_for(&item.size_key),
            icon_height: config.card_icon.effective_base_height(),
            chips,
        }
    }
}

fn join_tokens(tokens: impl Iterator<Item = String>) -> String {
    tokens
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(TOKEN_SEPARATOR)
}

fn labelled(value: &str, label: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!("{label}: {value}")
    }
}

fn extra_token(item: &DisplayItem, key: &str, translator: &Translator) -> String {
    let raw = item.raw.field_text(key);
    if raw.is_empty() {
        return String::new();
    }
    format!(
        "{}: {}",
        translator.field_label(key),
        translator.translate_text(&raw)
    )
}

pub fn meta_token(item: &DisplayItem, key: &str, translator: &Translator) -> String {
    match key {
        "hero" => labelled(&item.hero, "英雄"),
        "size" => labelled(&item.size, "尺寸"),
        "tier" => labelled(&item.tier, "起始品质"),
        _ => extra_token(item, key, translator),
    }
}

pub fn stat_token(item: &DisplayItem, key: &str, translator: &Translator) -> String {
    let (label, value) = match key {
        "damage" => ("伤害", item.damage),
        "heal" => ("治疗", item.heal),
        "shield" => ("护盾", item.shield),
        "burn" => ("灼烧", item.raw.field_num("burn")),
        "poison" => ("剧毒", item.raw.field_num("poison")),
        "crit" => ("暴击", item.raw.field_num("crit")),
        "cooldown" => ("冷却", item.raw.field_num("cooldown")),
        _ => return extra_token(item, key, translator),
    };
    format!("{label} {}", format_num(value))
}
