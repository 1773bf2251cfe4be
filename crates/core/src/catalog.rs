use crate::card::CardView;
use crate::config::CatalogConfig;
use crate::filter::{filter_items, Query};
use crate::item::{normalize, DisplayItem, RawItem};
use crate::order::{order_values, Collation};
use crate::sort::{sort_items, SortKey};
use crate::text::Translator;
use serde::Serialize;

/// Label of the "no filter" entry prefixed to every category selector.
pub const ALL_LABEL: &str = "全部";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortOption {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub heroes: Vec<String>,
    pub sizes: Vec<String>,
    pub tiers: Vec<String>,
    pub tags: Vec<String>,
    pub sorts: Vec<SortOption>,
}

/// Loaded items together with the configuration they were normalized with.
/// Built once at startup and read-only afterwards.
#[derive(Debug)]
pub struct Catalog {
    config: CatalogConfig,
    translator: Translator,
    collation: Collation,
    items: Vec<DisplayItem>,
}

impl Catalog {
    pub fn new(config: CatalogConfig, raws: Vec<RawItem>) -> Self {
        Self::with_collation(config, raws, Collation::zh_hans())
    }

    pub fn with_collation(config: CatalogConfig, raws: Vec<RawItem>, collation: Collation) -> Self {
        let translator = config.translator();
        let items: Vec<DisplayItem> = raws
            .into_iter()
            .map(|raw| normalize(raw, &config, &translator))
            .collect();
        log::debug!("normalized {} item(s)", items.len());
        Self {
            config,
            translator,
            collation,
            items,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn collation(&self) -> &Collation {
        &self.collation
    }

    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn distinct(&self, pick: fn(&DisplayItem) -> &str) -> Vec<String> {
        self.items
            .iter()
            .map(pick)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn filter_options(&self) -> FilterOptions {
        let order = &self.config.filter_option_order;
        FilterOptions {
            heroes: order_values(
                self.distinct(|item| item.hero.as_str()),
                &order.heroes,
                &self.collation,
            ),
            sizes: order_values(
                self.distinct(|item| item.size.as_str()),
                &order.sizes,
                &self.collation,
            ),
            tiers: order_values(
                self.distinct(|item| item.tier.as_str()),
                &order.tiers,
                &self.collation,
            ),
            tags: order_values(
                self.items.iter().flat_map(|item| item.tags.iter().cloned()),
                &order.tags,
                &self.collation,
            ),
            sorts: self.sort_options(),
        }
    }

    pub fn sort_options(&self) -> Vec<SortOption> {
        let labels = &self.config.sort_option_labels;
        order_values(
            labels.keys().cloned(),
            &self.config.filter_option_order.sorts,
            &self.collation,
        )
        .into_iter()
        .map(|key| SortOption {
            label: self.translator.translate_text(&labels[&key]),
            key,
        })
        .collect()
    }

    /// Keeps a requested sort key only when it has a configured label,
    /// falling back to `name`.
    pub fn resolve_sort_key(&self, raw: &str) -> SortKey {
        let raw = raw.trim();
        if self.config.sort_option_labels.contains_key(raw) {
            SortKey::parse(raw)
        } else {
            SortKey::Name
        }
    }

    pub fn search(&self, query: &Query, sort: SortKey) -> Vec<&DisplayItem> {
        let filtered = filter_items(&self.items, query);
        sort_items(filtered, sort, &self.collation)
    }

    pub fn card(&self, item: &DisplayItem) -> CardView {
        CardView::build(item, &self.config, &self.translator)
    }

    pub fn cards(&self, items: &[&DisplayItem]) -> Vec<CardView> {
        items.iter().map(|item| self.card(item)).collect()
    }

    pub fn summary(&self, matched: usize) -> String {
        format!("共 {} 个物品，当前匹配 {} 个", self.items.len(), matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raws(values: Vec<serde_json::Value>) -> Vec<RawItem> {
        values
            .into_iter()
            .map(|value| serde_json::from_value(value).expect("raw"))
            .collect()
    }

    #[test]
    fn tier_options_follow_priority() {
        let catalog = Catalog::new(
            CatalogConfig::default(),
            raws(vec![
                json!({"starting_tier": "Bronze/青铜"}),
                json!({"starting_tier": "Gold/黄金"}),
                json!({"starting_tier": "Silver/白银"}),
            ]),
        );
        assert_eq!(catalog.filter_options().tiers, vec!["青铜", "白银", "黄金"]);
    }

    #[test]
    fn empty_values_are_not_options() {
        let catalog = Catalog::new(
            CatalogConfig::default(),
            raws(vec![json!({"heroes": ""}), json!({"heroes": "Dooley", "tags": "B|A"})]),
        );
        let options = catalog.filter_options();
        assert_eq!(options.heroes, vec!["Dooley"]);
        assert!(options.sizes.is_empty());
        assert_eq!(options.tags, vec!["A", "B"]);
    }

    #[test]
    fn sort_options_use_configured_order_and_labels() {
        let mut config = CatalogConfig::default();
        config.filter_option_order.sorts = vec!["shield".into(), "name".into()];
        let catalog = Catalog::new(config, Vec::new());
        let keys: Vec<String> = catalog.sort_options().into_iter().map(|o| o.key).collect();
        assert_eq!(keys[..2], ["shield", "name"]);
        assert_eq!(keys.len(), 4);
        assert_eq!(catalog.resolve_sort_key("damage"), SortKey::Damage);
        assert_eq!(catalog.resolve_sort_key("price"), SortKey::Name);
    }

    #[test]
    fn search_filters_then_sorts() {
        let catalog = Catalog::new(
            CatalogConfig::default(),
            raws(vec![
                json!({"id": 1, "name_en": "B", "damage": 5, "tags": "Weapon"}),
                json!({"id": 2, "name_en": "A", "damage": 5, "tags": "Weapon"}),
                json!({"id": 3, "name_en": "C", "damage": 50}),
            ]),
        );
        let found = catalog.search(&Query::default().tag("Weapon"), SortKey::Damage);
        let ids: Vec<&str> = found.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, ["2", "1"]);
        assert_eq!(catalog.summary(found.len()), "共 3 个物品，当前匹配 2 个");
        assert_eq!(catalog.cards(&found).len(), 2);
    }
}
