use crate::item::{skill_text, DisplayItem};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The active filter state. Category constraints set to `None` or to an
/// empty string mean "All".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub hero: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Query {
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    pub fn hero(mut self, hero: impl Into<String>) -> Self {
        self.hero = Some(hero.into());
        self
    }

    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn tier(mut self, tier: impl Into<String>) -> Self {
        self.tier = Some(tier.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn normalized_keyword(&self) -> String {
        self.keyword.trim().to_lowercase()
    }

    pub fn is_empty(&self) -> bool {
        self.normalized_keyword().is_empty()
            && active(&self.hero).is_none()
            && active(&self.size).is_none()
            && active(&self.tier).is_none()
            && self.tags.is_empty()
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}

/// Lowercased text the keyword is matched against.
pub fn search_text(item: &DisplayItem) -> String {
    [
        item.name_cn.clone(),
        item.name_en.clone(),
        skill_text(&item.raw.skills),
        skill_text(&item.raw.skills_passive),
        item.tags.join(" "),
    ]
    .join(" ")
    .to_lowercase()
}

pub fn matches(item: &DisplayItem, query: &Query) -> bool {
    let keyword = query.normalized_keyword();
    if !keyword.is_empty() && !search_text(item).contains(&keyword) {
        return false;
    }
    if active(&query.hero).is_some_and(|hero| item.hero != hero) {
        return false;
    }
    if active(&query.size).is_some_and(|size| item.size != size) {
        return false;
    }
    if active(&query.tier).is_some_and(|tier| item.tier != tier) {
        return false;
    }
    query.tags.iter().all(|tag| item.has_tag(tag))
}

pub fn filter_items<'a>(items: &'a [DisplayItem], query: &Query) -> Vec<&'a DisplayItem> {
    items.iter().filter(|item| matches(item, query)).collect()
}
