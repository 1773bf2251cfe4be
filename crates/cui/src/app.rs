use anyhow::{Context, Result};
use itemdex_core::{Catalog, CardView, FilterOptions, Query, SortKey};
use itemdex_data::{load_catalog, normalize_locale, LoadOptions};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiLocale {
    EnUs,
    ZhCn,
}

impl UiLocale {
    pub fn from_opt(value: Option<&str>) -> Self {
        let normalized = normalize_locale(value);
        if normalized == "en_US" {
            Self::EnUs
        } else {
            Self::ZhCn
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::EnUs => "en_US",
            Self::ZhCn => "zh_CN",
        }
    }

    pub fn text<'a>(self, en: &'a str, zh: &'a str) -> &'a str {
        if matches!(self, Self::ZhCn) {
            zh
        } else {
            en
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Keyword,
    Hero,
    Size,
    Tier,
    Sort,
    Tags,
    Cards,
}

impl FocusPane {
    const ORDER: [FocusPane; 7] = [
        FocusPane::Keyword,
        FocusPane::Hero,
        FocusPane::Size,
        FocusPane::Tier,
        FocusPane::Sort,
        FocusPane::Tags,
        FocusPane::Cards,
    ];

    fn step(self, forward: bool) -> Self {
        let len = Self::ORDER.len();
        let idx = Self::ORDER
            .iter()
            .position(|pane| *pane == self)
            .unwrap_or(0);
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        Self::ORDER[next]
    }

    pub fn is_selector(self) -> bool {
        matches!(self, Self::Hero | Self::Size | Self::Tier | Self::Sort)
    }
}

/// One category selector. Index 0 is the "All" entry.
#[derive(Debug, Clone, Default)]
pub struct Selector {
    pub values: Vec<String>,
    pub index: usize,
}

impl Selector {
    fn new(values: Vec<String>) -> Self {
        Self { values, index: 0 }
    }

    pub fn selected(&self) -> Option<&str> {
        if self.index == 0 {
            None
        } else {
            self.values.get(self.index - 1).map(String::as_str)
        }
    }

    fn cycle(&mut self, forward: bool) {
        let len = self.values.len() + 1;
        self.index = if forward {
            (self.index + 1) % len
        } else {
            (self.index + len - 1) % len
        };
    }
}

pub struct App {
    pub locale: UiLocale,
    pub catalog: Catalog,
    pub options: FilterOptions,
    pub focus: FocusPane,
    pub keyword: String,
    pub hero: Selector,
    pub size: Selector,
    pub tier: Selector,
    pub sort_index: usize,
    pub selected_tags: BTreeSet<String>,
    pub tag_cursor: usize,
    pub card_cursor: usize,
    pub cards: Vec<CardView>,
    pub status_line: String,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn bootstrap(locale: UiLocale, options: &LoadOptions) -> Result<Self> {
        let catalog = load_catalog(options).with_context(|| {
            format!("load catalog from {}", options.config_path.display())
        })?;
        Ok(Self::from_catalog(locale, catalog))
    }

    pub fn from_catalog(locale: UiLocale, catalog: Catalog) -> Self {
        let options = catalog.filter_options();
        let sort_index = options
            .sorts
            .iter()
            .position(|sort| sort.key == SortKey::Name.as_str())
            .unwrap_or(0);
        let mut app = Self {
            locale,
            hero: Selector::new(options.heroes.clone()),
            size: Selector::new(options.sizes.clone()),
            tier: Selector::new(options.tiers.clone()),
            options,
            catalog,
            focus: FocusPane::Keyword,
            keyword: String::new(),
            sort_index,
            selected_tags: BTreeSet::new(),
            tag_cursor: 0,
            card_cursor: 0,
            cards: Vec::new(),
            status_line: String::new(),
            show_help: false,
            should_quit: false,
        };
        app.apply_filters();
        app
    }

    pub fn query(&self) -> Query {
        Query {
            keyword: self.keyword.clone(),
            hero: self.hero.selected().map(str::to_string),
            size: self.size.selected().map(str::to_string),
            tier: self.tier.selected().map(str::to_string),
            tags: self.selected_tags.clone(),
        }
    }

    pub fn sort_key(&self) -> SortKey {
        self.options
            .sorts
            .get(self.sort_index)
            .map(|sort| self.catalog.resolve_sort_key(&sort.key))
            .unwrap_or_default()
    }

    pub fn sort_label(&self) -> &str {
        self.options
            .sorts
            .get(self.sort_index)
            .map(|sort| sort.label.as_str())
            .unwrap_or("-")
    }

    /// Re-runs filter, sort and card building from the current controls.
    pub fn apply_filters(&mut self) {
        let found = self.catalog.search(&self.query(), self.sort_key());
        self.cards = self.catalog.cards(&found);
        self.status_line = self.catalog.summary(self.cards.len());
        if self.card_cursor >= self.cards.len() {
            self.card_cursor = self.cards.len().saturating_sub(1);
        }
    }

    pub fn focus_label(&self, pane: FocusPane) -> &'static str {
        match pane {
            FocusPane::Keyword => self.locale.text("Keyword", "关键词"),
            FocusPane::Hero => self.locale.text("Hero", "英雄"),
            FocusPane::Size => self.locale.text("Size", "尺寸"),
            FocusPane::Tier => self.locale.text("Tier", "品质"),
            FocusPane::Sort => self.locale.text("Sort", "排序"),
            FocusPane::Tags => self.locale.text("Tags", "标签"),
            FocusPane::Cards => self.locale.text("Items", "物品"),
        }
    }

    pub fn all_label(&self) -> &'static str {
        self.locale.text("All", itemdex_core::ALL_LABEL)
    }

    pub fn cycle_focus(&mut self, forward: bool) {
        self.focus = self.focus.step(forward);
    }

    pub fn move_cursor(&mut self, down: bool) {
        match self.focus {
            FocusPane::Tags => {
                let len = self.options.tags.len();
                move_index(&mut self.tag_cursor, len, down);
            }
            FocusPane::Cards => {
                let len = self.cards.len();
                move_index(&mut self.card_cursor, len, down);
            }
            FocusPane::Hero | FocusPane::Size | FocusPane::Tier | FocusPane::Sort => {
                self.cycle_selector(down);
            }
            FocusPane::Keyword => {}
        }
    }

    pub fn cycle_selector(&mut self, forward: bool) {
        match self.focus {
            FocusPane::Hero => self.hero.cycle(forward),
            FocusPane::Size => self.size.cycle(forward),
            FocusPane::Tier => self.tier.cycle(forward),
            FocusPane::Sort => {
                let len = self.options.sorts.len();
                if len == 0 {
                    return;
                }
                self.sort_index = if forward {
                    (self.sort_index + 1) % len
                } else {
                    (self.sort_index + len - 1) % len
                };
            }
            FocusPane::Keyword | FocusPane::Tags | FocusPane::Cards => return,
        }
        self.apply_filters();
    }

    pub fn toggle_focused_tag(&mut self) {
        if self.focus != FocusPane::Tags {
            return;
        }
        let Some(tag) = self.options.tags.get(self.tag_cursor).cloned() else {
            return;
        };
        if !self.selected_tags.remove(&tag) {
            self.selected_tags.insert(tag);
        }
        self.apply_filters();
    }

    pub fn clear_tags(&mut self) {
        self.selected_tags.clear();
        self.apply_filters();
    }

    pub fn push_keyword(&mut self, ch: char) {
        self.keyword.push(ch);
        self.apply_filters();
    }

    pub fn pop_keyword(&mut self) {
        if self.keyword.pop().is_some() {
            self.apply_filters();
        }
    }

    pub fn clear_keyword(&mut self) {
        if !self.keyword.is_empty() {
            self.keyword.clear();
            self.apply_filters();
        }
    }

    pub fn selected_card(&self) -> Option<&CardView> {
        self.cards.get(self.card_cursor)
    }

    pub fn selector_label(&self, selector: &Selector) -> String {
        match selector.selected() {
            Some(value) => self.catalog.translator().translate_text(value),
            None => self.all_label().to_string(),
        }
    }

    pub fn tag_label(&self, tag: &str) -> String {
        self.catalog.translator().translate_text(tag)
    }
}

fn move_index(index: &mut usize, len: usize, down: bool) {
    if len == 0 {
        *index = 0;
        return;
    }
    if down {
        *index = (*index + 1).min(len - 1);
    } else {
        *index = index.saturating_sub(1);
    }
}
