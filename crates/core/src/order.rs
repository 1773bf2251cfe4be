use icu_collator::{Collator, CollatorOptions};
use icu_locid::locale;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Locale-aware string comparison for display ordering (simplified Chinese
/// collation). Falls back to code-point order when no collation data is
/// available.
pub struct Collation {
    collator: Option<Collator>,
}

impl Collation {
    pub fn zh_hans() -> Self {
        let locale = locale!("zh-Hans-CN");
        match Collator::try_new(&(&locale).into(), CollatorOptions::new()) {
            Ok(collator) => Self {
                collator: Some(collator),
            },
            Err(err) => {
                log::warn!("chinese collation unavailable, using code-point order: {err}");
                Self::code_point()
            }
        }
    }

    pub fn code_point() -> Self {
        Self { collator: None }
    }

    pub fn compare(&self, left: &str, right: &str) -> Ordering {
        match self.collator.as_ref() {
            Some(collator) => collator.compare(left, right),
            None => left.cmp(right),
        }
    }
}

impl Default for Collation {
    fn default() -> Self {
        Self::zh_hans()
    }
}

impl fmt::Debug for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collation")
            .field("locale_aware", &self.collator.is_some())
            .finish()
    }
}

/// Orders distinct `values` by their position in `priority`; values not in
/// the list come after all listed ones, collated among themselves.
pub fn order_values<I, S>(values: I, priority: &[String], collation: &Collation) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut rank: HashMap<&str, usize> = HashMap::new();
    for (idx, value) in priority.iter().enumerate() {
        rank.entry(value.as_str()).or_insert(idx);
    }
    let distinct: BTreeSet<String> = values.into_iter().map(Into::into).collect();
    let mut out: Vec<String> = distinct.into_iter().collect();
    out.sort_by(|a, b| {
        let ra = rank.get(a.as_str()).copied().unwrap_or(usize::MAX);
        let rb = rank.get(b.as_str()).copied().unwrap_or(usize::MAX);
        ra.cmp(&rb)
            .then_with(|| collation.compare(a, b))
            .then_with(|| a.cmp(b))
    });
    out
}
