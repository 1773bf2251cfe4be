use serde_json::Value;
use std::collections::BTreeMap;

/// Renders a loosely typed JSON field as trimmed text. Missing and null
/// values become the empty string.
pub fn safe_str(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.trim().to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::Array(items) => items
            .iter()
            .map(safe_str)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => String::new(),
    }
}

/// Numeric coercion for stat fields. Anything that does not parse to a
/// finite number is zero.
pub fn to_num(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Value::Bool(flag) => {
            if *flag {
                1.0
            } else {
                0.0
            }
        }
        Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    };
    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

/// Formats a stat the way it is shown on cards: integral values drop the
/// fractional part.
pub fn format_num(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LangPair {
    pub en: String,
    pub cn: String,
}

pub fn split_lang(raw: &str) -> LangPair {
    let mut parts = raw
        .trim()
        .split('/')
        .map(str::trim)
        .filter(|part| !part.is_empty());
    let en = parts.next().unwrap_or_default().to_string();
    let cn = parts.next().unwrap_or_default().to_string();
    LangPair { en, cn }
}

pub fn cn_first(raw: &str) -> String {
    let pair = split_lang(raw);
    if pair.cn.is_empty() {
        pair.en
    } else {
        pair.cn
    }
}

/// Same resolution as [`cn_first`]; used for tag tokens, which never fall
/// back to anything but the English side.
pub fn cn_only(raw: &str) -> String {
    cn_first(raw)
}

pub fn en_first(raw: &str) -> String {
    let pair = split_lang(raw);
    if pair.en.is_empty() {
        pair.cn
    } else {
        pair.en
    }
}

/// Splits a `|` separated token list, resolving each token to its Chinese
/// side and translating it. Order is kept and duplicates are allowed.
pub fn parse_tokens(raw: &str, translator: &Translator) -> Vec<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split('|')
        .map(cn_only)
        .map(|token| translator.translate_text(&token))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
        .collect()
}

const DELIMITERS: [(char, &str); 3] = [('|', " | "), ('/', "/"), (',', ", ")];

/// Exact-match translation table with a case-insensitive fallback.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    enabled: bool,
    exact: BTreeMap<String, String>,
    folded: BTreeMap<String, String>,
    field_labels: BTreeMap<String, String>,
}

impl Translator {
    pub fn new(
        enabled: bool,
        exact: BTreeMap<String, String>,
        field_labels: BTreeMap<String, String>,
    ) -> Self {
        let mut folded = BTreeMap::new();
        for (key, value) in &exact {
            folded
                .entry(key.to_lowercase())
                .or_insert_with(|| value.clone());
        }
        Self {
            enabled,
            exact,
            folded,
            field_labels,
        }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn translate_exact_token(&self, token: &str) -> String {
        let token = token.trim();
        if token.is_empty() {
            return String::new();
        }
        if !self.enabled {
            return token.to_string();
        }
        if let Some(hit) = self.exact.get(token).filter(|hit| !hit.is_empty()) {
            return hit.clone();
        }
        if let Some(hit) = self.folded.get(&token.to_lowercase()) {
            return hit.clone();
        }
        token.to_string()
    }

    pub fn translate_text(&self, raw: &str) -> String {
        let text = raw.trim();
        if text.is_empty() {
            return String::new();
        }
        let direct = self.translate_exact_token(text);
        if direct != text {
            return direct;
        }
        for (delimiter, joiner) in DELIMITERS {
            if text.contains(delimiter) {
                return text
                    .split(delimiter)
                    .map(|part| self.translate_exact_token(part))
                    .collect::<Vec<_>>()
                    .join(joiner);
            }
        }
        direct
    }

    pub fn field_label(&self, key: &str) -> String {
        let key = key.trim();
        if key.is_empty() {
            return String::new();
        }
        match self.field_labels.get(key).filter(|label| !label.is_empty()) {
            Some(label) => label.clone(),
            None => self.translate_text(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn translator(pairs: &[(&str, &str)]) -> Translator {
        let exact = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Translator::new(true, exact, BTreeMap::new())
    }

    #[test]
    fn split_lang_without_slash_keeps_english_side() {
        for raw in ["Vanessa", "  padded  ", "", "多 词 value"] {
            let pair = split_lang(raw);
            assert_eq!(pair.en, raw.trim());
            assert_eq!(pair.cn, "");
        }
    }

    #[test]
    fn split_lang_drops_empty_segments() {
        let pair = split_lang(" / Gold / 黄金 ");
        assert_eq!(pair.en, "Gold");
        assert_eq!(pair.cn, "黄金");
        assert_eq!(cn_first("Gold/黄金"), "黄金");
        assert_eq!(en_first("Gold/黄金"), "Gold");
        assert_eq!(en_first("/黄金"), "黄金");
        assert_eq!(cn_only("Gold"), "Gold");
    }

    #[test]
    fn safe_str_handles_loose_values() {
        assert_eq!(safe_str(&Value::Null), "");
        assert_eq!(safe_str(&json!("  x ")), "x");
        assert_eq!(safe_str(&json!(12)), "12");
        assert_eq!(safe_str(&json!(true)), "true");
        assert_eq!(safe_str(&json!(["a", 1])), "a,1");
        assert_eq!(safe_str(&json!({"a": 1})), "");
    }

    #[test]
    fn to_num_degrades_to_zero() {
        assert_eq!(to_num(&json!("abc")), 0.0);
        assert_eq!(to_num(&json!("")), 0.0);
        assert_eq!(to_num(&json!(" 12.5 ")), 12.5);
        assert_eq!(to_num(&json!(7)), 7.0);
        assert_eq!(to_num(&json!("Infinity")), 0.0);
        assert_eq!(to_num(&json!(true)), 1.0);
        assert_eq!(to_num(&Value::Null), 0.0);
        assert_eq!(to_num(&json!({"x": 1})), 0.0);
    }

    #[test]
    fn format_num_drops_integral_fraction() {
        assert_eq!(format_num(5.0), "5");
        assert_eq!(format_num(-3.0), "-3");
        assert_eq!(format_num(2.5), "2.5");
    }

    #[test]
    fn exact_lookup_falls_back_case_insensitively() {
        let tr = translator(&[("Burn", "灼烧"), ("shield", "护盾")]);
        assert_eq!(tr.translate_exact_token("Burn"), "灼烧");
        assert_eq!(tr.translate_exact_token("burn"), "灼烧");
        assert_eq!(tr.translate_exact_token("SHIELD"), "护盾");
        assert_eq!(tr.translate_exact_token("Poison"), "Poison");
        assert_eq!(tr.translate_exact_token("   "), "");
    }

    #[test]
    fn disabled_translator_keeps_tokens_but_normalizes_delimiters() {
        let mut exact = BTreeMap::new();
        exact.insert("Burn".to_string(), "灼烧".to_string());
        let tr = Translator::new(false, exact, BTreeMap::new());
        assert_eq!(tr.translate_text("Burn"), "Burn");
        assert_eq!(tr.translate_text("Burn|Burn"), "Burn | Burn");
    }

    #[test]
    fn translate_text_splits_on_first_matching_delimiter() {
        let tr = translator(&[("Burn", "灼烧"), ("Poison", "剧毒"), ("Burn/Poison", "混合")]);
        assert_eq!(tr.translate_text("Burn/Poison"), "混合");
        assert_eq!(tr.translate_text("Burn|Poison/x"), "灼烧 | Poison/x");
        assert_eq!(tr.translate_text("Poison/Burn"), "剧毒/灼烧");
        assert_eq!(tr.translate_text("Burn, Poison"), "灼烧, 剧毒");
        assert_eq!(tr.translate_text("Freeze"), "Freeze");
    }

    #[test]
    fn parse_tokens_resolves_and_translates_each_part() {
        let tr = translator(&[("Weapon", "武器")]);
        let tokens = parse_tokens("Weapon | Tool/工具 | | Weapon", &tr);
        assert_eq!(tokens, vec!["武器", "工具", "武器"]);
        assert!(parse_tokens("   ", &tr).is_empty());
    }

    #[test]
    fn field_label_prefers_configured_label() {
        let mut labels = BTreeMap::new();
        labels.insert("cooldown".to_string(), "冷却时间".to_string());
        let mut exact = BTreeMap::new();
        exact.insert("ammo".to_string(), "弹药".to_string());
        let tr = Translator::new(true, exact, labels);
        assert_eq!(tr.field_label("cooldown"), "冷却时间");
        assert_eq!(tr.field_label("ammo"), "弹药");
        assert_eq!(tr.field_label("value"), "value");
    }
}
