use std::sync::Arc;

use pinyin::ToPinyin;

use crate::core::directory::CityDirectory;

/// Resolves the Chinese (province, city) names of a response row into
/// their English representation. Exact catalog lookup first; cities the
/// catalog does not know fall back to a capitalized pinyin rendering of
/// both names. The fallback is lossy but never fails.
pub struct NameResolver {
    directory: Arc<CityDirectory>,
}

impl NameResolver {
    pub fn new(directory: Arc<CityDirectory>) -> Self {
        Self { directory }
    }

    pub fn resolve(&self, province_cn: &str, city_cn: &str) -> (String, String) {
        if let Some((province, city)) = self.directory.english(city_cn) {
            return (province.to_string(), city.to_string());
        }
        (romanize(province_cn), romanize(city_cn))
    }
}

/// Per-character lazy pinyin; characters without a reading pass through.
fn romanize(text: &str) -> String {
    let mut plain = String::new();
    for (ch, reading) in text.chars().zip(text.to_pinyin()) {
        match reading {
            Some(p) => plain.push_str(p.plain()),
            None => plain.push(ch),
        }
    }
    capitalize(&plain)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => String::new(),
    }
}
