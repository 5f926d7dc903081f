use std::collections::HashMap;

use serde::Deserialize;

use crate::utils::error::{MobilityError, Result};

const CITY_CATALOG: &str = include_str!("../../data/city_catalog.tsv");
const CITY_CODES: &str = include_str!("../../data/city_codes.tsv");

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "NAME_CN")]
    name_cn: String,
    #[serde(rename = "PROVINCE_EN")]
    province_en: String,
    #[serde(rename = "NAME_EN")]
    name_en: String,
}

#[derive(Debug, Deserialize)]
struct CodeRow {
    #[serde(rename = "NAME_CITY_EN")]
    name_city_en: String,
    #[serde(rename = "CODE_CITY")]
    code_city: u32,
}

/// Static city reference data, built once at startup and shared read-only
/// for the rest of the process.
///
/// Two embedded tables back it: a catalog mapping a Chinese city name to
/// its English (province, city) pair, and a code table mapping the
/// "Province City" English key to the numeric id the service expects.
#[derive(Debug)]
pub struct CityDirectory {
    cn_to_en: HashMap<String, (String, String)>,
    codes: HashMap<String, u32>,
}

impl CityDirectory {
    pub fn load() -> Result<Self> {
        let mut cn_to_en = HashMap::new();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_reader(CITY_CATALOG.as_bytes());
        for row in reader.deserialize() {
            let row: CatalogRow = row?;
            cn_to_en.insert(row.name_cn, (row.province_en, row.name_en));
        }

        let mut codes = HashMap::new();
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_reader(CITY_CODES.as_bytes());
        for row in reader.deserialize() {
            let row: CodeRow = row?;
            codes.insert(row.name_city_en, row.code_city);
        }

        Ok(Self { cn_to_en, codes })
    }

    /// English (province, city) for a Chinese city name.
    pub fn english(&self, name_cn: &str) -> Option<(&str, &str)> {
        self.cn_to_en
            .get(name_cn)
            .map(|(province, city)| (province.as_str(), city.as_str()))
    }

    /// Numeric service code for a "Province City" key.
    pub fn code(&self, province_city: &str) -> Result<u32> {
        self.codes
            .get(province_city)
            .copied()
            .ok_or_else(|| MobilityError::UnknownCity {
                city: province_city.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_builds_both_tables() {
        let directory = CityDirectory::load().unwrap();
        assert!(directory.cn_to_en.len() > 100);
        assert_eq!(directory.cn_to_en.len(), directory.codes.len());
    }

    #[test]
    fn test_code_lookup() {
        let directory = CityDirectory::load().unwrap();
        assert_eq!(directory.code("Hubei Wuhan").unwrap(), 420100);
        assert_eq!(directory.code("Inner Mongolia Hohhot").unwrap(), 150100);
    }

    #[test]
    fn test_unknown_city_names_the_offender() {
        let directory = CityDirectory::load().unwrap();
        let err = directory.code("Atlantis Nowhere").unwrap_err();
        match err {
            MobilityError::UnknownCity { city } => assert_eq!(city, "Atlantis Nowhere"),
            other => panic!("expected UnknownCity, got {other:?}"),
        }
    }

    #[test]
    fn test_english_lookup() {
        let directory = CityDirectory::load().unwrap();
        assert_eq!(directory.english("武汉"), Some(("Hubei", "Wuhan")));
        assert_eq!(directory.english("呼和浩特"), Some(("Inner Mongolia", "Hohhot")));
        assert_eq!(directory.english("不存在的城市"), None);
    }
}
