use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarModel {
    pub id: String,
    pub mark_id: String,          // owning brand id
    pub name: String,
    #[serde(default)]
    pub cyrillic_name: String,
    #[serde(default)]
    pub year_from: Option<i32>,
    #[serde(default)]
    pub year_to: Option<i32>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CarBrand {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cyrillic_name: String,
    #[serde(default)]
    pub numeric_id: i64,
    #[serde(default)]
    pub year_from: Option<i32>,
    #[serde(default)]
    pub year_to: Option<i32>,
    #[serde(default)]
    pub popular: i64,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub models: Vec<CarModel>,
}

fn display<'a>(localized: &'a str, canonical: &'a str) -> &'a str {
    if localized.is_empty() {
        canonical
    } else {
        localized
    }
}

fn matches_query(lower_query: &str, name: &str, cyrillic_name: &str) -> bool {
    name.to_lowercase().contains(lower_query) || cyrillic_name.to_lowercase().contains(lower_query)
}

impl CarBrand {
    /// Localized name when the catalog has one.
    pub fn display_name(&self) -> &str {
        display(&self.cyrillic_name, &self.name)
    }

    pub(crate) fn matches(&self, lower_query: &str) -> bool {
        matches_query(lower_query, &self.name, &self.cyrillic_name)
    }

    /// Same brand without its model list.
    pub fn without_models(&self) -> CarBrand {
        CarBrand {
            models: Vec::new(),
            ..self.clone()
        }
    }
}

impl CarModel {
    pub fn display_name(&self) -> &str {
        display(&self.cyrillic_name, &self.name)
    }

    pub(crate) fn matches(&self, lower_query: &str) -> bool {
        matches_query(lower_query, &self.name, &self.cyrillic_name)
    }
}

/// Body of `GET /full`. Only `data` is used; `meta` is informational.
#[derive(Clone, Debug, Deserialize)]
pub struct CatalogResponse {
    pub data: Vec<CarBrand>,
    #[serde(default)]
    pub meta: CatalogMeta,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CatalogMeta {
    pub total: Option<u64>,
    pub count: Option<u64>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<u64>,
    pub after_id: Option<String>,
    pub next_after_id: Option<String>,
    #[serde(rename = "demoMode")]
    pub demo_mode: Option<bool>,
    pub duration_ms: Option<f64>,
}
