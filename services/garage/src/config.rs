use anyhow::{bail, Context, Result};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub catalog_base_url: String,
    pub catalog_cache_ttl_secs: i64,
    pub catalog_http_timeout_secs: Option<u64>,
    pub data_path: String,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let catalog_base_url = get("CATALOG_BASE_URL").unwrap_or_else(|| catalog::DEFAULT_BASE_URL.to_string());
        let catalog_cache_ttl_secs = parsed(&get, "CATALOG_CACHE_TTL_SECS")?.unwrap_or(catalog::DEFAULT_TTL_SECS);
        let catalog_http_timeout_secs = parsed(&get, "CATALOG_HTTP_TIMEOUT_SECS")?;
        let data_path = get("GARAGE_DATA_PATH").unwrap_or_else(|| "garage_data.json".to_string());
        let bind_addr = get("GARAGE_BIND_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());

        if !catalog_base_url.starts_with("http://") && !catalog_base_url.starts_with("https://") {
            bail!("CATALOG_BASE_URL must start with http:// or https://");
        }
        if catalog_cache_ttl_secs <= 0 {
            bail!("CATALOG_CACHE_TTL_SECS must be positive");
        }

        Ok(Self {
            catalog_base_url,
            catalog_cache_ttl_secs,
            catalog_http_timeout_secs,
            data_path,
            bind_addr,
        })
    }
}

fn parsed<T>(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(v) => Ok(Some(v.trim().parse().with_context(|| format!("Invalid value for env var: {key}"))?)),
        None => Ok(None),
    }
}
