use std::sync::RwLock;

use lazy_static::lazy_static;
use wasm_bindgen::prelude::*;

/// API route configuration
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiConfig {
    // When empty, the console assumes same-origin and builds relative REST
    // URLs ("/api/...").
    base_url: String,
}

impl ApiConfig {
    /// Configuration baked in at compile time via `API_BASE_URL`; falls back
    /// to same-origin when the variable is not set.
    pub fn from_env() -> Self {
        Self::from_url(option_env!("API_BASE_URL").unwrap_or(""))
    }

    pub fn from_url(url: &str) -> Self {
        Self {
            base_url: url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full API URL for a path starting with `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    pub fn tasks_url(&self) -> String {
        self.url("/tasks")
    }

    pub fn task_url(&self, task_id: &str) -> String {
        self.url(&format!("/tasks/{}", urlencoding::encode(task_id)))
    }

    pub fn documents_url(&self, task_id: &str) -> String {
        format!("{}/documents", self.task_url(task_id))
    }

    pub fn samples_url(&self, task_id: &str) -> String {
        format!("{}/samples", self.task_url(task_id))
    }

    pub fn fine_tunes_url(&self, task_id: &str, base_model: &str) -> String {
        format!(
            "{}/fine_tunes?base_model={}",
            self.task_url(task_id),
            urlencoding::encode(base_model)
        )
    }

    pub fn deployments_url(&self, task_id: &str) -> String {
        format!("{}/deployments", self.task_url(task_id))
    }

    pub fn chat_completions_url(&self, task_id: &str) -> String {
        format!("{}/v1/chat/completions", self.task_url(task_id))
    }

    pub fn base_models_url(&self) -> String {
        self.url("/base-models")
    }
}

lazy_static! {
    static ref API_CONFIG: RwLock<Option<ApiConfig>> = RwLock::new(None);
}

fn store(config: ApiConfig) {
    let mut guard = API_CONFIG.write().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = Some(config);
}

/// Initialize the API configuration from the compile-time environment.
pub fn init_api_config() {
    let config = ApiConfig::from_env();
    log::debug!("API base URL: {:?}", config.base_url());
    store(config);
}

/// Initialize the API configuration from a JS-provided URL.
/// This allows pointing a prebuilt bundle at another backend.
#[wasm_bindgen]
pub fn init_api_config_js(api_base_url: &str) -> Result<(), JsValue> {
    log::info!("Initializing API config from JS: {}", api_base_url);
    store(ApiConfig::from_url(api_base_url));
    Ok(())
}

/// Current configuration, or same-origin defaults before initialization.
pub fn api_config() -> ApiConfig {
    API_CONFIG
        .read()
        .map(|guard| guard.clone())
        .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_origin_urls_are_relative() {
        let cfg = ApiConfig::default();
        assert_eq!(cfg.tasks_url(), "/api/tasks");
        assert_eq!(cfg.base_models_url(), "/api/base-models");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let cfg = ApiConfig::from_url("http://10.0.0.5:8003/");
        assert_eq!(cfg.base_url(), "http://10.0.0.5:8003");
        assert_eq!(cfg.task_url("abc"), "http://10.0.0.5:8003/api/tasks/abc");
    }

    #[test]
    fn task_endpoints() {
        let cfg = ApiConfig::from_url("https://ft.example");
        assert_eq!(cfg.documents_url("t1"), "https://ft.example/api/tasks/t1/documents");
        assert_eq!(cfg.samples_url("t1"), "https://ft.example/api/tasks/t1/samples");
        assert_eq!(cfg.deployments_url("t1"), "https://ft.example/api/tasks/t1/deployments");
        assert_eq!(
            cfg.chat_completions_url("t1"),
            "https://ft.example/api/tasks/t1/v1/chat/completions"
        );
    }

    #[test]
    fn base_model_is_query_encoded() {
        let cfg = ApiConfig::default();
        assert_eq!(
            cfg.fine_tunes_url("t1", "Qwen/Qwen2.5 7B"),
            "/api/tasks/t1/fine_tunes?base_model=Qwen%2FQwen2.5%207B"
        );
    }

    #[test]
    fn global_config_round_trip() {
        store(ApiConfig::from_url("http://backend"));
        assert_eq!(api_config().base_url(), "http://backend");
    }
}
