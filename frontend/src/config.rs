pub const DEFAULT_API_PREFIX: &str = "/registra_ai";
pub const DEFAULT_CONTENT_ROUTE: &str = "/get_content";
pub const DEFAULT_MOUNT_ID: &str = "main";

/// Local storage key that overrides the backend origin.
pub const BASE_URL_STORAGE_KEY: &str = "registra_ai_base_url";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Backend origin; empty means same origin as the host page.
    pub base_url: String,
    pub api_prefix: String,
    pub content_route: String,
    pub mount_id: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            content_route: DEFAULT_CONTENT_ROUTE.to_string(),
            mount_id: DEFAULT_MOUNT_ID.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults plus the base URL stored under [`BASE_URL_STORAGE_KEY`], if any.
    pub fn load() -> Self {
        let stored = web_sys::window()
            .and_then(|window| window.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(BASE_URL_STORAGE_KEY).ok().flatten());
        Self::default().with_base_url(stored)
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            let url = url.trim();
            if !url.is_empty() {
                self.base_url = url.trim_end_matches('/').to_string();
            }
        }
        self
    }

    pub fn api_url(&self, route: &str) -> String {
        join_url(&self.base_url, &[&self.api_prefix, route])
    }

    pub fn content_url(&self) -> String {
        join_url(&self.base_url, &[&self.content_route])
    }
}

fn join_url(base: &str, segments: &[&str]) -> String {
    let mut url = base.trim_end_matches('/').to_string();
    for segment in segments {
        let segment = segment.trim_matches('/');
        if !segment.is_empty() {
            url.push('/');
            url.push_str(segment);
        }
    }
    url
}
