//! Runtime Configuration
//!
//! Endpoint and anti-forgery settings, read once at startup.

use serde::Deserialize;

/// Built-in endpoint, overridable at build time with `TASKBOARD_GRAPHQL_ENDPOINT`.
const DEFAULT_GRAPHQL_ENDPOINT: &str = match option_env!("TASKBOARD_GRAPHQL_ENDPOINT") {
    Some(url) => url,
    None => "http://localhost:8000/graphql/",
};

/// Id of the inline `<script type="application/json">` config block in `index.html`
const CONFIG_ELEMENT_ID: &str = "taskboard-config";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub graphql_endpoint: String,
    /// Endpoint that sets the anti-forgery cookie; derived from the GraphQL endpoint when empty
    pub csrf_endpoint: String,
    pub csrf_cookie: String,
    pub csrf_header: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            graphql_endpoint: DEFAULT_GRAPHQL_ENDPOINT.to_string(),
            csrf_endpoint: String::new(),
            csrf_cookie: "csrftoken".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Parse a JSON override block; fields it omits keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Self>(json).map(Self::normalized)
    }

    /// Load from the page, falling back to defaults.
    ///
    /// Runs before the logger is installed, so problems are returned as a
    /// warning for the caller to log.
    pub fn load() -> (Self, Option<String>) {
        let Some(json) = inline_config() else {
            return (Self::default().normalized(), None);
        };
        match Self::from_json(&json) {
            Ok(config) => (config, None),
            Err(e) => (
                Self::default().normalized(),
                Some(format!("ignoring malformed #{}: {}", CONFIG_ELEMENT_ID, e)),
            ),
        }
    }

    fn normalized(mut self) -> Self {
        if self.graphql_endpoint.trim().is_empty() {
            self.graphql_endpoint = DEFAULT_GRAPHQL_ENDPOINT.to_string();
        }
        if self.csrf_endpoint.trim().is_empty() {
            self.csrf_endpoint = derive_csrf_endpoint(&self.graphql_endpoint);
        }
        self
    }
}

/// `http://host/graphql/` -> `http://host/csrf/`
fn derive_csrf_endpoint(graphql_endpoint: &str) -> String {
    let trimmed = graphql_endpoint.trim_end_matches('/');
    match trimmed.rsplit_once('/') {
        Some((base, last)) if last == "graphql" => format!("{}/csrf/", base),
        _ => format!("{}/csrf/", trimmed),
    }
}

fn inline_config() -> Option<String> {
    let document = web_sys::window()?.document()?;
    document
        .get_element_by_id(CONFIG_ELEMENT_ID)?
        .text_content()
        .filter(|text| !text.trim().is_empty())
}
