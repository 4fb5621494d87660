//! GraphQL Gateway
//!
//! Bindings to the remote query/mutation API, organized by domain.
//! Every request goes to one configured endpoint, carries the session
//! cookies and echoes the anti-forgery cookie as a header.

mod comment;
mod csrf;
mod error;
mod organization;
mod project;
mod task;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

// Re-export all public items
pub use comment::*;
pub use csrf::*;
pub use error::ApiError;
pub use organization::*;
pub use project::*;
pub use task::*;

/// A named GraphQL document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub document: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestBody<'a, V> {
    query: &'a str,
    operation_name: &'a str,
    variables: &'a V,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<RemoteError>,
}

#[derive(Deserialize)]
struct RemoteError {
    message: String,
}

/// Client for the configured endpoint. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    config: AppConfig,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Send one operation and decode its `data` payload.
    ///
    /// No retries: transport, HTTP and GraphQL errors all surface as `ApiError`.
    pub async fn execute<V, T>(&self, operation: &Operation, variables: &V) -> Result<T, ApiError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let body = RequestBody {
            query: operation.document,
            operation_name: operation.name,
            variables,
        };
        let token = read_csrf_token(&self.config.csrf_cookie).unwrap_or_default();
        log::debug!("POST {} ({})", operation.name, self.config.graphql_endpoint);

        let request = self
            .http
            .post(&self.config.graphql_endpoint)
            .header(self.config.csrf_header.as_str(), token)
            .json(&body);
        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        let response = request.send().await.map_err(ApiError::transport)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(ApiError::transport)?;

        let result = decode_response(operation.name, status, &text);
        if let Err(e) = &result {
            log::warn!("{} failed: {}", operation.name, e);
        }
        result
    }

    /// Ask the server to set the anti-forgery cookie if the page has none yet.
    pub async fn ensure_csrf_cookie(&self) -> Result<(), ApiError> {
        if read_csrf_token(&self.config.csrf_cookie).is_some() {
            return Ok(());
        }
        log::info!("no {} cookie, requesting {}", self.config.csrf_cookie, self.config.csrf_endpoint);

        let request = self.http.get(&self.config.csrf_endpoint);
        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        let response = request.send().await.map_err(ApiError::transport)?;
        let status = response.status().as_u16();
        if (200..300).contains(&status) {
            Ok(())
        } else {
            Err(ApiError::Http { status })
        }
    }
}

/// Decode a response body into the operation's data payload.
pub(crate) fn decode_response<T: DeserializeOwned>(operation: &'static str, status: u16, body: &str) -> Result<T, ApiError> {
    let envelope = match serde_json::from_str::<Envelope<T>>(body) {
        Ok(envelope) => envelope,
        // Non-GraphQL error pages (e.g. a 403 from the anti-forgery check)
        Err(_) if !(200..300).contains(&status) => return Err(ApiError::Http { status }),
        Err(e) => return Err(ApiError::Decode(e.to_string())),
    };

    if !envelope.errors.is_empty() {
        return Err(ApiError::Remote(envelope.errors.into_iter().map(|e| e.message).collect()));
    }
    envelope.data.ok_or(ApiError::MissingData(operation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Names {
        names: Vec<String>,
    }

    #[test]
    fn test_request_body_shape() {
        let op = Operation {
            name: "ProjectTasks",
            document: "query ProjectTasks($projectId: Int!) { projectTasks(projectId: $projectId) { id } }",
        };
        let variables = json!({ "projectId": 4 });
        let body = RequestBody {
            query: op.document,
            operation_name: op.name,
            variables: &variables,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "query": op.document,
                "operationName": "ProjectTasks",
                "variables": { "projectId": 4 }
            })
        );
    }

    #[test]
    fn test_decode_data() {
        let data: Names = decode_response("Names", 200, r#"{"data": {"names": ["a", "b"]}}"#).unwrap();
        assert_eq!(data.names, vec!["a", "b"]);
    }

    #[test]
    fn test_decode_remote_errors_win_over_partial_data() {
        let body = r#"{"data": {"names": []}, "errors": [{"message": "Slug already exists"}, {"message": "second"}]}"#;
        let err = decode_response::<Names>("Names", 200, body).unwrap_err();
        assert_eq!(err, ApiError::Remote(vec!["Slug already exists".into(), "second".into()]));
        assert_eq!(err.to_string(), "Slug already exists; second");
    }

    #[test]
    fn test_decode_graphql_errors_with_error_status() {
        let body = r#"{"errors": [{"message": "Variable '$projectId' got invalid value"}], "data": null}"#;
        let err = decode_response::<Names>("Names", 400, body).unwrap_err();
        assert!(matches!(err, ApiError::Remote(_)));
    }

    #[test]
    fn test_decode_html_error_page() {
        let err = decode_response::<Names>("Names", 403, "<h1>CSRF verification failed</h1>").unwrap_err();
        assert_eq!(err, ApiError::Http { status: 403 });
    }

    #[test]
    fn test_decode_null_data() {
        let err = decode_response::<Names>("Names", 200, r#"{"data": null}"#).unwrap_err();
        assert_eq!(err, ApiError::MissingData("Names"));
    }

    #[test]
    fn test_decode_wrong_shape() {
        let err = decode_response::<Names>("Names", 200, r#"{"data": {"names": 3}}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}
