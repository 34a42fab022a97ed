use axum::http::{HeaderMap, HeaderName, HeaderValue};
use tracing::{error, warn};

/// Builds the `X-{app}-alert` / `X-{app}-error` / `X-{app}-params` headers
/// that tell API clients what happened to an entity.
#[derive(Debug, Clone)]
pub struct HeaderUtil {
    application_name: String,
}

impl HeaderUtil {
    pub fn new(application_name: impl Into<String>) -> Self {
        Self {
            application_name: application_name.into(),
        }
    }

    fn header_name(&self, suffix: &str) -> Option<HeaderName> {
        let raw = format!("x-{}-{suffix}", self.application_name).to_ascii_lowercase();
        HeaderName::from_bytes(raw.as_bytes())
            .inspect_err(|e| warn!("Invalid header name '{raw}': {e}"))
            .ok()
    }

    fn insert(&self, headers: &mut HeaderMap, suffix: &str, value: &str) {
        let Some(name) = self.header_name(suffix) else {
            return;
        };

        match HeaderValue::from_str(value) {
            Ok(value) => {
                headers.insert(name, value);
            }
            Err(e) => warn!("Invalid header value '{value}' for {name}: {e}"),
        }
    }

    pub fn create_alert(&self, message: &str, param: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        self.insert(&mut headers, "alert", message);
        self.insert(&mut headers, "params", param);
        headers
    }

    pub fn create_entity_creation_alert(&self, entity_name: &str, param: &str) -> HeaderMap {
        self.create_alert(
            &format!("{}.{entity_name}.created", self.application_name),
            param,
        )
    }

    pub fn create_entity_update_alert(&self, entity_name: &str, param: &str) -> HeaderMap {
        self.create_alert(
            &format!("{}.{entity_name}.updated", self.application_name),
            param,
        )
    }

    pub fn create_entity_deletion_alert(&self, entity_name: &str, param: &str) -> HeaderMap {
        self.create_alert(
            &format!("{}.{entity_name}.deleted", self.application_name),
            param,
        )
    }

    pub fn create_failure_alert(
        &self,
        entity_name: &str,
        error_key: &str,
        default_message: &str,
    ) -> HeaderMap {
        error!("Entity processing failed, {default_message}");

        let mut headers = HeaderMap::new();
        self.insert(&mut headers, "error", &format!("error.{error_key}"));
        self.insert(&mut headers, "params", entity_name);
        headers
    }
}
