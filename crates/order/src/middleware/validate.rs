use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use validator::{Validate, ValidationErrors};

/// JSON body extractor that runs `validator` rules before the handler sees
/// the payload. Malformed JSON keeps axum's status code, rule violations
/// answer 400 with a per-field breakdown.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Value>);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let payload = json!({
                    "status": "error",
                    "message": rejection.body_text(),
                });
                (rejection.status(), Json(payload))
            })?;

        value.validate().map_err(|errors| {
            let payload = json!({
                "status": "error",
                "message": summarize(&errors),
                "details": details(&errors),
            });
            (StatusCode::BAD_REQUEST, Json(payload))
        })?;

        Ok(Self(value))
    }
}

fn describe(field: &str, code: &str) -> String {
    match code {
        "length" => "Invalid length".to_string(),
        "range" => "Value out of range".to_string(),
        "required" => "Field is required".to_string(),
        _ => format!("Invalid {field}"),
    }
}

fn messages(errors: &ValidationErrors) -> Vec<(String, Vec<String>)> {
    let mut fields: Vec<(String, Vec<String>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errors)| {
            let list = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| describe(&field, &e.code))
                })
                .collect();
            (field.to_string(), list)
        })
        .collect();

    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields
}

fn summarize(errors: &ValidationErrors) -> String {
    let parts: Vec<String> = messages(errors)
        .into_iter()
        .flat_map(|(field, list)| list.into_iter().map(move |m| format!("{field}: {m}")))
        .collect();

    if parts.is_empty() {
        "Validation failed".to_string()
    } else {
        parts.join("; ")
    }
}

fn details(errors: &ValidationErrors) -> Value {
    let map: serde_json::Map<String, Value> = messages(errors)
        .into_iter()
        .map(|(field, list)| (field, json!(list)))
        .collect();

    Value::Object(map)
}
