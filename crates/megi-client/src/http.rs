//! `SubmissionClient` sobre HTTP (reqwest).
//!
//! POST JSON a `{base_url}/{endpoint}`. Respuesta 2xx con `{"id": ...}`
//! (string o número) = creado. Cualquier otro status se traduce a
//! `SubmissionError::Rejected` con el mensaje del backend (`detail` o
//! `message`) cuando lo hay. Sin reintentos.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use megi_core::submission::{SubmissionClient, SubmissionError, SubmissionReceipt};

use crate::config::ClientConfig;
use crate::error::ClientError;

#[derive(Debug, Clone)]
pub struct HttpSubmissionClient {
    client: Client,
    url: String,
    token: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CreatedId {
    Text(String),
    Number(serde_json::Number),
}

#[derive(Deserialize)]
struct CreatedBody {
    id: CreatedId,
}

impl HttpSubmissionClient {
    /// Cliente para un recurso (`"projects"`, `"disputes"`, ...).
    pub fn new(config: &ClientConfig, endpoint: &str) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client,
                  url: format!("{}/{}", config.base_url, endpoint.trim_start_matches('/')),
                  token: config.token.clone() })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Mensaje legible de un cuerpo de error: `detail` (string, o lista de
/// `{msg}` estilo FastAPI) o `message`.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let from_body = parsed.as_ref().and_then(|v| {
                                       match v.get("detail") {
                                           Some(Value::String(s)) => Some(s.clone()),
                                           Some(Value::Array(items)) => {
                                               let msgs: Vec<&str> =
                                                   items.iter().filter_map(|i| i.get("msg").and_then(Value::as_str)).collect();
                                               (!msgs.is_empty()).then(|| msgs.join("; "))
                                           }
                                           _ => None,
                                       }.or_else(|| v.get("message").and_then(Value::as_str).map(str::to_string))
                                   });
    from_body.filter(|m| !m.trim().is_empty())
             .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string())
}

fn receipt_from(body: &str) -> Result<SubmissionReceipt, SubmissionError> {
    let created: CreatedBody =
        serde_json::from_str(body).map_err(|e| SubmissionError::Decode(format!("missing or invalid id: {e}")))?;
    let id = match created.id {
        CreatedId::Text(s) => s,
        CreatedId::Number(n) => n.to_string(),
    };
    if id.is_empty() {
        return Err(SubmissionError::Decode("empty id".into()));
    }
    Ok(SubmissionReceipt::new(id))
}

#[async_trait]
impl SubmissionClient for HttpSubmissionClient {
    async fn create(&self, payload: &Value) -> Result<SubmissionReceipt, SubmissionError> {
        debug!("POST {}", self.url);
        let mut request = self.client.post(&self.url).json(payload);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await.map_err(|e| {
                                               if e.is_timeout() {
                                                   SubmissionError::Timeout
                                               } else {
                                                   SubmissionError::Transport(e.to_string())
                                               }
                                           })?;
        let status = response.status();
        let body = response.text().await.map_err(|e| {
                                            if e.is_timeout() {
                                                SubmissionError::Timeout
                                            } else {
                                                SubmissionError::Transport(e.to_string())
                                            }
                                        })?;
        if !status.is_success() {
            let message = error_message(status, &body);
            warn!("POST {} -> {} {message}", self.url, status.as_u16());
            return Err(SubmissionError::Rejected { status: status.as_u16(),
                                                   message });
        }
        receipt_from(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_detail() {
        let m = error_message(StatusCode::BAD_REQUEST, r#"{"detail":"Budget too low","message":"x"}"#);
        assert_eq!(m, "Budget too low");
        let m = error_message(StatusCode::UNPROCESSABLE_ENTITY,
                              r#"{"detail":[{"msg":"field required"},{"msg":"too short"}]}"#);
        assert_eq!(m, "field required; too short");
        let m = error_message(StatusCode::CONFLICT, r#"{"message":"Already applied"}"#);
        assert_eq!(m, "Already applied");
        let m = error_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(m, "Internal Server Error");
    }

    #[test]
    fn receipt_accepts_string_or_number_id() {
        assert_eq!(receipt_from(r#"{"id":"abc"}"#).unwrap().id, "abc");
        assert_eq!(receipt_from(r#"{"id":17,"title":"x"}"#).unwrap().id, "17");
        assert!(matches!(receipt_from(r#"{"ok":true}"#), Err(SubmissionError::Decode(_))));
        assert!(matches!(receipt_from(r#"{"id":""}"#), Err(SubmissionError::Decode(_))));
    }
}
