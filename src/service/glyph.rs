use super::http_client::build_service_client;
use super::scrub::status_error;
use super::traits::{RitualFuture, RitualService};
use super::types::{Artifact, RitualFormat, RitualRequest, RitualResult};
use crate::config::ServiceConfig;
use crate::error::NetworkError;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder};
use serde_json::{Value, json};

/// HTTP client for the glyph service (`/api/glyph/*`, `/api/oracle/*`).
pub struct HttpRitualClient {
    base_url: String,
    client: Client,
}

/// Response body as the service sent it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ServiceBody {
    Json(Value),
    Text(String),
}

impl HttpRitualClient {
    pub fn new(base_url: &str, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn from_config(config: &ServiceConfig) -> Self {
        Self::new(&config.base_url, build_service_client(config))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn send(&self, ritual: &str, request: RequestBuilder) -> Result<ServiceBody, NetworkError> {
        let response = request
            .send()
            .await
            .map_err(|e| NetworkError::transport(ritual, &e))?;

        if !response.status().is_success() {
            return Err(status_error(ritual, response).await);
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("json"));

        let text = response
            .text()
            .await
            .map_err(|e| NetworkError::transport(ritual, &e))?;

        if is_json {
            serde_json::from_str(&text)
                .map(ServiceBody::Json)
                .map_err(|e| NetworkError::decode(ritual, e.to_string()))
        } else {
            Ok(ServiceBody::Text(text))
        }
    }

    async fn generate(&self, steps: u32, grammar: &str) -> Result<RitualResult, NetworkError> {
        let url = self.url("/api/glyph/generate");
        let steps = steps.to_string();

        let svg_body = self
            .send(
                "generate",
                self.client
                    .get(&url)
                    .query(&[("steps", steps.as_str()), ("grammar", grammar), ("format", "svg")]),
            )
            .await?;
        let svg = match svg_body {
            ServiceBody::Text(svg) | ServiceBody::Json(Value::String(svg)) => svg,
            ServiceBody::Json(_) => {
                return Err(NetworkError::decode("generate", "expected svg text"));
            }
        };

        let json_body = self
            .send(
                "generate",
                self.client
                    .get(&url)
                    .query(&[("steps", steps.as_str()), ("grammar", grammar), ("format", "json")]),
            )
            .await?;
        let ServiceBody::Json(mut document) = json_body else {
            return Err(NetworkError::decode("generate", "expected glyph json"));
        };
        let glyph = match document.get_mut("glyph") {
            Some(glyph) => glyph.take(),
            None => document,
        };

        Ok(RitualResult {
            svg,
            glyph,
            insight: None,
            compressed: None,
        })
    }

    async fn evolve(
        &self,
        steps: u32,
        grammar: &str,
        format: RitualFormat,
    ) -> Result<RitualResult, NetworkError> {
        let body = json!({ "steps": steps, "grammar": grammar, "format": format });
        let response = self
            .send(
                "evolve",
                self.client.post(self.url("/api/glyph/evolve")).json(&body),
            )
            .await?;
        Ok(normalize_glyph_body(response, Value::Null))
    }

    async fn mutate(&self, glyph: Value, format: RitualFormat) -> Result<RitualResult, NetworkError> {
        let body = json!({ "glyph": &glyph, "format": format });
        let response = self
            .send(
                "mutate",
                self.client.post(self.url("/api/glyph/mutate")).json(&body),
            )
            .await?;
        Ok(normalize_glyph_body(response, glyph))
    }

    async fn compress(&self, artifact: Artifact) -> Result<RitualResult, NetworkError> {
        let body = json!({ "glyph": &artifact.glyph, "format": RitualFormat::Json });
        let response = self
            .send(
                "compress",
                self.client.post(self.url("/api/glyph/compress")).json(&body),
            )
            .await?;
        let compressed = take_field(response, "compressed")
            .ok_or_else(|| NetworkError::decode("compress", "missing `compressed` field"))?;

        let mut result = RitualResult::from_artifact(artifact);
        result.compressed = Some(compressed);
        Ok(result)
    }

    async fn reflect(&self, artifact: Artifact) -> Result<RitualResult, NetworkError> {
        let response = self
            .send("reflect", self.client.get(self.url("/api/oracle/reflect")))
            .await?;
        let insight = match take_field(response, "insight") {
            Some(Value::String(text)) => text,
            Some(Value::Null) => String::new(),
            Some(other) => other.to_string(),
            None => return Err(NetworkError::decode("reflect", "missing `insight` field")),
        };

        let mut result = RitualResult::from_artifact(artifact);
        result.insight = Some(insight);
        Ok(result)
    }
}

impl RitualService for HttpRitualClient {
    fn name(&self) -> &str {
        "glyph-http"
    }

    fn invoke<'a>(&'a self, request: RitualRequest) -> RitualFuture<'a> {
        Box::pin(async move {
            tracing::debug!(ritual = request.label(), "invoking glyph service");
            match request {
                RitualRequest::Generate { steps, grammar } => self.generate(steps, &grammar).await,
                RitualRequest::Evolve {
                    steps,
                    grammar,
                    format,
                } => self.evolve(steps, &grammar, format).await,
                RitualRequest::Mutate { glyph, format } => self.mutate(glyph, format).await,
                RitualRequest::Compress { artifact } => self.compress(artifact).await,
                RitualRequest::Reflect { artifact } => self.reflect(artifact).await,
            }
        })
    }
}

/// Normalize an evolve/mutate body into `{svg, glyph}`.
///
/// Text bodies are the svg and keep `carried` as the glyph. A JSON object with
/// a string `svg` field is a paired response; any other JSON is the glyph.
pub(crate) fn normalize_glyph_body(body: ServiceBody, carried: Value) -> RitualResult {
    match body {
        ServiceBody::Text(svg) => RitualResult {
            svg,
            glyph: carried,
            insight: None,
            compressed: None,
        },
        ServiceBody::Json(Value::Object(mut map))
            if map.get("svg").is_some_and(Value::is_string) =>
        {
            let svg = match map.remove("svg") {
                Some(Value::String(svg)) => svg,
                _ => String::new(),
            };
            RitualResult {
                svg,
                glyph: map.remove("glyph").unwrap_or(Value::Null),
                insight: None,
                compressed: None,
            }
        }
        ServiceBody::Json(glyph) => RitualResult {
            svg: String::new(),
            glyph,
            insight: None,
            compressed: None,
        },
    }
}

fn take_field(body: ServiceBody, field: &str) -> Option<Value> {
    match body {
        ServiceBody::Json(Value::Object(mut map)) => map.remove(field),
        _ => None,
    }
}
