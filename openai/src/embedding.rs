//! [`EmbeddingModel`] implementation over the `/embeddings` endpoint.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use tome_core::{EmbeddingModel, Result as CoreResult};

use crate::client::{AuthStyle, Config, OpenAI, request_with_retry};
use crate::error::OpenAIError;

impl EmbeddingModel for OpenAI {
    fn dim(&self) -> usize {
        self.config().embedding_dimensions
    }

    fn embed(&self, text: &str) -> impl core::future::Future<Output = CoreResult<Vec<f32>>> + Send {
        let cfg = self.config();
        let input = vec![text.to_owned()];
        async move {
            let mut rows = embed_texts(&cfg, &input).await?;
            rows.pop()
                .ok_or_else(|| anyhow::anyhow!("embedding response missing vector data"))
        }
    }

    fn embed_batch(
        &self,
        texts: &[String],
    ) -> impl core::future::Future<Output = CoreResult<Vec<Vec<f32>>>> + Send {
        let cfg = self.config();
        let texts = texts.to_vec();
        async move {
            if texts.is_empty() {
                return Ok(Vec::new());
            }
            let rows = embed_texts(&cfg, &texts).await?;
            Ok(rows)
        }
    }
}

async fn embed_texts(cfg: &Arc<Config>, inputs: &[String]) -> Result<Vec<Vec<f32>>, OpenAIError> {
    request_with_retry(&cfg.retry, || embed_once(cfg, inputs)).await
}

async fn embed_once(cfg: &Arc<Config>, inputs: &[String]) -> Result<Vec<Vec<f32>>, OpenAIError> {
    let endpoint = cfg.request_url("/embeddings");
    let request = EmbeddingRequest {
        model: &cfg.embedding_model,
        input: inputs,
    };

    let mut builder = cfg.http.post(endpoint);
    builder = match cfg.auth_style {
        AuthStyle::Bearer => builder.bearer_auth(&cfg.api_key),
        AuthStyle::ApiKeyHeader => builder.header("api-key", &cfg.api_key),
    };

    let response = builder
        .header(reqwest::header::USER_AGENT, "tome-openai/0.1")
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(OpenAIError::Api {
            status: status.as_u16(),
            message,
        });
    }

    let payload: EmbeddingResponse = response.json().await?;

    // Compatible endpoints are not required to keep `data` in request
    // order; the `index` field is authoritative.
    let mut data = payload.data;
    data.sort_by_key(|item| item.index);

    if data.len() != inputs.len() {
        return Err(OpenAIError::MissingData(format!(
            "embedding response carried {} rows for {} inputs",
            data.len(),
            inputs.len()
        )));
    }

    Ok(data.into_iter().map(|item| item.embedding).collect())
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    index: usize,
    embedding: Vec<f32>,
}
