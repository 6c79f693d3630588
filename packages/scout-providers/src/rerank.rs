// std
use std::time::Duration as StdDuration;

// crates.io
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::{Error, Result};

/// One scored document as returned by the cross-encoder, addressed by its position in the
/// submitted document list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RerankHit {
	pub index: usize,
	pub relevance_score: f32,
}

#[derive(Serialize)]
struct RerankRequest<'a> {
	model: &'a str,
	query: &'a str,
	documents: &'a [String],
	top_k: u32,
}

/// HTTP cross-encoder client for Voyage/Cohere/Jina style `/rerank` endpoints.
///
/// The underlying connection pool is built once and reused for every call.
pub struct HttpReranker {
	client: Client,
	url: String,
	model: String,
	headers: reqwest::header::HeaderMap,
}
impl HttpReranker {
	pub fn new(cfg: &scout_config::ProviderConfig) -> Result<Self> {
		let client = Client::builder().timeout(StdDuration::from_millis(cfg.timeout_ms)).build()?;
		let url = format!("{}{}", cfg.api_base.trim_end_matches('/'), cfg.path);
		let headers = crate::auth_headers(&cfg.api_key, &cfg.default_headers)?;

		Ok(Self { client, url, model: cfg.model.clone(), headers })
	}

	pub async fn rerank(&self, query: &str, docs: &[String], top_k: u32) -> Result<Vec<RerankHit>> {
		let body = RerankRequest { model: self.model.as_str(), query, documents: docs, top_k };
		let res =
			self.client.post(&self.url).headers(self.headers.clone()).json(&body).send().await?;
		let bytes = res.error_for_status()?.bytes().await?;
		let json: Value = serde_json::from_slice(&bytes)?;
		let hits = parse_rerank_response(json)?;

		tracing::debug!(docs = docs.len(), hits = hits.len(), "Rerank call completed.");

		Ok(hits)
	}
}

pub fn parse_rerank_response(json: Value) -> Result<Vec<RerankHit>> {
	let results = json
		.get("data")
		.or_else(|| json.get("results"))
		.and_then(|v| v.as_array())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Rerank response is missing results array.".to_string(),
		})?;
	let mut hits = Vec::with_capacity(results.len());

	for item in results {
		let index = item.get("index").and_then(|v| v.as_u64()).ok_or_else(|| {
			Error::InvalidResponse { message: "Rerank result missing index.".to_string() }
		})? as usize;
		let relevance_score = item
			.get("relevance_score")
			.or_else(|| item.get("score"))
			.and_then(|v| v.as_f64())
			.ok_or_else(|| Error::InvalidResponse {
				message: "Rerank result missing score.".to_string(),
			})? as f32;

		hits.push(RerankHit { index, relevance_score });
	}

	Ok(hits)
}
