use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub ranking: Ranking,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
	pub qdrant: Qdrant,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Qdrant {
	pub url: String,
	pub api_key: Option<String>,
	#[serde(default)]
	pub collections: Collections,
	/// Payload key holding the creator id each indexed summary belongs to.
	#[serde(default = "default_entity_id_key")]
	pub entity_id_key: String,
	/// Payload key holding the summary text returned alongside a hit.
	#[serde(default = "default_document_key")]
	pub document_key: String,
	/// Model Qdrant uses to embed the query text server side.
	pub inference_model: String,
	/// Named vector to search; the unnamed default vector when absent.
	pub vector_name: Option<String>,
	/// How point scores are interpreted: `distance` (lower is closer) or `similarity` (cosine-like,
	/// higher is closer).
	#[serde(default = "default_score_kind")]
	pub score_kind: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Collections {
	pub niche: String,
	pub style: String,
	pub audience: String,
}
impl Default for Collections {
	fn default() -> Self {
		Self {
			niche: "niche-summaries".to_string(),
			style: "style-summaries".to_string(),
			audience: "target-audience-summaries".to_string(),
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub rerank: ProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct ProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	#[serde(default = "default_rerank_model")]
	pub model: String,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Search {
	/// Nearest neighbors requested from each signal collection.
	pub k: u32,
	/// Maximum number of creators returned to the caller.
	pub top_k: u32,
}
impl Default for Search {
	fn default() -> Self {
		Self { k: 10, top_k: 6 }
	}
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Ranking {
	/// `rerank` orders the final list with the cross-encoder; `weighted` sorts locally by the fused
	/// score.
	pub mode: String,
	pub weights: SignalWeights,
}
impl Default for Ranking {
	fn default() -> Self {
		Self { mode: "rerank".to_string(), weights: SignalWeights::default() }
	}
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SignalWeights {
	pub niche: f32,
	pub style: f32,
	pub audience: f32,
}
impl Default for SignalWeights {
	fn default() -> Self {
		Self { niche: 0.40, style: 0.35, audience: 0.25 }
	}
}

fn default_entity_id_key() -> String {
	"socialId".to_string()
}

fn default_document_key() -> String {
	"document".to_string()
}

fn default_score_kind() -> String {
	"similarity".to_string()
}

fn default_rerank_model() -> String {
	"rerank-2.5".to_string()
}
