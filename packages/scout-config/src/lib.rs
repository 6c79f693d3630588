mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Collections, Config, Postgres, ProviderConfig, Providers, Qdrant, Ranking, Search, Service,
	SignalWeights, Storage,
};

use std::{env, fs, path::Path};

/// Environment variable consulted when `providers.rerank.api_key` is left blank in the file.
pub const RERANK_API_KEY_ENV: &str = "SCOUT_RERANK_API_KEY";

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	if cfg.providers.rerank.api_key.trim().is_empty()
		&& let Ok(key) = env::var(RERANK_API_KEY_ENV)
	{
		cfg.providers.rerank.api_key = key;
	}

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}

	let qdrant = &cfg.storage.qdrant;

	for (label, name) in [
		("storage.qdrant.collections.niche", &qdrant.collections.niche),
		("storage.qdrant.collections.style", &qdrant.collections.style),
		("storage.qdrant.collections.audience", &qdrant.collections.audience),
	] {
		if name.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if qdrant.collections.niche == qdrant.collections.style
		|| qdrant.collections.niche == qdrant.collections.audience
		|| qdrant.collections.style == qdrant.collections.audience
	{
		return Err(Error::Validation {
			message: "storage.qdrant.collections must name three distinct collections.".to_string(),
		});
	}
	if qdrant.entity_id_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.qdrant.entity_id_key must be non-empty.".to_string(),
		});
	}
	if qdrant.inference_model.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.qdrant.inference_model must be non-empty.".to_string(),
		});
	}
	if !matches!(qdrant.score_kind.as_str(), "distance" | "similarity") {
		return Err(Error::Validation {
			message: "storage.qdrant.score_kind must be one of distance or similarity.".to_string(),
		});
	}
	if cfg.search.k == 0 {
		return Err(Error::Validation {
			message: "search.k must be greater than zero.".to_string(),
		});
	}
	if cfg.search.top_k == 0 {
		return Err(Error::Validation {
			message: "search.top_k must be greater than zero.".to_string(),
		});
	}

	let weights = &cfg.ranking.weights;

	for (label, weight) in [
		("ranking.weights.niche", weights.niche),
		("ranking.weights.style", weights.style),
		("ranking.weights.audience", weights.audience),
	] {
		if !weight.is_finite() {
			return Err(Error::Validation { message: format!("{label} must be a finite number.") });
		}
		// Every matched signal must contribute to the renormalization total.
		if weight <= 0.0 {
			return Err(Error::Validation {
				message: format!("{label} must be greater than zero."),
			});
		}
	}

	let mode = cfg.ranking.mode.as_str();

	if !matches!(mode, "rerank" | "weighted") {
		return Err(Error::Validation {
			message: "ranking.mode must be one of rerank or weighted.".to_string(),
		});
	}
	if mode == "rerank" && cfg.providers.rerank.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.rerank.api_key must be non-empty when ranking.mode is rerank."
				.to_string(),
		});
	}
	if cfg.providers.rerank.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.rerank.timeout_ms must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	let qdrant = &mut cfg.storage.qdrant;

	if qdrant.api_key.as_deref().map(|key| key.trim().is_empty()).unwrap_or(false) {
		qdrant.api_key = None;
	}
	if qdrant.vector_name.as_deref().map(|name| name.trim().is_empty()).unwrap_or(false) {
		qdrant.vector_name = None;
	}

	for name in
		[&mut qdrant.collections.niche, &mut qdrant.collections.style, &mut qdrant.collections.audience]
	{
		*name = name.trim().to_string();
	}

	qdrant.entity_id_key = qdrant.entity_id_key.trim().to_string();
	qdrant.document_key = qdrant.document_key.trim().to_string();
	cfg.ranking.mode = cfg.ranking.mode.trim().to_ascii_lowercase();
}
