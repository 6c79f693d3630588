use std::collections::HashSet;

use scout_providers::rerank::{HttpReranker, RerankHit};
use serde::Serialize;

use crate::{
	BoxFuture, Error, RerankProvider, Result, enrich::EnrichedCandidate, scoring::cmp_f32_desc,
	signal::SignalType,
};

/// Final output row, ordered by `relevance_score`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
	#[serde(rename = "id")]
	pub entity_id: String,
	pub creator_name: String,
	pub handle: String,
	pub platform_id: String,
	pub followers_count: u64,
	pub profile_image: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub niche_summary: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub style_summary: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub audience_summary: Option<String>,
	pub weighted_similarity: f32,
	pub relevance_score: f32,
}
impl RankedResult {
	pub fn from_enriched(enriched: EnrichedCandidate, relevance_score: f32) -> Self {
		let EnrichedCandidate { scored, profile } = enriched;
		let candidate = scored.candidate;

		Self {
			niche_summary: candidate.niche.and_then(|matched| matched.document),
			style_summary: candidate.style.and_then(|matched| matched.document),
			audience_summary: candidate.audience.and_then(|matched| matched.document),
			entity_id: candidate.entity_id,
			creator_name: profile.creator_name,
			handle: profile.handle,
			platform_id: profile.platform_id,
			followers_count: profile.followers_count,
			profile_image: profile.profile_image,
			weighted_similarity: scored.weighted_similarity,
			relevance_score,
		}
	}
}

impl RerankProvider for HttpReranker {
	fn rerank<'a>(
		&'a self,
		query: &'a str,
		docs: &'a [String],
		top_k: u32,
	) -> BoxFuture<'a, Result<Vec<RerankHit>>> {
		Box::pin(async move { Ok(HttpReranker::rerank(self, query, docs, top_k).await?) })
	}
}

/// Renders the text the cross-encoder scores: name, handle and whichever summaries are present,
/// one `key: value` line each. Scores and ids stay out of the document.
pub fn render_document(candidate: &EnrichedCandidate) -> String {
	let summaries = [
		("nicheSummary", SignalType::Niche),
		("styleSummary", SignalType::Style),
		("audienceSummary", SignalType::Audience),
	];
	let mut lines = vec![
		format!("creatorName: {}", render_value(candidate.profile.creator_name.as_str())),
		format!("handle: {}", render_value(candidate.profile.handle.as_str())),
	];

	for (key, signal) in summaries {
		if let Some(summary) = candidate.scored.candidate.summary(signal) {
			lines.push(format!("{key}: {}", render_value(summary)));
		}
	}

	lines.join("\n")
}

/// Emits `value` bare unless a reader could mistake it for structure or a non-string scalar, in
/// which case it becomes a JSON string literal. Commas stay bare since every value sits on its
/// own line.
fn render_value(value: &str) -> String {
	let needs_quotes = value.is_empty()
		|| value.trim() != value
		|| matches!(value, "true" | "false" | "null")
		|| value.parse::<f64>().is_ok()
		|| value.starts_with('-')
		|| value.contains([':', '"', '\\', '[', ']', '{', '}'])
		|| value.chars().any(char::is_control);

	if needs_quotes {
		serde_json::Value::from(value).to_string()
	} else {
		value.to_string()
	}
}

/// Maps rerank hits back onto the submitted candidates, highest relevance first.
pub fn assemble_ranked(
	candidates: Vec<EnrichedCandidate>,
	hits: &[RerankHit],
	top_k: u32,
) -> Vec<RankedResult> {
	let mut slots: Vec<Option<EnrichedCandidate>> = candidates.into_iter().map(Some).collect();
	let mut seen = HashSet::new();
	let mut ordered: Vec<RerankHit> = hits.to_vec();

	ordered.sort_by(|a, b| cmp_f32_desc(a.relevance_score, b.relevance_score));

	let mut out = Vec::with_capacity(ordered.len().min(top_k as usize));

	for hit in ordered {
		if out.len() >= top_k as usize {
			break;
		}
		if !seen.insert(hit.index) {
			tracing::warn!(index = hit.index, "Skipping duplicate rerank index.");

			continue;
		}

		let Some(candidate) = slots.get_mut(hit.index).and_then(Option::take) else {
			tracing::warn!(
				index = hit.index,
				candidates = slots.len(),
				"Skipping out-of-range rerank index."
			);

			continue;
		};

		out.push(RankedResult::from_enriched(candidate, hit.relevance_score));
	}

	out
}

/// Scores every candidate against `query` with the cross-encoder and keeps the best `top_k`.
pub async fn rerank_candidates(
	reranker: &dyn RerankProvider,
	query: &str,
	candidates: Vec<EnrichedCandidate>,
	top_k: u32,
) -> Result<Vec<RankedResult>> {
	if candidates.is_empty() {
		return Ok(Vec::new());
	}

	let docs: Vec<String> = candidates.iter().map(render_document).collect();
	let hits = reranker
		.rerank(query, &docs, top_k)
		.await
		.map_err(|err| Error::RerankFailure { message: err.into_message() })?;

	Ok(assemble_ranked(candidates, &hits, top_k))
}

/// Local ordering used when cross-encoder ranking is disabled: the weighted similarity becomes
/// the relevance score.
pub fn rank_by_weighted_similarity(
	mut candidates: Vec<EnrichedCandidate>,
	top_k: u32,
) -> Vec<RankedResult> {
	candidates.sort_by(|a, b| {
		cmp_f32_desc(a.scored.weighted_similarity, b.scored.weighted_similarity)
			.then_with(|| a.entity_id().cmp(b.entity_id()))
	});
	candidates.truncate(top_k as usize);

	candidates
		.into_iter()
		.map(|candidate| {
			let score = candidate.scored.weighted_similarity;

			RankedResult::from_enriched(candidate, score)
		})
		.collect()
}
