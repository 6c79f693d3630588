use serde::{Deserialize, Serialize};
use tracing::Instrument;

use crate::{
	Error, Result, ScoutService, SignalFailure, enrich, fusion,
	rerank::{self, RankedResult},
	scoring,
	signal::SignalType,
	similarity::{RawSearchHit, SignalHits},
};

#[derive(Debug, Clone, Deserialize)]
pub struct FindCreatorsRequest {
	pub query: String,
	/// Result cap; falls back to `search.top_k`.
	#[serde(default)]
	pub top_k: Option<u32>,
	/// Nearest neighbors requested per signal; falls back to `search.k`.
	#[serde(default)]
	pub k: Option<u32>,
}
impl FindCreatorsRequest {
	pub fn new(query: impl Into<String>) -> Self {
		Self { query: query.into(), top_k: None, k: None }
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FindCreatorsResponse {
	pub success: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	pub creators: Vec<RankedResult>,
}
impl FindCreatorsResponse {
	pub fn ok(creators: Vec<RankedResult>) -> Self {
		Self { success: true, error: None, creators }
	}

	pub fn failure(err: &Error) -> Self {
		Self { success: false, error: Some(err.to_string()), creators: Vec::new() }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
	Searching,
	Fusing,
	Scoring,
	Enriching,
	Reranking,
	Done,
	Failed,
}
impl PipelineStage {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Searching => "searching",
			Self::Fusing => "fusing",
			Self::Scoring => "scoring",
			Self::Enriching => "enriching",
			Self::Reranking => "reranking",
			Self::Done => "done",
			Self::Failed => "failed",
		}
	}
}

/// How the final ordering is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingMode {
	/// Cross-encoder relevance; a rerank failure fails the query.
	Rerank,
	/// Weighted similarity doubles as the relevance score.
	Weighted,
}
impl RankingMode {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"rerank" => Some(Self::Rerank),
			"weighted" => Some(Self::Weighted),
			_ => None,
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::Rerank => "rerank",
			Self::Weighted => "weighted",
		}
	}

	/// Stage logged for the final ordering; local weighted ordering has none of its own.
	pub fn stage(self) -> Option<PipelineStage> {
		match self {
			Self::Rerank => Some(PipelineStage::Reranking),
			Self::Weighted => None,
		}
	}
}

struct StageTracker {
	stage: PipelineStage,
}
impl StageTracker {
	fn new() -> Self {
		tracing::debug!(stage = PipelineStage::Searching.as_str(), "Pipeline stage entered.");

		Self { stage: PipelineStage::Searching }
	}

	fn advance(&mut self, stage: PipelineStage) {
		self.stage = stage;

		tracing::debug!(stage = stage.as_str(), "Pipeline stage entered.");
	}

	fn fail(&self, err: &Error) {
		tracing::warn!(
			stage = self.stage.as_str(),
			next = PipelineStage::Failed.as_str(),
			error = %err,
			"Creator search failed."
		);
	}
}

impl ScoutService {
	/// Runs the full pipeline and folds any failure into the response body.
	pub async fn find_creators(&self, req: FindCreatorsRequest) -> FindCreatorsResponse {
		match self.try_find_creators(req).await {
			Ok(creators) => FindCreatorsResponse::ok(creators),
			Err(err) => FindCreatorsResponse::failure(&err),
		}
	}

	pub async fn try_find_creators(&self, req: FindCreatorsRequest) -> Result<Vec<RankedResult>> {
		let query = req.query.trim();

		if query.is_empty() {
			return Err(Error::InvalidRequest { message: "query is required.".to_string() });
		}

		let top_k = req.top_k.unwrap_or(self.cfg.search.top_k);
		let k = req.k.unwrap_or(self.cfg.search.k);

		if top_k == 0 {
			return Err(Error::InvalidRequest {
				message: "top_k must be greater than zero.".to_string(),
			});
		}
		if k == 0 {
			return Err(Error::InvalidRequest {
				message: "k must be greater than zero.".to_string(),
			});
		}

		let mode =
			RankingMode::parse(self.cfg.ranking.mode.as_str()).unwrap_or(RankingMode::Rerank);
		let trace_id = uuid::Uuid::new_v4();
		let span = tracing::info_span!("find_creators", %trace_id, top_k, k, mode = mode.as_str());

		async move {
			let mut tracker = StageTracker::new();
			let result = self.run_pipeline(&mut tracker, query, top_k, k, mode).await;

			match &result {
				Ok(creators) => {
					tracker.advance(PipelineStage::Done);
					tracing::info!(results = creators.len(), "Creator search completed.");
				},
				Err(err) => tracker.fail(err),
			}

			result
		}
		.instrument(span)
		.await
	}

	async fn run_pipeline(
		&self,
		tracker: &mut StageTracker,
		query: &str,
		top_k: u32,
		k: u32,
		mode: RankingMode,
	) -> Result<Vec<RankedResult>> {
		let lists = self.search_all_signals(query, k).await?;

		tracker.advance(PipelineStage::Fusing);

		let candidates = fusion::fuse(&lists);

		tracker.advance(PipelineStage::Scoring);

		let scored = scoring::score_candidates(candidates, &self.cfg.ranking.weights);

		tracker.advance(PipelineStage::Enriching);

		let enriched = enrich::enrich_candidates(self.backends.profiles.as_ref(), scored).await;

		if let Some(stage) = mode.stage() {
			tracker.advance(stage);
		}

		match mode {
			RankingMode::Rerank =>
				rerank::rerank_candidates(self.backends.reranker.as_ref(), query, enriched, top_k)
					.await,
			RankingMode::Weighted => Ok(rerank::rank_by_weighted_similarity(enriched, top_k)),
		}
	}

	/// Issues the three signal searches concurrently and waits for all of them. Any failure fails
	/// the whole group, listing every failed signal in signal order.
	async fn search_all_signals(&self, query: &str, k: u32) -> Result<Vec<SignalHits>> {
		let (niche, style, audience) = tokio::join!(
			self.search_signal(SignalType::Niche, query, k),
			self.search_signal(SignalType::Style, query, k),
			self.search_signal(SignalType::Audience, query, k),
		);
		let mut lists = Vec::with_capacity(SignalType::ALL.len());
		let mut failures = Vec::new();

		for (signal, outcome) in
			[(SignalType::Niche, niche), (SignalType::Style, style), (SignalType::Audience, audience)]
		{
			match outcome {
				Ok(hits) => lists.push(SignalHits { signal, hits }),
				Err(err) => failures.push(SignalFailure { signal, message: err.into_message() }),
			}
		}

		if !failures.is_empty() {
			return Err(Error::SearchFailure { failures });
		}

		Ok(lists)
	}

	async fn search_signal(
		&self,
		signal: SignalType,
		query: &str,
		k: u32,
	) -> Result<Vec<RawSearchHit>> {
		let collection = signal.collection(&self.cfg.storage.qdrant.collections);
		let hits = self.backends.search.search(collection, query, k).await?;

		tracing::debug!(
			signal = signal.as_str(),
			collection,
			hits = hits.len(),
			"Signal search completed."
		);

		Ok(hits)
	}
}
