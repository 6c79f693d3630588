use qdrant_client::qdrant::{Document, Query, QueryPointsBuilder, ScoredPoint};

use crate::Result;

/// How the index reports closeness for a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreKind {
	/// Lower is closer (Euclid, Manhattan).
	Distance,
	/// Higher is closer, at most 1 (Cosine, Dot on normalized vectors).
	Similarity,
}
impl ScoreKind {
	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"distance" => Some(Self::Distance),
			"similarity" => Some(Self::Similarity),
			_ => None,
		}
	}

	/// Converts a point score into a non-negative distance.
	pub fn to_distance(self, score: f32) -> f32 {
		let distance = match self {
			Self::Distance => score,
			Self::Similarity => 1.0 - score,
		};

		if distance.is_nan() { 0.0 } else { distance.max(0.0) }
	}
}

pub struct QdrantStore {
	pub client: qdrant_client::Qdrant,
	pub entity_id_key: String,
	pub document_key: String,
	pub inference_model: String,
	pub vector_name: Option<String>,
	pub score_kind: ScoreKind,
}
impl QdrantStore {
	pub fn new(cfg: &scout_config::Qdrant) -> Result<Self> {
		let client =
			qdrant_client::Qdrant::from_url(&cfg.url).api_key(cfg.api_key.clone()).build()?;

		Ok(Self {
			client,
			entity_id_key: cfg.entity_id_key.clone(),
			document_key: cfg.document_key.clone(),
			inference_model: cfg.inference_model.clone(),
			vector_name: cfg.vector_name.clone(),
			// Config validation restricts score_kind to the two known values.
			score_kind: ScoreKind::parse(cfg.score_kind.as_str()).unwrap_or(ScoreKind::Similarity),
		})
	}

	/// Runs one nearest-neighbor query over `collection`, letting Qdrant embed `text` with the
	/// configured inference model.
	pub async fn query_nearest(
		&self,
		collection: &str,
		text: &str,
		limit: u32,
	) -> Result<Vec<ScoredPoint>> {
		let mut search = QueryPointsBuilder::new(collection)
			.query(Query::new_nearest(Document::new(text, self.inference_model.as_str())))
			.limit(limit as u64)
			.with_payload(true);

		if let Some(vector_name) = self.vector_name.as_deref() {
			search = search.using(vector_name);
		}

		let response = self.client.query(search).await?;

		Ok(response.result)
	}
}
