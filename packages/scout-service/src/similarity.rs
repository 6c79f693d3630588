use std::collections::HashMap;

use qdrant_client::qdrant::{PointId, ScoredPoint, Value, point_id::PointIdOptions, value::Kind};
use scout_storage::qdrant::{QdrantStore, ScoreKind};

use crate::{BoxFuture, Result, SimilaritySearch, signal::SignalType};

/// One row of a single-signal search.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSearchHit {
	pub id: String,
	/// Non-negative; lower is closer.
	pub distance: f32,
	pub document: Option<String>,
	pub entity_id: String,
}

/// Every hit one signal search returned, in index rank order.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalHits {
	pub signal: SignalType,
	pub hits: Vec<RawSearchHit>,
}

impl SimilaritySearch for QdrantStore {
	fn search<'a>(
		&'a self,
		collection: &'a str,
		query: &'a str,
		k: u32,
	) -> BoxFuture<'a, Result<Vec<RawSearchHit>>> {
		Box::pin(async move {
			let points = self.query_nearest(collection, query, k).await?;

			Ok(collect_hits(
				&points,
				self.entity_id_key.as_str(),
				self.document_key.as_str(),
				self.score_kind,
			))
		})
	}
}

pub fn collect_hits(
	points: &[ScoredPoint],
	entity_id_key: &str,
	document_key: &str,
	score_kind: ScoreKind,
) -> Vec<RawSearchHit> {
	let mut out = Vec::with_capacity(points.len());

	for point in points {
		let Some(id) = point.id.as_ref().and_then(point_id_to_string) else {
			tracing::warn!("Search hit missing point id.");

			continue;
		};
		let Some(entity_id) = payload_string(&point.payload, entity_id_key) else {
			tracing::warn!(point_id = %id, key = entity_id_key, "Search hit missing entity id.");

			continue;
		};

		out.push(RawSearchHit {
			id,
			distance: score_kind.to_distance(point.score),
			document: payload_string(&point.payload, document_key),
			entity_id,
		});
	}

	out
}

fn point_id_to_string(point_id: &PointId) -> Option<String> {
	match &point_id.point_id_options {
		Some(PointIdOptions::Uuid(id)) => Some(id.clone()),
		Some(PointIdOptions::Num(id)) => Some(id.to_string()),
		None => None,
	}
}

fn payload_string(payload: &HashMap<String, Value>, key: &str) -> Option<String> {
	let value = payload.get(key)?;

	match &value.kind {
		Some(Kind::StringValue(text)) if !text.trim().is_empty() => Some(text.to_string()),
		_ => None,
	}
}
