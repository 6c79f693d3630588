use std::cmp::Ordering;

use scout_config::SignalWeights;

use crate::fusion::CandidateAggregate;

/// A fused candidate with its weighted similarity in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
	pub candidate: CandidateAggregate,
	pub weighted_similarity: f32,
}

/// Maps a non-negative distance into `(0, 1]`; distance 0 is similarity 1.
pub fn distance_to_similarity(distance: f32) -> f32 {
	let distance = if distance.is_nan() { 0.0 } else { distance.max(0.0) };

	1.0 / (1.0 + distance)
}

/// Weighted mean of the per-signal similarities, normalized by the weights of the signals that
/// actually matched. Absent signals neither add nor penalize.
pub fn weighted_similarity(candidate: &CandidateAggregate, weights: &SignalWeights) -> f32 {
	let (sum, total) =
		candidate.matched_signals().fold((0.0_f32, 0.0_f32), |(sum, total), (signal, matched)| {
			let weight = signal.weight(weights);

			(sum + distance_to_similarity(matched.distance) * weight, total + weight)
		});

	if total > 0.0 { (sum / total).clamp(0.0, 1.0) } else { 0.0 }
}

/// Scores every candidate and orders them by descending weighted similarity, breaking ties by
/// entity id.
pub fn score_candidates(
	candidates: Vec<CandidateAggregate>,
	weights: &SignalWeights,
) -> Vec<ScoredCandidate> {
	let mut scored: Vec<ScoredCandidate> = candidates
		.into_iter()
		.map(|candidate| {
			let weighted_similarity = weighted_similarity(&candidate, weights);

			ScoredCandidate { candidate, weighted_similarity }
		})
		.collect();

	scored.sort_by(|a, b| {
		cmp_f32_desc(a.weighted_similarity, b.weighted_similarity)
			.then_with(|| a.candidate.entity_id.cmp(&b.candidate.entity_id))
	});

	scored
}

/// Descending order with NaN last.
pub fn cmp_f32_desc(a: f32, b: f32) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}
