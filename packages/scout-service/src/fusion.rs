//! Per-entity union of the three signal result lists.

use std::collections::HashMap;

use crate::{
	signal::SignalType,
	similarity::{RawSearchHit, SignalHits},
};

/// What one signal contributed for an entity.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalMatch {
	pub document: Option<String>,
	pub distance: f32,
}

/// Everything the signal searches returned for one entity. An entity only exists here if at least
/// one signal matched it.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateAggregate {
	pub entity_id: String,
	pub niche: Option<SignalMatch>,
	pub style: Option<SignalMatch>,
	pub audience: Option<SignalMatch>,
}
impl CandidateAggregate {
	fn new(entity_id: String) -> Self {
		Self { entity_id, niche: None, style: None, audience: None }
	}

	pub fn signal(&self, signal: SignalType) -> Option<&SignalMatch> {
		match signal {
			SignalType::Niche => self.niche.as_ref(),
			SignalType::Style => self.style.as_ref(),
			SignalType::Audience => self.audience.as_ref(),
		}
	}

	pub fn summary(&self, signal: SignalType) -> Option<&str> {
		self.signal(signal).and_then(|matched| matched.document.as_deref())
	}

	/// Present signals in [`SignalType::ALL`] order.
	pub fn matched_signals(&self) -> impl Iterator<Item = (SignalType, &SignalMatch)> {
		SignalType::ALL.into_iter().filter_map(|signal| Some((signal, self.signal(signal)?)))
	}

	fn slot_mut(&mut self, signal: SignalType) -> &mut Option<SignalMatch> {
		match signal {
			SignalType::Niche => &mut self.niche,
			SignalType::Style => &mut self.style,
			SignalType::Audience => &mut self.audience,
		}
	}
}

/// Fold state: aggregates in first-seen order plus an index by entity id.
#[derive(Debug, Default)]
struct FusionAccumulator {
	positions: HashMap<String, usize>,
	candidates: Vec<CandidateAggregate>,
}
impl FusionAccumulator {
	fn absorb(mut self, signal: SignalType, hit: &RawSearchHit) -> Self {
		let position = match self.positions.get(&hit.entity_id) {
			Some(position) => *position,
			None => {
				let position = self.candidates.len();

				self.positions.insert(hit.entity_id.clone(), position);
				self.candidates.push(CandidateAggregate::new(hit.entity_id.clone()));

				position
			},
		};
		let slot = self.candidates[position].slot_mut(signal);

		// A signal keeps its first (closest) hit for an entity.
		if slot.is_none() {
			*slot = Some(SignalMatch { document: hit.document.clone(), distance: hit.distance });
		}

		self
	}
}

/// Unions the per-signal lists into one aggregate per entity id.
pub fn fuse(lists: &[SignalHits]) -> Vec<CandidateAggregate> {
	lists
		.iter()
		.flat_map(|list| list.hits.iter().map(move |hit| (list.signal, hit)))
		.fold(FusionAccumulator::default(), |acc, (signal, hit)| acc.absorb(signal, hit))
		.candidates
}
