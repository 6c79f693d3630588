use futures::future;
use scout_storage::{db::Db, models::CreatorProfile, queries};

use crate::{BoxFuture, ProfileStore, Result, scoring::ScoredCandidate};

/// Display attributes attached to a result. Unknown creators get empty strings and zero followers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileAttributes {
	pub creator_name: String,
	pub handle: String,
	pub platform_id: String,
	pub followers_count: u64,
	pub profile_image: String,
}
impl From<CreatorProfile> for ProfileAttributes {
	fn from(profile: CreatorProfile) -> Self {
		Self {
			creator_name: profile.creator_name,
			handle: profile.handle,
			platform_id: profile.platform_id,
			followers_count: u64::try_from(profile.followers_count).unwrap_or(0),
			profile_image: profile.profile_image,
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedCandidate {
	pub scored: ScoredCandidate,
	pub profile: ProfileAttributes,
}
impl EnrichedCandidate {
	pub fn entity_id(&self) -> &str {
		self.scored.candidate.entity_id.as_str()
	}
}

impl ProfileStore for Db {
	fn get_profile<'a>(
		&'a self,
		entity_id: &'a str,
	) -> BoxFuture<'a, Result<Option<CreatorProfile>>> {
		Box::pin(async move { Ok(queries::get_creator_profile(&self.pool, entity_id).await?) })
	}
}

/// Looks up one candidate's profile. A missing row or a failed lookup yields default attributes.
pub async fn enrich(store: &dyn ProfileStore, scored: ScoredCandidate) -> EnrichedCandidate {
	let entity_id = scored.candidate.entity_id.as_str();
	let profile = match store.get_profile(entity_id).await {
		Ok(Some(profile)) => ProfileAttributes::from(profile),
		Ok(None) => {
			tracing::debug!(entity_id, "No profile stored for candidate.");

			ProfileAttributes::default()
		},
		Err(err) => {
			tracing::warn!(entity_id, error = %err, "Profile lookup failed. Using default attributes.");

			ProfileAttributes::default()
		},
	};

	EnrichedCandidate { scored, profile }
}

/// Enriches all candidates concurrently, preserving input order.
pub async fn enrich_candidates(
	store: &dyn ProfileStore,
	scored: Vec<ScoredCandidate>,
) -> Vec<EnrichedCandidate> {
	future::join_all(scored.into_iter().map(|candidate| enrich(store, candidate))).await
}
