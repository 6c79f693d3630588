use time::OffsetDateTime;

/// Display attributes of one creator, keyed by the same id the vector payloads carry.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct CreatorProfile {
	pub creator_id: String,
	pub creator_name: String,
	pub handle: String,
	pub platform_id: String,
	pub followers_count: i64,
	pub profile_image: String,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}
