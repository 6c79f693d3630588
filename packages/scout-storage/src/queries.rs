use sqlx::PgExecutor;

use crate::{Result, models::CreatorProfile};

pub async fn get_creator_profile<'e, E>(executor: E, creator_id: &str) -> Result<Option<CreatorProfile>>
where
	E: PgExecutor<'e>,
{
	let profile = sqlx::query_as::<_, CreatorProfile>(
		"\
SELECT
	creator_id,
	creator_name,
	handle,
	platform_id,
	followers_count,
	profile_image,
	created_at,
	updated_at
FROM creator_profiles
WHERE creator_id = $1",
	)
	.bind(creator_id)
	.fetch_optional(executor)
	.await?;

	Ok(profile)
}

pub async fn upsert_creator_profile<'e, E>(executor: E, profile: &CreatorProfile) -> Result<()>
where
	E: PgExecutor<'e>,
{
	sqlx::query(
		"\
INSERT INTO creator_profiles (
	creator_id,
	creator_name,
	handle,
	platform_id,
	followers_count,
	profile_image,
	created_at,
	updated_at
)
VALUES ($1,$2,$3,$4,$5,$6,$7,$8)
ON CONFLICT (creator_id) DO UPDATE SET
	creator_name = EXCLUDED.creator_name,
	handle = EXCLUDED.handle,
	platform_id = EXCLUDED.platform_id,
	followers_count = EXCLUDED.followers_count,
	profile_image = EXCLUDED.profile_image,
	updated_at = EXCLUDED.updated_at",
	)
	.bind(profile.creator_id.as_str())
	.bind(profile.creator_name.as_str())
	.bind(profile.handle.as_str())
	.bind(profile.platform_id.as_str())
	.bind(profile.followers_count)
	.bind(profile.profile_image.as_str())
	.bind(profile.created_at)
	.bind(profile.updated_at)
	.execute(executor)
	.await?;

	Ok(())
}
