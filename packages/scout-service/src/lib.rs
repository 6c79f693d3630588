pub mod enrich;
pub mod fusion;
pub mod rerank;
pub mod scoring;
pub mod search;
pub mod signal;
pub mod similarity;

mod error;

pub use enrich::{EnrichedCandidate, ProfileAttributes};
pub use error::{Error, Result, SignalFailure};
pub use fusion::{CandidateAggregate, SignalMatch};
pub use rerank::RankedResult;
pub use scoring::ScoredCandidate;
pub use search::{FindCreatorsRequest, FindCreatorsResponse, PipelineStage, RankingMode};
pub use signal::SignalType;
pub use similarity::RawSearchHit;

use std::{future::Future, pin::Pin, sync::Arc};

use scout_config::Config;
use scout_providers::rerank::{HttpReranker, RerankHit};
use scout_storage::{db::Db, models::CreatorProfile, qdrant::QdrantStore};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Nearest-neighbor search over one named collection.
pub trait SimilaritySearch
where
	Self: Send + Sync,
{
	fn search<'a>(
		&'a self,
		collection: &'a str,
		query: &'a str,
		k: u32,
	) -> BoxFuture<'a, Result<Vec<RawSearchHit>>>;
}

/// Key-value lookup of creator display attributes.
pub trait ProfileStore
where
	Self: Send + Sync,
{
	fn get_profile<'a>(
		&'a self,
		entity_id: &'a str,
	) -> BoxFuture<'a, Result<Option<CreatorProfile>>>;
}

/// Cross-encoder scoring of documents against a query.
pub trait RerankProvider
where
	Self: Send + Sync,
{
	fn rerank<'a>(
		&'a self,
		query: &'a str,
		docs: &'a [String],
		top_k: u32,
	) -> BoxFuture<'a, Result<Vec<RerankHit>>>;
}

/// Long-lived handles to the external collaborators, shared by every query.
#[derive(Clone)]
pub struct Backends {
	pub search: Arc<dyn SimilaritySearch>,
	pub profiles: Arc<dyn ProfileStore>,
	pub reranker: Arc<dyn RerankProvider>,
}
impl Backends {
	pub fn new(
		search: Arc<dyn SimilaritySearch>,
		profiles: Arc<dyn ProfileStore>,
		reranker: Arc<dyn RerankProvider>,
	) -> Self {
		Self { search, profiles, reranker }
	}
}

pub struct ScoutService {
	pub cfg: Config,
	pub backends: Backends,
}
impl ScoutService {
	pub fn new(cfg: Config, backends: Backends) -> Self {
		Self { cfg, backends }
	}

	/// Connects to Postgres and Qdrant and builds the rerank client from `cfg`.
	pub async fn connect(cfg: Config) -> Result<Self> {
		let db = Db::connect(&cfg.storage.postgres).await?;

		db.ensure_schema().await?;

		let qdrant = QdrantStore::new(&cfg.storage.qdrant)?;
		let reranker = HttpReranker::new(&cfg.providers.rerank)?;
		let backends = Backends::new(Arc::new(qdrant), Arc::new(db), Arc::new(reranker));

		Ok(Self::new(cfg, backends))
	}
}
