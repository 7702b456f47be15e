pub mod browse;
pub mod search;
pub mod session;

mod error;

pub use error::{Error, Result};
pub use search::{SearchItem, SearchMode, SearchRequest, SearchResponse};
pub use session::SearchSession;

use std::{future::Future, pin::Pin, sync::Arc};

use scholar_config::{Config, EmbeddingProviderConfig};
use scholar_domain::{ProfessorFilters, RawCandidate};
use scholar_providers::embedding;
use scholar_storage::{
	db::Db,
	models::{CandidateRow, ProfessorFields, ProfessorRow},
	queries,
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>>;
}

/// Read access to the professor directory.
pub trait Catalog
where
	Self: Send + Sync,
{
	/// Substring matches. Rows usually come back without a similarity.
	fn search_exact<'a>(
		&'a self,
		term: &'a str,
		max_results: u32,
		filters: &'a ProfessorFilters,
	) -> BoxFuture<'a, Result<Vec<RawCandidate<ProfessorProfile>>>>;

	/// Nearest neighbours of `embedding` whose cosine similarity exceeds `match_threshold`.
	fn search_embeddings<'a>(
		&'a self,
		embedding: &'a [f32],
		match_threshold: f32,
		max_results: u32,
		filters: &'a ProfessorFilters,
	) -> BoxFuture<'a, Result<Vec<RawCandidate<ProfessorProfile>>>>;

	/// One id-ordered page of professors plus the filtered total.
	fn browse<'a>(
		&'a self,
		offset: u64,
		limit: u32,
		filters: &'a ProfessorFilters,
	) -> BoxFuture<'a, Result<(Vec<Professor>, u64)>>;
}

/// Descriptive fields shown for a professor. Carried through ranking untouched.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProfessorProfile {
	pub name: Option<String>,
	pub university: Option<String>,
	pub faculty: Option<String>,
	pub department: Option<String>,
	pub email: Option<String>,
	pub website: Option<String>,
	pub university_logo: Option<String>,
	#[serde(default)]
	pub research_interests: Vec<String>,
}
impl From<ProfessorFields> for ProfessorProfile {
	fn from(fields: ProfessorFields) -> Self {
		Self {
			name: fields.name,
			university: fields.university,
			faculty: fields.faculty,
			department: fields.department,
			email: fields.email,
			website: fields.website,
			university_logo: fields.university_logo,
			research_interests: fields.research_interests.unwrap_or_default(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Professor {
	pub id: i64,
	#[serde(flatten)]
	pub profile: ProfessorProfile,
}

pub struct SearchService {
	pub cfg: Config,
	pub catalog: Arc<dyn Catalog>,
	pub embedding: Arc<dyn EmbeddingProvider>,
}
impl SearchService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self::with_providers(cfg, Arc::new(db), Arc::new(DefaultEmbedding))
	}

	pub fn with_providers(
		cfg: Config,
		catalog: Arc<dyn Catalog>,
		embedding: Arc<dyn EmbeddingProvider>,
	) -> Self {
		Self { cfg, catalog, embedding }
	}
}

struct DefaultEmbedding;
impl EmbeddingProvider for DefaultEmbedding {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		Box::pin(async move { Ok(embedding::embed(cfg, texts).await?) })
	}
}

impl Catalog for Db {
	fn search_exact<'a>(
		&'a self,
		term: &'a str,
		max_results: u32,
		filters: &'a ProfessorFilters,
	) -> BoxFuture<'a, Result<Vec<RawCandidate<ProfessorProfile>>>> {
		Box::pin(async move {
			let rows = queries::search_exact(self, term, max_results, filters).await?;

			Ok(rows.into_iter().map(raw_candidate).collect())
		})
	}

	fn search_embeddings<'a>(
		&'a self,
		embedding: &'a [f32],
		match_threshold: f32,
		max_results: u32,
		filters: &'a ProfessorFilters,
	) -> BoxFuture<'a, Result<Vec<RawCandidate<ProfessorProfile>>>> {
		Box::pin(async move {
			let rows =
				queries::search_embeddings(self, embedding, match_threshold, max_results, filters)
					.await?;

			Ok(rows.into_iter().map(raw_candidate).collect())
		})
	}

	fn browse<'a>(
		&'a self,
		offset: u64,
		limit: u32,
		filters: &'a ProfessorFilters,
	) -> BoxFuture<'a, Result<(Vec<Professor>, u64)>> {
		Box::pin(async move {
			let total = queries::count_professors(self, filters).await?;
			let rows = queries::list_professors(self, offset, limit, filters).await?;
			let professors = rows.into_iter().map(professor).collect();

			Ok((professors, u64::try_from(total).unwrap_or_default()))
		})
	}
}

fn raw_candidate(row: CandidateRow) -> RawCandidate<ProfessorProfile> {
	RawCandidate { id: row.id, similarity: row.similarity, payload: row.fields.into() }
}

fn professor(row: ProfessorRow) -> Professor {
	Professor { id: row.id, profile: row.fields.into() }
}
