use std::{future::Future, time::Duration};

use tokio::time;
use uuid::Uuid;

use crate::{Error, Professor, ProfessorProfile, Result, SearchService};
use scholar_domain::{
	Candidate, MatchSource, Page, ProfessorFilters, QueryRoute, RawCandidate, candidate, gate,
	merge, page,
};

const LEXICAL_ONLY_MESSAGE: &str = "Semantic search is unavailable. Showing keyword matches only.";
const SEMANTIC_ONLY_MESSAGE: &str = "Keyword search is unavailable. Showing semantic matches only.";
const ALL_FAILED_MESSAGE: &str = "Search is unavailable. Both matchers failed.";

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SearchRequest {
	#[serde(default)]
	pub query: Option<String>,
	/// 1-based. Missing or zero means the first page.
	#[serde(default)]
	pub page: Option<u32>,
	/// Falls back to `search.default_page_size`.
	#[serde(default)]
	pub page_size: Option<u32>,
	#[serde(default)]
	pub filters: ProfessorFilters,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
	/// Unranked listing. The query was absent or too short.
	Browse,
	Hybrid,
	LexicalOnly,
	SemanticOnly,
	Failed,
}
impl SearchMode {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Browse => "browse",
			Self::Hybrid => "hybrid",
			Self::LexicalOnly => "lexical_only",
			Self::SemanticOnly => "semantic_only",
			Self::Failed => "failed",
		}
	}
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SearchItem {
	pub id: i64,
	#[serde(flatten)]
	pub profile: ProfessorProfile,
	/// `None` in browse listings.
	pub similarity: Option<f64>,
	pub matched_by: Option<MatchSource>,
}
impl From<Candidate<ProfessorProfile>> for SearchItem {
	fn from(candidate: Candidate<ProfessorProfile>) -> Self {
		Self {
			id: candidate.id,
			profile: candidate.payload,
			similarity: Some(candidate.similarity),
			matched_by: Some(candidate.source),
		}
	}
}
impl From<Professor> for SearchItem {
	fn from(professor: Professor) -> Self {
		Self { id: professor.id, profile: professor.profile, similarity: None, matched_by: None }
	}
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchResponse {
	pub trace_id: Uuid,
	pub items: Vec<SearchItem>,
	pub total: u64,
	pub page: u32,
	pub page_size: u32,
	pub total_pages: u64,
	pub mode: SearchMode,
	pub warnings: Vec<String>,
	/// Set whenever the result is degraded or missing.
	pub error: Option<String>,
}
impl SearchResponse {
	fn from_page(
		trace_id: Uuid,
		listing: Page<SearchItem>,
		mode: SearchMode,
		warnings: Vec<String>,
		error: Option<String>,
	) -> Self {
		let total_pages = listing.total_pages();

		Self {
			trace_id,
			items: listing.items,
			total: listing.total,
			page: listing.page,
			page_size: listing.page_size,
			total_pages,
			mode,
			warnings,
			error,
		}
	}

	fn failed(
		trace_id: Uuid,
		page: u32,
		page_size: u32,
		warnings: Vec<String>,
		error: String,
	) -> Self {
		Self {
			trace_id,
			items: Vec::new(),
			total: 0,
			page,
			page_size,
			total_pages: 0,
			mode: SearchMode::Failed,
			warnings,
			error: Some(error),
		}
	}
}

impl SearchService {
	/// Runs one search request. Never fails: every error ends up in the response.
	pub async fn get_results(&self, req: SearchRequest) -> SearchResponse {
		let trace_id = Uuid::new_v4();
		let page = req.page.unwrap_or(1).max(1);
		let page_size = req.page_size.unwrap_or(self.cfg.search.default_page_size);

		match self.search(trace_id, req.query.as_deref(), page, page_size, req.filters).await {
			Ok(response) => response,
			Err(err) => {
				tracing::error!(%trace_id, error = %err, "Search request failed.");

				SearchResponse::failed(trace_id, page, page_size, Vec::new(), err.to_string())
			},
		}
	}

	async fn search(
		&self,
		trace_id: Uuid,
		query: Option<&str>,
		page: u32,
		page_size: u32,
		filters: ProfessorFilters,
	) -> Result<SearchResponse> {
		self.check_page_size(page_size)?;

		let filters = filters.normalized();
		let min_chars = usize::try_from(self.cfg.search.min_query_chars).unwrap_or(usize::MAX);

		match gate::route(query, min_chars) {
			QueryRoute::Browse => {
				let listing = self.browse(page, page_size, &filters).await?;

				tracing::info!(%trace_id, total = listing.total, page, "Browse listing served.");

				Ok(SearchResponse::from_page(
					trace_id,
					listing.map(SearchItem::from),
					SearchMode::Browse,
					Vec::new(),
					None,
				))
			},
			QueryRoute::Ranked(query) => self.ranked(trace_id, query, page, page_size, &filters).await,
		}
	}

	async fn ranked(
		&self,
		trace_id: Uuid,
		query: &str,
		page: u32,
		page_size: u32,
		filters: &ProfessorFilters,
	) -> Result<SearchResponse> {
		let (lexical, semantic) =
			tokio::join!(self.lexical_leg(query, filters), self.semantic_leg(query, filters));
		let lexical = match lexical {
			Ok(rows) =>
				Ok(candidate::validate_lexical(rows, self.cfg.ranking.lexical_absent_similarity)?),
			Err(err) => Err(err),
		};
		let semantic = match semantic {
			Ok(rows) => Ok(candidate::validate_semantic(rows)?),
			Err(err) => Err(err),
		};
		let mut warnings = Vec::new();
		let (mode, lexical, semantic) = match (lexical, semantic) {
			(Ok(lexical), Ok(semantic)) => (SearchMode::Hybrid, lexical, semantic),
			(Ok(lexical), Err(err)) => {
				tracing::warn!(
					%trace_id,
					error = %err,
					"Semantic leg failed. Serving lexical matches."
				);

				warnings.push(err.to_string());

				(SearchMode::LexicalOnly, lexical, Vec::new())
			},
			(Err(err), Ok(semantic)) => {
				tracing::warn!(
					%trace_id,
					error = %err,
					"Lexical leg failed. Serving semantic matches."
				);

				warnings.push(err.to_string());

				(SearchMode::SemanticOnly, Vec::new(), semantic)
			},
			(Err(lexical_err), Err(semantic_err)) => {
				tracing::error!(
					%trace_id,
					lexical_error = %lexical_err,
					semantic_error = %semantic_err,
					"Both matchers failed."
				);

				warnings.push(lexical_err.to_string());
				warnings.push(semantic_err.to_string());

				return Ok(SearchResponse::failed(
					trace_id,
					page,
					page_size,
					warnings,
					ALL_FAILED_MESSAGE.to_string(),
				));
			},
		};
		let lexical_count = lexical.len();
		let semantic_count = semantic.len();
		let merged = merge::merge(lexical, semantic);
		let listing = page::paginate(merged, page, page_size);
		let (first, last) = listing.shown_range();

		tracing::info!(
			%trace_id,
			mode = mode.as_str(),
			lexical_count,
			semantic_count,
			total = listing.total,
			first,
			last,
			"Ranked search served."
		);

		let error = match mode {
			SearchMode::LexicalOnly => Some(LEXICAL_ONLY_MESSAGE.to_string()),
			SearchMode::SemanticOnly => Some(SEMANTIC_ONLY_MESSAGE.to_string()),
			_ => None,
		};

		Ok(SearchResponse::from_page(trace_id, listing.map(SearchItem::from), mode, warnings, error))
	}

	async fn lexical_leg(
		&self,
		query: &str,
		filters: &ProfessorFilters,
	) -> Result<Vec<RawCandidate<ProfessorProfile>>> {
		let call = self.catalog.search_exact(query, self.cfg.search.lexical.max_results, filters);

		within(MatchSource::Lexical, self.matcher_timeout(), call).await
	}

	async fn semantic_leg(
		&self,
		query: &str,
		filters: &ProfessorFilters,
	) -> Result<Vec<RawCandidate<ProfessorProfile>>> {
		let embedding = self.embed_query(query).await?;
		let semantic = &self.cfg.search.semantic;
		let call = self.catalog.search_embeddings(
			&embedding,
			semantic.match_threshold,
			semantic.max_results,
			filters,
		);

		within(MatchSource::Semantic, self.matcher_timeout(), call).await
	}

	async fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
		let cfg = &self.cfg.providers.embedding;
		let texts = [gate::embedding_input(query)];
		let call = self.embedding.embed(cfg, &texts);
		let vectors = match time::timeout(Duration::from_millis(cfg.timeout_ms), call).await {
			Err(_) =>
				return Err(Error::EmbeddingFailure {
					message: "Embedding request timed out.".to_string(),
				}),
			Ok(Err(err @ Error::EmbeddingFailure { .. })) => return Err(err),
			Ok(Err(err)) => return Err(Error::EmbeddingFailure { message: err.to_string() }),
			Ok(Ok(vectors)) => vectors,
		};
		let Some(vector) = vectors.into_iter().next() else {
			return Err(Error::EmbeddingFailure {
				message: "Embedding provider returned no vectors.".to_string(),
			});
		};

		if vector.len() != cfg.dimensions as usize {
			return Err(Error::EmbeddingFailure {
				message: format!(
					"Embedding has {} dimensions, expected {}.",
					vector.len(),
					cfg.dimensions
				),
			});
		}

		Ok(vector)
	}

	fn check_page_size(&self, page_size: u32) -> Result<()> {
		let max = self.cfg.search.max_page_size;

		if page_size == 0 || page_size > max {
			return Err(Error::InvalidRequest {
				message: format!("page_size must be in the range 1-{max}."),
			});
		}

		Ok(())
	}

	pub(crate) fn matcher_timeout(&self) -> Duration {
		Duration::from_millis(self.cfg.search.matcher_timeout_ms)
	}
}

async fn within<T>(
	matcher: MatchSource,
	limit: Duration,
	call: impl Future<Output = Result<T>>,
) -> Result<T> {
	match time::timeout(limit, call).await {
		Err(_) => Err(Error::UpstreamTimeout { matcher }),
		Ok(Err(err)) => Err(Error::UpstreamUnavailable { matcher, message: err.to_string() }),
		Ok(Ok(value)) => Ok(value),
	}
}
