use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub search: Search,
	#[serde(default)]
	pub ranking: Ranking,
	#[serde(default)]
	pub security: Security,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
	/// Dimension of `professors.embedding`. Must equal `providers.embedding.dimensions`.
	pub vector_dim: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Providers {
	pub embedding: EmbeddingProviderConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingFormat {
	/// `{ model, input, dimensions }` answered by `data[].embedding`.
	Openai,
	/// `{ model, texts, input_type, embedding_types }` answered by `embeddings`.
	Cohere,
}
impl EmbeddingFormat {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Openai => "openai",
			Self::Cohere => "cohere",
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmbeddingProviderConfig {
	pub provider_id: String,
	#[serde(default = "default_embedding_format")]
	pub format: EmbeddingFormat,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub dimensions: u32,
	/// Cohere only. Ignored by the `openai` format.
	#[serde(default)]
	pub input_type: Option<String>,
	pub timeout_ms: u64,
	#[serde(default)]
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Search {
	pub min_query_chars: u32,
	pub default_page_size: u32,
	pub max_page_size: u32,
	pub matcher_timeout_ms: u64,
	pub lexical: SearchLexical,
	pub semantic: SearchSemantic,
}
impl Default for Search {
	fn default() -> Self {
		Self {
			min_query_chars: 3,
			default_page_size: 20,
			max_page_size: 100,
			matcher_timeout_ms: 5_000,
			lexical: SearchLexical::default(),
			semantic: SearchSemantic::default(),
		}
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchLexical {
	pub max_results: u32,
}
impl Default for SearchLexical {
	fn default() -> Self {
		Self { max_results: 250 }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSemantic {
	pub match_threshold: f32,
	pub max_results: u32,
}
impl Default for SearchSemantic {
	fn default() -> Self {
		Self { match_threshold: 0.38, max_results: 250 }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Ranking {
	/// Similarity assigned to lexical matches that come back without a score.
	pub lexical_absent_similarity: f64,
}
impl Default for Ranking {
	fn default() -> Self {
		Self { lexical_absent_similarity: 1.0 }
	}
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Security {
	pub bind_localhost_only: bool,
}
impl Default for Security {
	fn default() -> Self {
		Self { bind_localhost_only: true }
	}
}

fn default_embedding_format() -> EmbeddingFormat {
	EmbeddingFormat::Openai
}
