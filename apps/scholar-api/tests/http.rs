use std::sync::Arc;

use axum::{
	body::{self, Body},
	http::{Request, StatusCode, header::CONTENT_TYPE},
};
use serde_json::{Map, Value};
use tower::util::ServiceExt;

use scholar_api::{routes, state::AppState};
use scholar_config::{
	Config, EmbeddingFormat, EmbeddingProviderConfig, Postgres, Providers, Ranking, Search,
	Security, Service, Storage,
};
use scholar_domain::{ProfessorFilters, RawCandidate};
use scholar_service::{
	BoxFuture, Catalog, EmbeddingProvider, Error, Professor, ProfessorProfile, Result,
	SearchService,
};
use scholar_testkit::TestDatabase;

const DIM: u32 = 3;

struct FixedCatalog {
	semantic_fails: bool,
}
impl Catalog for FixedCatalog {
	fn search_exact<'a>(
		&'a self,
		_term: &'a str,
		_max_results: u32,
		_filters: &'a ProfessorFilters,
	) -> BoxFuture<'a, Result<Vec<RawCandidate<ProfessorProfile>>>> {
		Box::pin(async move {
			Ok(vec![RawCandidate {
				id: Some(7),
				similarity: None,
				payload: ProfessorProfile {
					name: Some("Ada Policy".to_string()),
					research_interests: vec!["AI policy".to_string()],
					..Default::default()
				},
			}])
		})
	}

	fn search_embeddings<'a>(
		&'a self,
		_embedding: &'a [f32],
		_match_threshold: f32,
		_max_results: u32,
		_filters: &'a ProfessorFilters,
	) -> BoxFuture<'a, Result<Vec<RawCandidate<ProfessorProfile>>>> {
		let fails = self.semantic_fails;

		Box::pin(async move {
			if fails {
				return Err(Error::Storage { message: "pool timed out".to_string() });
			}

			Ok(vec![RawCandidate {
				id: Some(3),
				similarity: Some(0.52),
				payload: ProfessorProfile {
					name: Some("Grace Graphs".to_string()),
					..Default::default()
				},
			}])
		})
	}

	fn browse<'a>(
		&'a self,
		_offset: u64,
		_limit: u32,
		_filters: &'a ProfessorFilters,
	) -> BoxFuture<'a, Result<(Vec<Professor>, u64)>> {
		Box::pin(async move {
			Ok((vec![Professor { id: 1, profile: ProfessorProfile::default() }], 1))
		})
	}
}

struct FixedEmbedding;
impl EmbeddingProvider for FixedEmbedding {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, Result<Vec<Vec<f32>>>> {
		let dim = cfg.dimensions as usize;

		Box::pin(async move { Ok(vec![vec![0.1; dim]; texts.len()]) })
	}
}

fn test_config(dsn: String) -> Config {
	Config {
		service: Service { http_bind: "127.0.0.1:0".to_string(), log_level: "info".to_string() },
		storage: Storage { postgres: Postgres { dsn, pool_max_conns: 1, vector_dim: DIM } },
		providers: Providers {
			embedding: EmbeddingProviderConfig {
				provider_id: "test".to_string(),
				format: EmbeddingFormat::Openai,
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: "test-key".to_string(),
				path: "/".to_string(),
				model: "test".to_string(),
				dimensions: DIM,
				input_type: None,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
		},
		search: Search::default(),
		ranking: Ranking::default(),
		security: Security::default(),
	}
}

fn stub_app(semantic_fails: bool) -> axum::Router {
	let service = SearchService::with_providers(
		test_config("postgres://localhost/unused".to_string()),
		Arc::new(FixedCatalog { semantic_fails }),
		Arc::new(FixedEmbedding),
	);

	routes::router(AppState::from_service(service))
}

fn search_request(payload: Value) -> Request<Body> {
	Request::builder()
		.method("POST")
		.uri("/v1/professors/search")
		.header(CONTENT_TYPE, "application/json")
		.body(Body::from(payload.to_string()))
		.expect("Failed to build request.")
}

async fn json_body(response: axum::response::Response) -> Value {
	let bytes =
		body::to_bytes(response.into_body(), usize::MAX).await.expect("Failed to read body.");

	serde_json::from_slice(&bytes).expect("Response body is not JSON.")
}

#[tokio::test]
async fn health_ok() {
	let response = stub_app(false)
		.oneshot(
			Request::builder().uri("/health").body(Body::empty()).expect("Failed to build request."),
		)
		.await
		.expect("Failed to call /health.");

	assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn hybrid_search_returns_ranked_items() {
	let response = stub_app(false)
		.oneshot(search_request(serde_json::json!({ "query": "ai policy" })))
		.await
		.expect("Failed to call search.");

	assert_eq!(response.status(), StatusCode::OK);

	let body = json_body(response).await;

	assert_eq!(body["mode"], "hybrid");
	assert_eq!(body["total"], 2);
	assert_eq!(body["items"][0]["id"], 7);
	assert_eq!(body["items"][0]["name"], "Ada Policy");
	assert_eq!(body["items"][0]["matched_by"], "lexical");
	assert_eq!(body["items"][1]["id"], 3);
	assert_eq!(body["error"], Value::Null);
}

#[tokio::test]
async fn degraded_search_still_answers_ok() {
	let response = stub_app(true)
		.oneshot(search_request(serde_json::json!({ "query": "ai policy", "page": 1 })))
		.await
		.expect("Failed to call search.");

	assert_eq!(response.status(), StatusCode::OK);

	let body = json_body(response).await;

	assert_eq!(body["mode"], "lexical_only");
	assert_eq!(body["items"].as_array().map(Vec::len), Some(1));
	assert!(body["error"].is_string());
}

#[tokio::test]
async fn short_query_returns_browse_listing() {
	let response = stub_app(false)
		.oneshot(search_request(serde_json::json!({
			"query": "ai",
			"filters": { "universities": [] }
		})))
		.await
		.expect("Failed to call search.");
	let body = json_body(response).await;

	assert_eq!(body["mode"], "browse");
	assert_eq!(body["items"][0]["id"], 1);
	assert_eq!(body["items"][0]["similarity"], Value::Null);
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
	let response = stub_app(false)
		.oneshot(
			Request::builder()
				.method("POST")
				.uri("/v1/professors/search")
				.header(CONTENT_TYPE, "application/json")
				.body(Body::from("{\"query\": "))
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call search.");

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let body = json_body(response).await;

	assert_eq!(body["error_code"], "invalid_request");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set SCHOLAR_PG_DSN to run."]
async fn empty_directory_browses_against_postgres() {
	let Some(base_dsn) = scholar_testkit::env_dsn() else {
		eprintln!("Skipping empty_directory_browses_against_postgres; set SCHOLAR_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let state = AppState::new(test_config(test_db.dsn().to_string()))
		.await
		.expect("Failed to initialize app state.");
	let response = routes::router(state)
		.oneshot(search_request(serde_json::json!({})))
		.await
		.expect("Failed to call search.");

	assert_eq!(response.status(), StatusCode::OK);

	let body = json_body(response).await;

	assert_eq!(body["mode"], "browse");
	assert_eq!(body["total"], 0);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
