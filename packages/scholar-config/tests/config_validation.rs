use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use scholar_config::{Config, EmbeddingFormat};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_toml_with(section: &[&str], key: &str, value: Value) -> String {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let mut table = root.as_table_mut().expect("Template config must be a table.");

	for name in section {
		table = table
			.get_mut(*name)
			.and_then(Value::as_table_mut)
			.unwrap_or_else(|| panic!("Template config must include [{name}]."));
	}

	table.insert(key.to_string(), value);

	toml::to_string(&root).expect("Failed to render template config.")
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("scholar_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> scholar_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = scholar_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn base_config() -> Config {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse test config.")
}

#[test]
fn template_config_loads() {
	let cfg = load_payload(SAMPLE_CONFIG_TEMPLATE_TOML.to_string())
		.expect("Template config must be valid.");

	assert_eq!(cfg.providers.embedding.format, EmbeddingFormat::Cohere);
	assert_eq!(cfg.search.min_query_chars, 3);
	assert_eq!(cfg.search.semantic.max_results, 250);
	assert_eq!(cfg.storage.postgres.vector_dim, 1_024);
}

#[test]
fn missing_optional_sections_fall_back_to_defaults() {
	let mut root: Value =
		toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.");
	let table = root.as_table_mut().expect("Template config must be a table.");

	table.remove("search");
	table.remove("ranking");
	table.remove("security");

	let cfg = load_payload(toml::to_string(&root).expect("Failed to render config."))
		.expect("Config without optional sections must be valid.");

	assert_eq!(cfg.search.default_page_size, 20);
	assert_eq!(cfg.search.matcher_timeout_ms, 5_000);
	assert!((cfg.search.semantic.match_threshold - 0.38).abs() < f32::EPSILON);
	assert!((cfg.ranking.lexical_absent_similarity - 1.0).abs() < f64::EPSILON);
	assert!(cfg.security.bind_localhost_only);
}

#[test]
fn embedding_dimensions_must_match_vector_dim() {
	let payload =
		sample_toml_with(&["providers", "embedding"], "dimensions", Value::Integer(768));
	let err = load_payload(payload).expect_err("Expected dimension mismatch error.");

	assert!(
		err.to_string()
			.contains("providers.embedding.dimensions must match storage.postgres.vector_dim."),
		"Unexpected error: {err}"
	);
}

#[test]
fn default_page_size_cannot_exceed_max() {
	let payload = sample_toml_with(&["search"], "default_page_size", Value::Integer(500));
	let err = load_payload(payload).expect_err("Expected page size validation error.");

	assert!(
		err.to_string().contains("search.default_page_size must be in the range"),
		"Unexpected error: {err}"
	);
}

#[test]
fn unknown_embedding_format_fails_to_parse() {
	let payload = sample_toml_with(
		&["providers", "embedding"],
		"format",
		Value::String("grpc".to_string()),
	);
	let err = load_payload(payload).expect_err("Expected parse error.");

	assert!(matches!(err, scholar_config::Error::ParseConfig { .. }), "Unexpected error: {err}");
}

#[test]
fn blank_input_type_is_normalized_away() {
	let payload = sample_toml_with(
		&["providers", "embedding"],
		"input_type",
		Value::String("   ".to_string()),
	);
	let cfg = load_payload(payload).expect("Config must be valid.");

	assert!(cfg.providers.embedding.input_type.is_none());
}

#[test]
fn match_threshold_must_be_a_cosine_value() {
	let mut cfg = base_config();

	cfg.search.semantic.match_threshold = 1.5;

	let err = scholar_config::validate(&cfg).expect_err("Expected threshold validation error.");

	assert!(err.to_string().contains("search.semantic.match_threshold must be in the range"));

	cfg.search.semantic.match_threshold = f32::NAN;

	let err = scholar_config::validate(&cfg).expect_err("Expected finite validation error.");

	assert!(err.to_string().contains("must be a finite number"));
}

#[test]
fn header_values_must_be_strings() {
	let mut cfg = base_config();

	cfg.providers.embedding.default_headers.insert("X-Retries".to_string(), 3.into());

	let err = scholar_config::validate(&cfg).expect_err("Expected header validation error.");

	assert_eq!(err.to_string(), "providers.embedding.default_headers.X-Retries must be a string.");
}

#[test]
fn missing_config_file_reports_path() {
	let path = env::temp_dir().join("scholar_config_missing.toml");
	let err = scholar_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, scholar_config::Error::ReadConfig { .. }));
}
