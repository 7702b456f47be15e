mod error;
mod types;

pub use error::{Error, Result};
pub use types::{
	Config, EmbeddingFormat, EmbeddingProviderConfig, Postgres, Providers, Ranking, Search,
	SearchLexical, SearchSemantic, Security, Service, Storage,
};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}

	let embedding = &cfg.providers.embedding;

	if embedding.dimensions == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must be greater than zero.".to_string(),
		});
	}
	if embedding.dimensions != cfg.storage.postgres.vector_dim {
		return Err(Error::Validation {
			message: "providers.embedding.dimensions must match storage.postgres.vector_dim."
				.to_string(),
		});
	}
	if embedding.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.embedding.api_key must be non-empty.".to_string(),
		});
	}
	if embedding.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.embedding.timeout_ms must be greater than zero.".to_string(),
		});
	}

	for (key, value) in &embedding.default_headers {
		if !value.is_string() {
			return Err(Error::Validation {
				message: format!("providers.embedding.default_headers.{key} must be a string."),
			});
		}
	}

	let search = &cfg.search;

	if search.min_query_chars == 0 {
		return Err(Error::Validation {
			message: "search.min_query_chars must be greater than zero.".to_string(),
		});
	}
	if search.max_page_size == 0 {
		return Err(Error::Validation {
			message: "search.max_page_size must be greater than zero.".to_string(),
		});
	}
	if search.default_page_size == 0 || search.default_page_size > search.max_page_size {
		return Err(Error::Validation {
			message: "search.default_page_size must be in the range 1-search.max_page_size."
				.to_string(),
		});
	}
	if search.matcher_timeout_ms == 0 {
		return Err(Error::Validation {
			message: "search.matcher_timeout_ms must be greater than zero.".to_string(),
		});
	}
	if search.lexical.max_results == 0 {
		return Err(Error::Validation {
			message: "search.lexical.max_results must be greater than zero.".to_string(),
		});
	}
	if search.semantic.max_results == 0 {
		return Err(Error::Validation {
			message: "search.semantic.max_results must be greater than zero.".to_string(),
		});
	}
	if !search.semantic.match_threshold.is_finite() {
		return Err(Error::Validation {
			message: "search.semantic.match_threshold must be a finite number.".to_string(),
		});
	}
	if !(-1.0..=1.0).contains(&search.semantic.match_threshold) {
		return Err(Error::Validation {
			message: "search.semantic.match_threshold must be in the range -1.0-1.0.".to_string(),
		});
	}
	if !cfg.ranking.lexical_absent_similarity.is_finite() {
		return Err(Error::Validation {
			message: "ranking.lexical_absent_similarity must be a finite number.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg
		.providers
		.embedding
		.input_type
		.as_deref()
		.map(|value| value.trim().is_empty())
		.unwrap_or(false)
	{
		cfg.providers.embedding.input_type = None;
	}

	cfg.service.log_level = cfg.service.log_level.trim().to_string();

	if cfg.service.log_level.is_empty() {
		cfg.service.log_level = "info".to_string();
	}
}
