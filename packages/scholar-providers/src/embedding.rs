use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};
use scholar_config::{EmbeddingFormat, EmbeddingProviderConfig};

const DEFAULT_COHERE_INPUT_TYPE: &str = "search_query";

pub async fn embed(cfg: &EmbeddingProviderConfig, texts: &[String]) -> Result<Vec<Vec<f32>>> {
	if texts.is_empty() {
		return Ok(Vec::new());
	}

	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base.trim_end_matches('/'), cfg.path);
	let body = request_body(cfg, texts);

	tracing::debug!(
		provider_id = %cfg.provider_id,
		format = cfg.format.as_str(),
		texts = texts.len(),
		"Requesting embeddings."
	);

	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let body = res.error_for_status()?.bytes().await?;
	let json: Value = serde_json::from_slice(&body)?;
	let vectors = match cfg.format {
		EmbeddingFormat::Openai => parse_openai_response(json)?,
		EmbeddingFormat::Cohere => parse_cohere_response(json)?,
	};

	if vectors.len() != texts.len() {
		return Err(Error::InvalidResponse {
			message: format!(
				"Embedding provider returned {} vectors for {} inputs.",
				vectors.len(),
				texts.len()
			),
		});
	}

	Ok(vectors)
}

fn request_body(cfg: &EmbeddingProviderConfig, texts: &[String]) -> Value {
	match cfg.format {
		EmbeddingFormat::Openai => serde_json::json!({
			"model": cfg.model,
			"input": texts,
			"dimensions": cfg.dimensions,
		}),
		EmbeddingFormat::Cohere => serde_json::json!({
			"model": cfg.model,
			"texts": texts,
			"input_type": cfg.input_type.as_deref().unwrap_or(DEFAULT_COHERE_INPUT_TYPE),
			"embedding_types": ["float"],
		}),
	}
}

fn parse_openai_response(json: Value) -> Result<Vec<Vec<f32>>> {
	let data = json.get("data").and_then(|v| v.as_array()).ok_or_else(|| {
		Error::InvalidResponse { message: "Embedding response is missing data array.".to_string() }
	})?;
	let mut indexed: Vec<(usize, Vec<f32>)> = Vec::with_capacity(data.len());

	for (fallback_index, item) in data.iter().enumerate() {
		let index = item
			.get("index")
			.and_then(|v| v.as_u64())
			.map(|v| v as usize)
			.unwrap_or(fallback_index);
		let embedding = item.get("embedding").ok_or_else(|| Error::InvalidResponse {
			message: "Embedding item missing embedding array.".to_string(),
		})?;

		indexed.push((index, parse_vector(embedding)?));
	}

	indexed.sort_by_key(|(index, _)| *index);

	Ok(indexed.into_iter().map(|(_, vec)| vec).collect())
}

/// Accepts both `embeddings: [[..]]` and `embeddings: { float: [[..]] }`.
fn parse_cohere_response(json: Value) -> Result<Vec<Vec<f32>>> {
	let embeddings = json.get("embeddings").ok_or_else(|| Error::InvalidResponse {
		message: "Embedding response is missing embeddings.".to_string(),
	})?;
	let rows = embeddings
		.as_array()
		.or_else(|| embeddings.get("float").and_then(|v| v.as_array()))
		.ok_or_else(|| Error::InvalidResponse {
			message: "Embedding response has no float embeddings.".to_string(),
		})?;

	rows.iter().map(parse_vector).collect()
}

fn parse_vector(value: &Value) -> Result<Vec<f32>> {
	let values = value.as_array().ok_or_else(|| Error::InvalidResponse {
		message: "Embedding must be an array.".to_string(),
	})?;
	let mut vec = Vec::with_capacity(values.len());

	for value in values {
		let number = value.as_f64().ok_or_else(|| Error::InvalidResponse {
			message: "Embedding value must be numeric.".to_string(),
		})?;

		vec.push(number as f32);
	}

	Ok(vec)
}
