use std::fmt;

/// Which matcher produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
	Lexical,
	Semantic,
}
impl MatchSource {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Lexical => "lexical",
			Self::Semantic => "semantic",
		}
	}
}
impl fmt::Display for MatchSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A matcher row before validation. Nothing about it is trusted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCandidate<P> {
	pub id: Option<i64>,
	pub similarity: Option<f64>,
	pub payload: P,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<P> {
	pub id: i64,
	pub similarity: f64,
	pub source: MatchSource,
	pub payload: P,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
	#[error("The {origin} candidate at position {position} has no id.")]
	MissingId { origin: MatchSource, position: usize },
	#[error("The {origin} candidate {id} has no similarity score.")]
	MissingSimilarity { origin: MatchSource, id: i64 },
	#[error("The {origin} candidate {id} has a non-finite similarity score.")]
	NonFiniteSimilarity { origin: MatchSource, id: i64 },
}

/// Validates lexical rows. Rows without a score get `absent_similarity` so exact matches are
/// never starved by semantic scores on a different scale.
pub fn validate_lexical<P>(
	raw: Vec<RawCandidate<P>>,
	absent_similarity: f64,
) -> Result<Vec<Candidate<P>>, ValidationError> {
	validate(raw, MatchSource::Lexical, Some(absent_similarity))
}

/// Validates semantic rows. A semantic row without a cosine score is malformed.
pub fn validate_semantic<P>(
	raw: Vec<RawCandidate<P>>,
) -> Result<Vec<Candidate<P>>, ValidationError> {
	validate(raw, MatchSource::Semantic, None)
}

fn validate<P>(
	raw: Vec<RawCandidate<P>>,
	origin: MatchSource,
	absent_similarity: Option<f64>,
) -> Result<Vec<Candidate<P>>, ValidationError> {
	let mut out = Vec::with_capacity(raw.len());

	for (position, row) in raw.into_iter().enumerate() {
		let Some(id) = row.id else {
			return Err(ValidationError::MissingId { origin, position });
		};
		let similarity = match (row.similarity, absent_similarity) {
			(Some(value), _) => value,
			(None, Some(fallback)) => fallback,
			(None, None) => return Err(ValidationError::MissingSimilarity { origin, id }),
		};

		if !similarity.is_finite() {
			return Err(ValidationError::NonFiniteSimilarity { origin, id });
		}

		out.push(Candidate { id, similarity, source: origin, payload: row.payload });
	}

	Ok(out)
}
