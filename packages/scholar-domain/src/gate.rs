/// Which path a query takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryRoute<'a> {
	/// Unranked listing ordered by id. Neither matcher is called.
	Browse,
	/// Hybrid lexical and semantic search over the trimmed query.
	Ranked(&'a str),
}

/// Routes absent queries and queries shorter than `min_chars` characters (after trimming) to the
/// browse listing.
pub fn route(query: Option<&str>, min_chars: usize) -> QueryRoute<'_> {
	let Some(query) = query.map(str::trim) else {
		return QueryRoute::Browse;
	};

	if query.chars().count() < min_chars {
		return QueryRoute::Browse;
	}

	QueryRoute::Ranked(query)
}

/// Text sent to the embedding service. Line breaks become spaces.
pub fn embedding_input(query: &str) -> String {
	query.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
