//! Hybrid merge of lexical and semantic candidate lists.
//!
//! Every id survives exactly once. When an id shows up more than once, in either list or
//! across both, the record with the higher similarity is kept; on an exact tie the record
//! visited first stays, and lexical records are visited before semantic ones. The survivors
//! are ordered by [`cmp_rank`].

use std::{
	cmp::Ordering,
	collections::{HashMap, hash_map::Entry},
};

use crate::candidate::Candidate;

/// Merges both lists into one deduplicated, ranked sequence.
pub fn merge<P>(lexical: Vec<Candidate<P>>, semantic: Vec<Candidate<P>>) -> Vec<Candidate<P>> {
	let mut by_id: HashMap<i64, Candidate<P>> =
		HashMap::with_capacity(lexical.len() + semantic.len());

	for candidate in lexical.into_iter().chain(semantic) {
		match by_id.entry(candidate.id) {
			Entry::Occupied(mut slot) =>
				if outranks(&candidate, slot.get()) {
					slot.insert(candidate);
				},
			Entry::Vacant(slot) => {
				slot.insert(candidate);
			},
		}
	}

	let mut merged: Vec<Candidate<P>> = by_id.into_values().collect();

	merged.sort_by(cmp_rank);

	merged
}

/// Final ordering: similarity descending, then id ascending.
pub fn cmp_rank<P>(a: &Candidate<P>, b: &Candidate<P>) -> Ordering {
	cmp_f64_desc(a.similarity, b.similarity).then_with(|| a.id.cmp(&b.id))
}

pub fn cmp_f64_desc(a: f64, b: f64) -> Ordering {
	match (a.is_nan(), b.is_nan()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Greater,
		(false, true) => Ordering::Less,
		(false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
	}
}

fn outranks<P>(challenger: &Candidate<P>, incumbent: &Candidate<P>) -> bool {
	cmp_f64_desc(challenger.similarity, incumbent.similarity) == Ordering::Less
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::candidate::MatchSource;

	fn candidate(id: i64, similarity: f64, source: MatchSource) -> Candidate<&'static str> {
		Candidate { id, similarity, source, payload: "" }
	}

	#[test]
	fn exact_tie_keeps_the_lexical_record() {
		let merged = merge(
			vec![candidate(3, 0.7, MatchSource::Lexical)],
			vec![candidate(3, 0.7, MatchSource::Semantic)],
		);

		assert_eq!(merged.len(), 1);
		assert_eq!(merged[0].source, MatchSource::Lexical);
	}

	#[test]
	fn nan_sorts_last() {
		assert_eq!(cmp_f64_desc(f64::NAN, 0.1), Ordering::Greater);
		assert_eq!(cmp_f64_desc(0.9, 0.1), Ordering::Less);
	}
}
