//! Pure ranking policy for hybrid professor search.
//!
//! Nothing in this crate performs I/O. Matchers hand over raw candidate lists, [`candidate`]
//! validates them, [`merge`] folds both lists into one ranked sequence and [`page`] slices it.

pub mod candidate;
pub mod filters;
pub mod gate;
pub mod merge;
pub mod page;

pub use candidate::{Candidate, MatchSource, RawCandidate, ValidationError};
pub use filters::ProfessorFilters;
pub use gate::QueryRoute;
pub use page::Page;
