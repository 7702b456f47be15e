use std::sync::{
	Arc,
	atomic::{AtomicU64, Ordering},
};

use crate::{SearchRequest, SearchResponse, SearchService};

/// Orders the searches of one client so that only the most recent query's results are shown.
///
/// Each call takes a ticket before it starts. A search that finishes after a newer one was
/// started is discarded. Dropping the returned future cancels its in-flight matcher calls.
pub struct SearchSession {
	service: Arc<SearchService>,
	latest: AtomicU64,
}
impl SearchSession {
	pub fn new(service: Arc<SearchService>) -> Self {
		Self { service, latest: AtomicU64::new(0) }
	}

	/// Returns `None` when a newer search was started before this one finished.
	pub async fn search_latest(&self, req: SearchRequest) -> Option<SearchResponse> {
		let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
		let response = self.service.get_results(req).await;

		if !self.is_latest(ticket) {
			tracing::debug!(ticket, trace_id = %response.trace_id, "Discarding stale search results.");

			return None;
		}

		Some(response)
	}

	pub fn is_latest(&self, ticket: u64) -> bool {
		self.latest.load(Ordering::SeqCst) == ticket
	}
}
