use tokio::time;

use crate::{Error, Professor, Result, SearchService};
use scholar_domain::{Page, ProfessorFilters, page};

impl SearchService {
	/// Unranked listing ordered by id, used when the query is absent or too short.
	pub async fn browse(
		&self,
		page: u32,
		page_size: u32,
		filters: &ProfessorFilters,
	) -> Result<Page<Professor>> {
		let page = page.max(1);
		let page_size = page_size.max(1);
		let offset = page::page_offset(page, page_size);
		let call = self.catalog.browse(offset, page_size, filters);
		let (items, total) = match time::timeout(self.matcher_timeout(), call).await {
			Err(_) =>
				return Err(Error::Storage { message: "Browse listing timed out.".to_string() }),
			Ok(result) => result?,
		};

		Ok(Page { items, total, page, page_size })
	}
}
