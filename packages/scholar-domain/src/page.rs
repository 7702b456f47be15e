/// One slice of a ranked list plus the counts needed to render page controls.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Page<T> {
	pub items: Vec<T>,
	pub total: u64,
	pub page: u32,
	pub page_size: u32,
}
impl<T> Page<T> {
	pub fn empty(page: u32, page_size: u32) -> Self {
		Self { items: Vec::new(), total: 0, page: page.max(1), page_size: page_size.max(1) }
	}

	pub fn total_pages(&self) -> u64 {
		total_pages(self.total, self.page_size)
	}

	/// 1-based positions of the first and last item on this page, `(0, 0)` when it is empty.
	pub fn shown_range(&self) -> (u64, u64) {
		if self.items.is_empty() {
			return (0, 0);
		}

		let first = page_offset(self.page, self.page_size).saturating_add(1);
		let last = first.saturating_add(self.items.len() as u64 - 1);

		(first, last)
	}

	pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
		Page {
			items: self.items.into_iter().map(f).collect(),
			total: self.total,
			page: self.page,
			page_size: self.page_size,
		}
	}
}

/// Slices `list` into page `page` of `page_size` items.
///
/// `page` and `page_size` below 1 are treated as 1. Pages past the end are empty but still carry
/// the full `total`.
pub fn paginate<T>(list: Vec<T>, page: u32, page_size: u32) -> Page<T> {
	let page = page.max(1);
	let page_size = page_size.max(1);
	let total = list.len() as u64;
	let offset = page_offset(page, page_size);
	let items = if offset >= total {
		Vec::new()
	} else {
		list.into_iter().skip(offset as usize).take(page_size as usize).collect()
	};

	Page { items, total, page, page_size }
}

/// `ceil(total / page_size)`; zero when `page_size` is zero.
pub fn total_pages(total: u64, page_size: u32) -> u64 {
	if page_size == 0 {
		return 0;
	}

	total.div_ceil(u64::from(page_size))
}

/// Clamps `page` into `[1, max(1, total_pages)]`.
pub fn clamp_page(page: u32, total: u64, page_size: u32) -> u32 {
	let last = total_pages(total, page_size).max(1);
	let last = u32::try_from(last).unwrap_or(u32::MAX);

	page.clamp(1, last)
}

/// Number of items before `page`.
pub fn page_offset(page: u32, page_size: u32) -> u64 {
	u64::from(page.saturating_sub(1)).saturating_mul(u64::from(page_size))
}
