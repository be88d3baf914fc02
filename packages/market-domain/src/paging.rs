/// A validated, 1-indexed page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
	page: u32,
	page_size: u32,
}
impl Page {
	pub fn new(page: u32, page_size: u32, max_page_size: u32) -> Result<Self, PageError> {
		if page == 0 {
			return Err(PageError::PageOutOfRange);
		}
		if page_size == 0 || page_size > max_page_size {
			return Err(PageError::PageSizeOutOfRange { max: max_page_size });
		}

		Ok(Self { page, page_size })
	}

	pub fn page(&self) -> u32 {
		self.page
	}

	pub fn page_size(&self) -> u32 {
		self.page_size
	}

	pub fn limit(&self) -> i64 {
		i64::from(self.page_size)
	}

	pub fn offset(&self) -> i64 {
		(i64::from(self.page) - 1) * i64::from(self.page_size)
	}

	pub fn total_pages(&self, total_count: i64) -> i64 {
		if total_count <= 0 {
			return 0;
		}

		let size = i64::from(self.page_size);

		(total_count + size - 1) / size
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageError {
	#[error("page must be 1 or greater.")]
	PageOutOfRange,
	#[error("page_size must be between 1 and {max}.")]
	PageSizeOutOfRange { max: u32 },
}
