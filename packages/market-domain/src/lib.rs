pub mod paging;
pub mod sort;
pub mod status;
pub mod text;

pub use paging::{Page, PageError};
pub use sort::{SortBy, SortOrder};
pub use status::{SubmissionStatus, UnknownStatus};
