pub mod pagination;
pub mod response;

pub use pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use response::ApiResponse;

pub(crate) use pagination::{deserialize_optional_i64, normalize_page};
