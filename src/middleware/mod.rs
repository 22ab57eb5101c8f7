pub mod auth;
pub mod response;
pub mod validate_query;

pub use auth::{optional_auth, require_auth, AuthUser};
pub use response::ApiResponse;
pub use validate_query::validate_listing_query;
