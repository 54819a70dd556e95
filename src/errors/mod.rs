pub mod api_error;
pub mod fetch_error;
pub mod store_error;
