pub mod category_path;
pub mod query_extractor;
