pub mod custom_date_serde;
pub mod lenient;
pub mod lenient_number;
