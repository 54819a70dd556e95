use thiserror::Error;

use crate::store::Category;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("payload for `{payload}` cannot complete a `{ticket}` request")]
    CategoryMismatch { ticket: Category, payload: Category },
}
