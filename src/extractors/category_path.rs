use crate::errors::api_error::ApiError;
use crate::store::Category;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
    RequestPartsExt,
};

/// `{category}` path segment parsed into a [`Category`].
pub struct CategoryPath(pub Category);

impl<S> FromRequestParts<S> for CategoryPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = parts
            .extract::<Path<String>>()
            .await
            .map_err(|err| ApiError::InvalidQuery(err.body_text()))?;

        Ok(CategoryPath(raw.parse::<Category>()?))
    }
}
