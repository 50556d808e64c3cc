//! Request extractors that validate their input before a handler runs.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body extractor that also runs [`Validate`] on the decoded value.
///
/// Rejects with 422 when the body does not decode into `T` (missing
/// required field, wrong type, explicit `null` for a non-nullable field)
/// or when a field breaks its constraints. No handler code, and so no
/// storage access, runs for a rejected body.
///
/// ```ignore
/// async fn create(ValidatedJson(input): ValidatedJson<CreateVideo>) -> AppResult<Json<()>> {
///     // input.title is guaranteed to be within bounds here
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
