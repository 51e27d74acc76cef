//! Validating extractor.
//!
//! `Valid<E>` runs the inner extractor, then the `validator` rules of the
//! extracted value. Either failure ends the request with a 400.

use std::ops::Deref;

use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures::future::LocalBoxFuture;
use validator::{Validate, ValidationErrors};

use super::error::AppError;

/// Wraps `web::Json`, `web::Path` or `web::Query` of a `Validate` type.
#[derive(Debug)]
pub struct Valid<E>(pub E);

impl<E> FromRequest for Valid<E>
where
    E: FromRequest + Deref + 'static,
    E::Target: Validate,
    E::Future: 'static,
{
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let extract = E::from_request(req, payload);

        Box::pin(async move {
            let inner = extract.await.map_err(|e| {
                let err: actix_web::Error = e.into();
                AppError::BadRequest(err.to_string())
            })?;

            inner.validate().map_err(|errors| {
                let msg = describe(&errors);
                tracing::debug!(error = %msg, "request rejected by validation");
                AppError::BadRequest(msg)
            })?;

            Ok(Valid(inner))
        })
    }
}

/// Flatten field errors into one line, ordered by field name.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}
