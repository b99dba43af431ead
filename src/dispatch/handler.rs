//! Handler wrapping.
//!
//! # Responsibilities
//! - Wrap a typed async function into the uniform closure shape the
//!   dispatcher stores: `RequestContext -> Response`
//! - Bind each declared parameter, in declaration order, via its
//!   [`FromRequest`] impl; the first failure aborts with a client error
//! - Interpret the handler's `Result`: `Err` is always the error channel and
//!   maps to a server error carrying the error text
//! - Capture parameter and payload type names for offline introspection
//!
//! # Design Decisions
//! - Binding logic is specialized per handler here, at registration time;
//!   the dispatch hot path never inspects types
//! - Arities 0 through 5 are generated by macro, one impl per tuple shape

use std::fmt::Display;
use std::future::Future;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures_util::future::BoxFuture;

use crate::context::RequestContext;
use crate::extract::FromRequest;
use crate::reply::Reply;

/// Registration-time record of a handler's signature.
#[derive(Debug, Clone)]
pub struct HandlerMeta {
    /// Parameter type names, in declaration order.
    pub params: Vec<&'static str>,
    /// Payload type name of the success channel.
    pub payload: &'static str,
}

/// A typed endpoint handler.
///
/// Implemented for async functions of 0 to 5 parameters, each bound via
/// [`FromRequest`], returning `Result<R, E>` where `R` is the payload and
/// `E` the trailing error channel.
pub trait Handler<Args>: Clone + Send + Sync + Sized + 'static {
    /// Run the fully wrapped pipeline: bind, invoke, encode.
    fn call(self, ctx: RequestContext) -> BoxFuture<'static, Response>;

    /// Signature metadata, captured at registration.
    fn meta() -> HandlerMeta;
}

macro_rules! impl_handler {
    ( $($param:ident),* ) => {
        impl<F, Fut, R, E, $($param,)*> Handler<($($param,)*)> for F
        where
            F: Fn($($param),*) -> Fut + Clone + Send + Sync + 'static,
            Fut: Future<Output = Result<R, E>> + Send + 'static,
            R: Reply + Send + 'static,
            E: Display + Send + 'static,
            $( $param: FromRequest + Send + 'static, )*
        {
            #[allow(unused_variables, unused_mut, non_snake_case)]
            fn call(self, mut ctx: RequestContext) -> BoxFuture<'static, Response> {
                Box::pin(async move {
                    $(
                        let $param = match <$param as FromRequest>::from_request(&mut ctx).await {
                            Ok(value) => value,
                            Err(e) => return e.into_response(),
                        };
                    )*
                    match self($($param),*).await {
                        Ok(payload) => Reply::into_response(payload),
                        Err(e) => {
                            let text = e.to_string();
                            tracing::error!(
                                request_id = %ctx.request_id(),
                                error = %text,
                                "handler returned an error"
                            );
                            (StatusCode::INTERNAL_SERVER_ERROR, text).into_response()
                        }
                    }
                })
            }

            fn meta() -> HandlerMeta {
                HandlerMeta {
                    params: vec![$(std::any::type_name::<$param>()),*],
                    payload: std::any::type_name::<R>(),
                }
            }
        }
    };
}

impl_handler!();
impl_handler!(A1);
impl_handler!(A1, A2);
impl_handler!(A1, A2, A3);
impl_handler!(A1, A2, A3, A4);
impl_handler!(A1, A2, A3, A4, A5);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{Input, RawRequest};
    use crate::reply::Json;
    use crate::validate::Validate;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Ping {
        n: i64,
    }

    impl Validate for Ping {}

    fn meta_of<H: Handler<Args>, Args>(_handler: &H) -> HandlerMeta {
        H::meta()
    }

    #[test]
    fn test_meta_captures_signature() {
        async fn ping(_raw: RawRequest, input: Input<Ping>) -> Result<Json<Ping>, String> {
            Ok(Json(input.into_inner()))
        }

        let meta = meta_of(&ping);
        assert_eq!(meta.params.len(), 2);
        assert!(meta.params[0].contains("RawRequest"));
        assert!(meta.params[1].contains("Input"));
        assert!(meta.payload.contains("Json"));
    }

    #[test]
    fn test_meta_zero_arity() {
        async fn health() -> Result<(), String> {
            Ok(())
        }

        let meta = meta_of(&health);
        assert!(meta.params.is_empty());
        assert_eq!(meta.payload, std::any::type_name::<()>());
    }
}
