//! Structurally decoded and validated input.

use std::ops::{Deref, DerefMut};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::context::RequestContext;
use crate::decode::decode;
use crate::error::BindResult;
use crate::extract::FromRequest;
use crate::validate::Validate;

/// The decode-and-validate binding for a handler's input shape.
///
/// `T` is populated from the body and query string (query overrides body),
/// then checked against its declared field rules. Either step failing aborts
/// the dispatch with a client error.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Input<T>(pub T);

impl<T> Input<T> {
    /// Consume the binding, yielding the decoded value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Input<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Input<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

#[async_trait]
impl<T> FromRequest for Input<T>
where
    T: Default + Serialize + DeserializeOwned + Validate + Send,
{
    async fn from_request(ctx: &mut RequestContext) -> BindResult<Self> {
        let value: T = decode(ctx).await?;
        value.validate()?;
        Ok(Input(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BinderConfig;
    use crate::validate::{rule, ValidationError};
    use axum::body::Body;
    use axum::http::{Method, Request};
    use serde::Deserialize;

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct CreateThing {
        #[serde(rename = "Name")]
        name: String,
    }

    impl Validate for CreateThing {
        fn validate(&self) -> Result<(), ValidationError> {
            rule::required("Name", &self.name)?;
            Ok(())
        }
    }

    async fn bind(body: &'static str) -> BindResult<Input<CreateThing>> {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/things")
            .body(Body::from(body))
            .unwrap();
        let mut ctx =
            RequestContext::from_request(request, &BinderConfig::default(), uuid::Uuid::new_v4())
                .await
                .unwrap();
        Input::from_request(&mut ctx).await
    }

    #[tokio::test]
    async fn test_valid_input_binds() {
        let input = bind(r#"{"Name":"x"}"#).await.unwrap();
        assert_eq!(input.name, "x");
    }

    #[tokio::test]
    async fn test_missing_required_field_fails_validation() {
        let err = bind(r#"{}"#).await.unwrap_err();
        assert!(err.to_string().contains("'Name'"));
    }
}
