//! Per-route verb handler table.

use axum::http::Method;
use axum::response::Response;
use futures_util::future::BoxFuture;

use crate::context::RequestContext;
use crate::dispatch::handler::{Handler, HandlerMeta};

/// The uniform shape every handler is reduced to at registration time.
type BoxedHandler = Box<dyn Fn(RequestContext) -> BoxFuture<'static, Response> + Send + Sync>;

/// One registered verb handler: the wrapped closure plus its metadata.
pub(crate) struct Slot {
    pub(crate) run: BoxedHandler,
    pub(crate) meta: HandlerMeta,
}

impl Slot {
    fn wrap<H, Args>(handler: H) -> Self
    where
        H: Handler<Args>,
    {
        Slot {
            run: Box::new(move |ctx| handler.clone().call(ctx)),
            meta: H::meta(),
        }
    }
}

/// Up to four verb handlers for one path, each independently optional.
///
/// An endpoint with no handlers at all cannot be registered; the route
/// table rejects it.
#[derive(Default)]
pub struct Endpoint {
    get: Option<Slot>,
    post: Option<Slot>,
    put: Option<Slot>,
    delete: Option<Slot>,
}

impl Endpoint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<H, Args>(mut self, handler: H) -> Self
    where
        H: Handler<Args>,
    {
        self.get = Some(Slot::wrap(handler));
        self
    }

    pub fn post<H, Args>(mut self, handler: H) -> Self
    where
        H: Handler<Args>,
    {
        self.post = Some(Slot::wrap(handler));
        self
    }

    pub fn put<H, Args>(mut self, handler: H) -> Self
    where
        H: Handler<Args>,
    {
        self.put = Some(Slot::wrap(handler));
        self
    }

    pub fn delete<H, Args>(mut self, handler: H) -> Self
    where
        H: Handler<Args>,
    {
        self.delete = Some(Slot::wrap(handler));
        self
    }

    /// The slot registered for an incoming verb, if any.
    pub(crate) fn slot(&self, method: &Method) -> Option<&Slot> {
        if *method == Method::GET {
            self.get.as_ref()
        } else if *method == Method::POST {
            self.post.as_ref()
        } else if *method == Method::PUT {
            self.put.as_ref()
        } else if *method == Method::DELETE {
            self.delete.as_ref()
        } else {
            None
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.get.is_none() && self.post.is_none() && self.put.is_none() && self.delete.is_none()
    }

    /// Registered verbs with their handler metadata, in verb order.
    pub(crate) fn verb_metas(&self) -> Vec<(Method, &HandlerMeta)> {
        [
            (Method::GET, &self.get),
            (Method::POST, &self.post),
            (Method::PUT, &self.put),
            (Method::DELETE, &self.delete),
        ]
        .into_iter()
        .filter_map(|(verb, slot)| slot.as_ref().map(|s| (verb, &s.meta)))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn noop() -> Result<(), String> {
        Ok(())
    }

    #[test]
    fn test_empty_endpoint() {
        assert!(Endpoint::new().is_empty());
        assert!(!Endpoint::new().get(noop).is_empty());
    }

    #[test]
    fn test_slot_lookup_by_verb() {
        let endpoint = Endpoint::new().get(noop).delete(noop);
        assert!(endpoint.slot(&Method::GET).is_some());
        assert!(endpoint.slot(&Method::DELETE).is_some());
        assert!(endpoint.slot(&Method::POST).is_none());
        assert!(endpoint.slot(&Method::PATCH).is_none());
    }

    #[test]
    fn test_verb_metas_lists_registered_verbs() {
        let endpoint = Endpoint::new().get(noop).post(noop);
        let verbs: Vec<Method> = endpoint.verb_metas().into_iter().map(|(v, _)| v).collect();
        assert_eq!(verbs, vec![Method::GET, Method::POST]);
    }
}
