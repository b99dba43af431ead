//! Route registration and mounting.
//!
//! # Responsibilities
//! - Hold the route table while the application registers endpoints
//! - Enforce registration invariants (at least one verb, unique paths)
//! - Record read-only metadata for offline introspection
//! - Mount every route onto the host transport's router
//!
//! # Design Decisions
//! - The table is built once at startup and consumed into an `axum::Router`;
//!   after that it is shared read-only by every in-flight dispatch
//! - Registration failures are typed errors, not panics

use std::sync::Arc;

use axum::extract::Request;
use axum::http::Method;
use axum::routing::any;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::config::BinderConfig;
use crate::dispatch::{self, Endpoint};
use crate::error::RegistrationError;

/// One verb's registration record.
#[derive(Debug, Clone)]
pub struct VerbMeta {
    pub verb: Method,
    /// Parameter type names, in declaration order.
    pub params: Vec<&'static str>,
    /// Payload type name of the success channel.
    pub payload: &'static str,
}

/// Read-only description of a registered route.
///
/// Consumed by documentation or client-type generators after registration;
/// nothing on the dispatch path reads it.
#[derive(Debug, Clone)]
pub struct RouteMeta {
    pub path: String,
    pub verbs: Vec<VerbMeta>,
}

struct RegisteredRoute {
    path: String,
    endpoint: Arc<Endpoint>,
    meta: RouteMeta,
}

/// The registration surface: paths mapped to verb handler tables.
pub struct RouteTable {
    config: Arc<BinderConfig>,
    routes: Vec<RegisteredRoute>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::with_config(BinderConfig::default())
    }

    pub fn with_config(config: BinderConfig) -> Self {
        Self {
            config: Arc::new(config),
            routes: Vec::new(),
        }
    }

    /// Register an endpoint at a path.
    ///
    /// The endpoint must carry at least one verb handler, and the path must
    /// be absolute and not yet taken.
    pub fn register(
        &mut self,
        path: impl Into<String>,
        endpoint: Endpoint,
    ) -> Result<(), RegistrationError> {
        let path = path.into();
        if !path.starts_with('/') {
            return Err(RegistrationError::InvalidPath(path));
        }
        if endpoint.is_empty() {
            return Err(RegistrationError::EmptyEndpoint(path));
        }
        if self.routes.iter().any(|route| route.path == path) {
            return Err(RegistrationError::DuplicatePath(path));
        }

        let meta = RouteMeta {
            path: path.clone(),
            verbs: endpoint
                .verb_metas()
                .into_iter()
                .map(|(verb, meta)| VerbMeta {
                    verb,
                    params: meta.params.clone(),
                    payload: meta.payload,
                })
                .collect(),
        };

        tracing::info!(
            path = %path,
            verbs = ?meta.verbs.iter().map(|v| v.verb.as_str()).collect::<Vec<_>>(),
            "route registered"
        );

        self.routes.push(RegisteredRoute {
            path,
            endpoint: Arc::new(endpoint),
            meta,
        });
        Ok(())
    }

    /// Metadata for every registered route, in registration order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteMeta> {
        self.routes.iter().map(|route| &route.meta)
    }

    /// Consume the table, mounting every route onto an axum router.
    pub fn into_router(self) -> Router {
        let mut router = Router::new();
        for route in self.routes {
            let endpoint = route.endpoint;
            let config = self.config.clone();
            router = router.route(
                &route.path,
                any(move |request: Request| {
                    let endpoint = endpoint.clone();
                    let config = config.clone();
                    async move { dispatch::dispatch(endpoint, config, request).await }
                }),
            );
        }
        router.layer(TraceLayer::new_for_http())
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}
