// ABOUTME: Bearer-token injection for control-plane requests
// ABOUTME: Calls a token supplier on every RPC so refreshed credentials are picked up

use std::sync::Arc;

use tonic::service::Interceptor;

/// Zero-argument function returning the current bearer token.
///
/// An empty string means "not authenticated"; no header is sent and the
/// server answers with `Unauthenticated`.
pub type TokenSupplier = Arc<dyn Fn() -> String + Send + Sync>;

/// Supplier that always returns the same token.
pub fn static_token(token: impl Into<String>) -> TokenSupplier {
    let token = token.into();
    Arc::new(move || token.clone())
}

/// Interceptor that adds `authorization: Bearer <token>` to each request.
#[derive(Clone)]
pub struct TokenInterceptor {
    supplier: TokenSupplier,
}

impl TokenInterceptor {
    pub fn new(supplier: TokenSupplier) -> Self {
        Self { supplier }
    }
}

impl Interceptor for TokenInterceptor {
    fn call(&mut self, mut req: tonic::Request<()>) -> Result<tonic::Request<()>, tonic::Status> {
        let token = (self.supplier)();
        let token = token.trim();
        if !token.is_empty() {
            let value = format!("Bearer {}", token)
                .parse()
                .map_err(|_| tonic::Status::internal("invalid token format"))?;
            req.metadata_mut().insert("authorization", value);
        }
        Ok(req)
    }
}
