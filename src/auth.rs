/// Source of bearer tokens for OAuth2-protected backends.
///
/// Token management (refresh, credential files) lives outside this crate;
/// the service only asks for the current token per request.
pub trait TokenProvider: Send + Sync {
    /// Current bearer token, or `None` when no token is available and the
    /// request should go out unauthenticated.
    fn bearer_token(&self) -> Option<String>;
}

/// Fixed token, mainly for tests and one-off tooling.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        StaticToken(token.into())
    }
}

impl TokenProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}
