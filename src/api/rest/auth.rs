//! # Bearer Authentication
//!
//! HS256 JWT verification and the scope check guarding product search.
//!
//! Tokens carry `{sub, scope, exp}` where `scope` is a space-separated list.
//! A missing or unverifiable token is rejected with 401; a valid token
//! lacking the required scope is rejected with 403.

use crate::api::rest::handlers::{ApiError, AppState};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject.
    pub sub: String,
    /// Space-separated granted scopes.
    #[serde(default)]
    pub scope: String,
    /// Expiry, seconds since the epoch.
    pub exp: u64,
}

impl Claims {
    /// Returns true if `scope` is one of the granted scopes.
    #[must_use]
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scope.split_whitespace().any(|granted| granted == scope)
    }
}

/// Authentication failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No bearer token was presented.
    #[error("Full authentication is required to access this resource")]
    MissingToken,

    /// The token could not be verified.
    #[error("Invalid access token: {0}")]
    InvalidToken(String),

    /// The token lacks the required scope.
    #[error("Access denied: scope '{0}' is required")]
    MissingScope(String),
}

/// Verifies access tokens against one shared secret.
#[derive(Clone)]
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
    required_scope: String,
}

impl fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtVerifier")
            .field("required_scope", &self.required_scope)
            .finish_non_exhaustive()
    }
}

impl JwtVerifier {
    /// Creates a verifier for HS256 tokens signed with `secret`.
    #[must_use]
    pub fn new(secret: &str, required_scope: impl Into<String>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            required_scope: required_scope.into(),
        }
    }

    /// Returns the scope tokens must carry.
    #[must_use]
    pub fn required_scope(&self) -> &str {
        &self.required_scope
    }

    /// Verifies the token's signature and expiry.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if verification fails.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    /// Verifies the token and checks the required scope.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if verification fails and
    /// `AuthError::MissingScope` if the scope is not granted.
    pub fn authorize(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.verify(token)?;
        if !claims.has_scope(&self.required_scope) {
            return Err(AuthError::MissingScope(self.required_scope.clone()));
        }
        Ok(claims)
    }
}

/// Middleware rejecting requests without an authorized bearer token.
///
/// On success the verified [`Claims`] are stored in the request extensions.
///
/// # Errors
///
/// Returns 401 or 403 with the error envelope.
pub async fn require_token(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_string();

    let result = match req.headers().typed_get::<Authorization<Bearer>>() {
        Some(Authorization(bearer)) => state.auth.authorize(bearer.token()),
        None => Err(AuthError::MissingToken),
    };

    match result {
        Ok(claims) => {
            tracing::debug!(sub = %claims.sub, "authorized");
            req.extensions_mut().insert(claims);
            Ok(next.run(req).await)
        }
        Err(error) => {
            tracing::debug!(%error, %path, "rejected request");
            Err(ApiError::from_auth(path, &error))
        }
    }
}
