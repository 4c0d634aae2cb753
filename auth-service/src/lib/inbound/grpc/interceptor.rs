use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::Context;
use std::task::Poll;

use auth::TokenCodec;
use http::header::AUTHORIZATION;
use http::HeaderMap;
use tonic::body::BoxBody;
use tonic::Status;
use tower::Layer;
use tower::Service;

/// Identity resolved by the interceptor, attached to the request extensions
/// for the duration of one call.
#[derive(Debug, Clone)]
pub struct AuthenticatedSubject {
    pub subject: String,
    pub subject_id: u64,
}

/// Per-method access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodPolicy {
    /// Call proceeds without a token.
    Public,
    /// Call requires a valid bearer token.
    Protected,
}

impl MethodPolicy {
    /// Static classification by full gRPC method path. Registration and
    /// login are the only public entry points; new methods are protected by
    /// default without any interceptor change.
    pub fn for_method(path: &str) -> Self {
        match path {
            "/authgate.AuthService/Register" | "/authgate.AuthService/Login" => Self::Public,
            _ => Self::Protected,
        }
    }
}

/// Layer applying the access policy to every inbound call.
#[derive(Clone)]
pub struct AccessInterceptorLayer {
    codec: Arc<TokenCodec>,
}

impl AccessInterceptorLayer {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }
}

impl<S> Layer<S> for AccessInterceptorLayer {
    type Service = AccessInterceptor<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AccessInterceptor {
            inner,
            codec: Arc::clone(&self.codec),
        }
    }
}

/// Request-scoped gate wrapping every inbound call handler.
///
/// Public methods bypass authentication; protected methods must carry a
/// bearer token that validates under the process-wide secret. On success the
/// resolved subject is inserted into the request extensions; on failure the
/// call is rejected with an `unauthenticated` status before any handler
/// runs. The specific validation failure is logged, never returned.
#[derive(Clone)]
pub struct AccessInterceptor<S> {
    inner: S,
    codec: Arc<TokenCodec>,
}

impl<S, B> Service<http::Request<B>> for AccessInterceptor<S>
where
    S: Service<http::Request<B>, Response = http::Response<BoxBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = http::Response<BoxBody>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: http::Request<B>) -> Self::Future {
        // Take the ready inner service, leave a fresh clone behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let codec = Arc::clone(&self.codec);

        Box::pin(async move {
            let method = request.uri().path().to_owned();
            tracing::debug!(%method, "Invoking method");

            if MethodPolicy::for_method(&method) == MethodPolicy::Public {
                return inner.call(request).await;
            }

            let token = match extract_bearer_token(request.headers()) {
                Ok(token) => token,
                Err(status) => return Ok(status.to_http()),
            };

            match codec.validate(&token) {
                Ok((subject, subject_id)) => {
                    request.extensions_mut().insert(AuthenticatedSubject {
                        subject,
                        subject_id,
                    });
                    inner.call(request).await
                }
                Err(e) => {
                    tracing::warn!(%method, error = %e, "Token validation failed");
                    Ok(Status::unauthenticated("invalid or expired token").to_http())
                }
            }
        })
    }
}

/// Extract the bearer credential from call metadata.
///
/// Looks for an `authorization` header with a case-insensitive `bearer `
/// prefix, then falls back to the legacy single-value `jwt` header. A
/// missing credential and an empty-after-trim fallback value fail the same
/// way.
fn extract_bearer_token(headers: &HeaderMap) -> Result<String, Status> {
    if let Some(value) = headers.get(AUTHORIZATION) {
        if let Ok(value) = value.to_str() {
            if value.len() > 7 && value[..7].eq_ignore_ascii_case("bearer ") {
                let token = value[7..].trim();
                if !token.is_empty() {
                    return Ok(token.to_owned());
                }
            }
        }
    }

    // Legacy clients send the raw token in a single `jwt` header.
    let mut jwt_values = headers.get_all("jwt").iter();
    if let (Some(value), None) = (jwt_values.next(), jwt_values.next()) {
        if let Ok(value) = value.to_str() {
            let token = value.trim();
            if !token.is_empty() {
                return Ok(token.to_owned());
            }
        }
    }

    Err(Status::unauthenticated(
        "missing or invalid authorization token",
    ))
}

#[cfg(test)]
mod tests {
    use http::header::HeaderValue;
    use tonic::Code;

    use super::*;

    #[test]
    fn test_method_policy_allow_list() {
        assert_eq!(
            MethodPolicy::for_method("/authgate.AuthService/Register"),
            MethodPolicy::Public
        );
        assert_eq!(
            MethodPolicy::for_method("/authgate.AuthService/Login"),
            MethodPolicy::Public
        );
        assert_eq!(
            MethodPolicy::for_method("/authgate.ProfileService/GetProfile"),
            MethodPolicy::Protected
        );
        assert_eq!(
            MethodPolicy::for_method("/authgate.SomeFutureService/AnyMethod"),
            MethodPolicy::Protected
        );
    }

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_extract_bearer_prefix_is_case_insensitive() {
        for prefix in ["bearer", "BEARER", "BeArEr"] {
            let mut headers = HeaderMap::new();
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("{prefix} abc.def.ghi")).unwrap(),
            );
            assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
        }
    }

    #[test]
    fn test_extract_falls_back_to_jwt_header() {
        let mut headers = HeaderMap::new();
        headers.insert("jwt", HeaderValue::from_static(" abc.def.ghi "));
        assert_eq!(extract_bearer_token(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn test_extract_rejects_missing_headers() {
        let headers = HeaderMap::new();
        let status = extract_bearer_token(&headers).unwrap_err();
        assert_eq!(status.code(), Code::Unauthenticated);
        assert_eq!(status.message(), "missing or invalid authorization token");
    }

    #[test]
    fn test_extract_rejects_empty_values() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer   "));
        assert!(extract_bearer_token(&headers).is_err());

        let mut headers = HeaderMap::new();
        headers.insert("jwt", HeaderValue::from_static("   "));
        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn test_extract_rejects_non_bearer_authorization_without_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn test_extract_rejects_repeated_jwt_header() {
        let mut headers = HeaderMap::new();
        headers.append("jwt", HeaderValue::from_static("first"));
        headers.append("jwt", HeaderValue::from_static("second"));
        assert!(extract_bearer_token(&headers).is_err());
    }

    #[test]
    fn test_authorization_takes_precedence_over_jwt() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer primary"));
        headers.insert("jwt", HeaderValue::from_static("legacy"));
        assert_eq!(extract_bearer_token(&headers).unwrap(), "primary");
    }
}
