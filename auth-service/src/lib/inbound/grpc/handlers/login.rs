use std::sync::Arc;

use tonic::Status;

use super::failure_response;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::ProfileRepository;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::service::AuthService;
use crate::proto::AuthResponse;
use crate::proto::LoginRequest;

/// Authenticate an existing identity. Performs no store mutation.
pub async fn login<UR, PR>(
    service: Arc<AuthService<UR, PR>>,
    request: LoginRequest,
) -> Result<AuthResponse, Status>
where
    UR: UserRepository,
    PR: ProfileRepository,
{
    match service.login(&request.username, &request.password).await {
        Ok(session) => Ok(AuthResponse {
            success: true,
            token: session.token,
            error_text: String::new(),
        }),
        Err(e) => Ok(failure_response(&e)),
    }
}
