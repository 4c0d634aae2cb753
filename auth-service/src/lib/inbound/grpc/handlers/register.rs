use std::sync::Arc;

use tonic::Status;

use super::failure_response;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::ProfileRepository;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::service::AuthService;
use crate::proto::AuthResponse;
use crate::proto::RegisterRequest;

/// Register a new identity.
///
/// Every domain failure is reported in-band: the caller always receives a
/// response with `success = false`, never a transport fault.
pub async fn register<UR, PR>(
    service: Arc<AuthService<UR, PR>>,
    request: RegisterRequest,
) -> Result<AuthResponse, Status>
where
    UR: UserRepository,
    PR: ProfileRepository,
{
    match service
        .register(&request.username, &request.email, &request.password)
        .await
    {
        Ok(session) => Ok(AuthResponse {
            success: true,
            token: session.token,
            error_text: String::new(),
        }),
        Err(e) => Ok(failure_response(&e)),
    }
}
