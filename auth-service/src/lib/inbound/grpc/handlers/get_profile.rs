use std::sync::Arc;

use tonic::Status;

use crate::domain::user::models::UserId;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::ProfileRepository;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::service::AuthService;
use crate::inbound::grpc::interceptor::AuthenticatedSubject;
use crate::proto::GetProfileRequest;
use crate::proto::GetProfileResponse;
use crate::user::errors::AuthError;

/// Return the profile of the authenticated subject.
///
/// The subject was resolved by the access interceptor; this handler never
/// sees an unauthenticated call.
pub async fn get_profile<UR, PR>(
    service: Arc<AuthService<UR, PR>>,
    subject: AuthenticatedSubject,
    _request: GetProfileRequest,
) -> Result<GetProfileResponse, Status>
where
    UR: UserRepository,
    PR: ProfileRepository,
{
    let profile = service
        .get_profile(UserId::from(subject.subject_id))
        .await
        .map_err(|e| match e {
            AuthError::ProfileNotFound => Status::not_found("profile not found"),
            other => {
                tracing::error!(error = %other, "Profile lookup failed");
                Status::internal("profile lookup failed")
            }
        })?;

    Ok(GetProfileResponse {
        subject: subject.subject,
        user_id: subject.subject_id,
        display_name: profile.display_name,
        bio: profile.bio,
        avatar_url: profile.avatar_url,
        status: profile.status,
        last_seen: profile.last_seen.to_rfc3339(),
    })
}
