use std::sync::Arc;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::get_profile;
use super::interceptor::AuthenticatedSubject;
use crate::domain::user::ports::ProfileRepository;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::service::AuthService;
use crate::proto::profile_service_server::ProfileService as ProfileServiceProto;
use crate::proto::GetProfileRequest;
use crate::proto::GetProfileResponse;

/// Protected profile operations. The access interceptor has already
/// validated the token and attached the resolved subject to the request.
pub struct ProfileGrpcService<UR, PR>
where
    UR: UserRepository,
    PR: ProfileRepository,
{
    service: Arc<AuthService<UR, PR>>,
}

impl<UR, PR> ProfileGrpcService<UR, PR>
where
    UR: UserRepository,
    PR: ProfileRepository,
{
    pub fn new(service: Arc<AuthService<UR, PR>>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl<UR, PR> ProfileServiceProto for ProfileGrpcService<UR, PR>
where
    UR: UserRepository,
    PR: ProfileRepository,
{
    async fn get_profile(
        &self,
        request: Request<GetProfileRequest>,
    ) -> Result<Response<GetProfileResponse>, Status> {
        let subject = request
            .extensions()
            .get::<AuthenticatedSubject>()
            .cloned()
            .ok_or_else(|| Status::unauthenticated("missing or invalid authorization token"))?;

        let response =
            get_profile::get_profile(self.service.clone(), subject, request.into_inner()).await?;
        Ok(Response::new(response))
    }
}
