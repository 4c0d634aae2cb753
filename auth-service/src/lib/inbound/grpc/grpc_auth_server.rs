use std::sync::Arc;

use tonic::Request;
use tonic::Response;
use tonic::Status;

use super::handlers::login;
use super::handlers::register;
use crate::domain::user::ports::ProfileRepository;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::service::AuthService;
use crate::proto::auth_service_server::AuthService as AuthServiceProto;
use crate::proto::AuthResponse;
use crate::proto::LoginRequest;
use crate::proto::RegisterRequest;

/// The two public entry points of the gateway.
pub struct AuthGrpcService<UR, PR>
where
    UR: UserRepository,
    PR: ProfileRepository,
{
    service: Arc<AuthService<UR, PR>>,
}

impl<UR, PR> AuthGrpcService<UR, PR>
where
    UR: UserRepository,
    PR: ProfileRepository,
{
    pub fn new(service: Arc<AuthService<UR, PR>>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl<UR, PR> AuthServiceProto for AuthGrpcService<UR, PR>
where
    UR: UserRepository,
    PR: ProfileRepository,
{
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<AuthResponse>, Status> {
        let response = register::register(self.service.clone(), request.into_inner()).await?;
        Ok(Response::new(response))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<AuthResponse>, Status> {
        let response = login::login(self.service.clone(), request.into_inner()).await?;
        Ok(Response::new(response))
    }
}
