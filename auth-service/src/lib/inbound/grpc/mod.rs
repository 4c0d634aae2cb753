pub mod handlers;
pub mod interceptor;

mod grpc_auth_server;
mod grpc_profile_server;

pub use grpc_auth_server::AuthGrpcService;
pub use grpc_profile_server::ProfileGrpcService;
