use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use auth::TokenCodec;
use auth_service::domain::user::models::NewUser;
use auth_service::domain::user::models::Profile;
use auth_service::domain::user::models::User;
use auth_service::domain::user::models::UserId;
use auth_service::domain::user::ports::ProfileRepository;
use auth_service::domain::user::ports::UserRepository;
use auth_service::domain::user::service::AuthService;
use auth_service::inbound::grpc::interceptor::AccessInterceptorLayer;
use auth_service::inbound::grpc::AuthGrpcService;
use auth_service::inbound::grpc::ProfileGrpcService;
use auth_service::proto::auth_service_client::AuthServiceClient;
use auth_service::proto::auth_service_server::AuthServiceServer;
use auth_service::proto::profile_service_client::ProfileServiceClient;
use auth_service::proto::profile_service_server::ProfileServiceServer;
use auth_service::user::errors::AuthError;
use chrono::Utc;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Channel;
use tonic::transport::Server;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// In-memory identity store. One mutex guards the whole table, so the
/// uniqueness check and the insert are atomic, matching what the database
/// unique constraints guarantee in production.
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
    next_id: AtomicI64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, AuthError> {
        let mut users = self.users.lock().unwrap();

        if users
            .iter()
            .any(|u| u.username.as_str() == user.username.as_str())
        {
            return Err(AuthError::UsernameAlreadyExists);
        }
        if users.iter().any(|u| u.email.as_str() == user.email.as_str()) {
            return Err(AuthError::EmailAlreadyExists);
        }

        let now = Utc::now();
        let created = User {
            id: UserId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.username.as_str() == username)
            .cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| u.username.as_str() == username))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AuthError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().any(|u| u.email.as_str() == email))
    }

    async fn delete(&self, id: UserId) -> Result<(), AuthError> {
        let mut users = self.users.lock().unwrap();
        users.retain(|u| u.id != id);
        Ok(())
    }
}

pub struct InMemoryProfileRepository {
    profiles: Mutex<Vec<Profile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self {
            profiles: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn create(&self, user_id: UserId, display_name: &str) -> Result<(), AuthError> {
        let mut profiles = self.profiles.lock().unwrap();
        profiles.push(Profile {
            user_id,
            display_name: display_name.to_string(),
            bio: String::new(),
            avatar_url: String::new(),
            status: String::new(),
            last_seen: Utc::now(),
        });
        Ok(())
    }

    async fn find_by_user_id(&self, user_id: UserId) -> Result<Option<Profile>, AuthError> {
        let profiles = self.profiles.lock().unwrap();
        Ok(profiles.iter().find(|p| p.user_id == user_id).cloned())
    }
}

/// Test application: a real tonic server with the access interceptor, on a
/// random port, backed by in-memory repositories.
pub struct TestApp {
    pub address: String,
    pub codec: Arc<TokenCodec>,
}

impl TestApp {
    /// Spawn the server in a background task and return the app handle.
    pub async fn spawn() -> Self {
        let codec = Arc::new(TokenCodec::new(TEST_SECRET));
        let users = Arc::new(InMemoryUserRepository::new());
        let profiles = Arc::new(InMemoryProfileRepository::new());
        let service = Arc::new(AuthService::new(users, profiles, Arc::clone(&codec)));

        // Port 0 = OS assigns
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let layer_codec = Arc::clone(&codec);
        let auth_grpc = AuthGrpcService::new(Arc::clone(&service));
        let profile_grpc = ProfileGrpcService::new(service);

        tokio::spawn(async move {
            Server::builder()
                .layer(AccessInterceptorLayer::new(layer_codec))
                .add_service(AuthServiceServer::new(auth_grpc))
                .add_service(ProfileServiceServer::new(profile_grpc))
                .serve_with_incoming(TcpListenerStream::new(listener))
                .await
        });

        TestApp { address, codec }
    }

    pub async fn auth_client(&self) -> AuthServiceClient<Channel> {
        AuthServiceClient::new(self.channel().await)
    }

    pub async fn profile_client(&self) -> ProfileServiceClient<Channel> {
        ProfileServiceClient::new(self.channel().await)
    }

    async fn channel(&self) -> Channel {
        // The server task may not be accepting yet; retry briefly.
        for _ in 0..20 {
            match Channel::from_shared(self.address.clone())
                .expect("Invalid test address")
                .connect()
                .await
            {
                Ok(channel) => return channel,
                Err(_) => tokio::time::sleep(Duration::from_millis(25)).await,
            }
        }
        panic!("Failed to connect to test server at {}", self.address);
    }
}
