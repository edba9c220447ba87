use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::mailer::GmailMailer;
use adapter::redis::RedisClient;
use adapter::repository::auth::AuthRepositoryImpl;
use adapter::repository::facility::FacilityRepositoryImpl;
use adapter::repository::health::HealthCheckRepositoryImpl;
use adapter::repository::post::PostRepositoryImpl;
use adapter::repository::user::UserRepositoryImpl;
use adapter::storage::LocalImageStorage;
use kernel::mailer::Mailer;
use kernel::repository::auth::AuthRepository;
use kernel::repository::facility::FacilityRepository;
use kernel::repository::health::HealthCheckRepository;
use kernel::repository::post::PostRepository;
use kernel::repository::user::UserRepository;
use kernel::storage::ImageStorage;
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    post_repository: Arc<dyn PostRepository>,
    facility_repository: Arc<dyn FacilityRepository>,
    user_repository: Arc<dyn UserRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    image_storage: Arc<dyn ImageStorage>,
    mailer: Arc<dyn Mailer>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool, redis_client: Arc<RedisClient>, app_config: AppConfig) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let post_repository = Arc::new(PostRepositoryImpl::new(pool.clone()));
        let facility_repository = Arc::new(FacilityRepositoryImpl::new(pool.clone()));
        let user_repository = Arc::new(UserRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(
            pool.clone(),
            redis_client.clone(),
            app_config.auth.ttl,
        ));
        let image_storage = Arc::new(LocalImageStorage::new(&app_config.storage));
        let mailer = Arc::new(GmailMailer::new(&app_config.mail));
        Self {
            health_check_repository,
            post_repository,
            facility_repository,
            user_repository,
            auth_repository,
            image_storage,
            mailer,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn post_repository(&self) -> Arc<dyn PostRepository> {
        self.post_repository.clone()
    }

    pub fn facility_repository(&self) -> Arc<dyn FacilityRepository> {
        self.facility_repository.clone()
    }

    pub fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn image_storage(&self) -> Arc<dyn ImageStorage> {
        self.image_storage.clone()
    }

    pub fn mailer(&self) -> Arc<dyn Mailer> {
        self.mailer.clone()
    }
}
