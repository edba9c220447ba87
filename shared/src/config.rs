use anyhow::Result;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub mail: MailConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        let database = DatabaseConfig {
            host: std::env::var("DATABASE_HOST")?,
            port: std::env::var("DATABASE_PORT")?.parse()?,
            username: std::env::var("DATABASE_USERNAME")?,
            password: std::env::var("DATABASE_PASSWORD")?,
            database: std::env::var("DATABASE_NAME")?,
        };
        let redis = RedisConfig {
            host: std::env::var("REDIS_HOST")?,
            port: std::env::var("REDIS_PORT")?.parse()?,
        };
        let auth = AuthConfig {
            ttl: std::env::var("AUTH_TOKEN_TTL")?.parse()?,
        };
        let storage = StorageConfig {
            root: std::env::var("IMAGE_STORAGE_ROOT").unwrap_or_else(|_| "uploads".into()),
            public_base_url: std::env::var("IMAGE_PUBLIC_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080/uploads".into()),
        };
        let mail = MailConfig {
            sender: std::env::var("MAIL_SENDER").unwrap_or_default(),
            gmail_access_token: std::env::var("GMAIL_ACCESS_TOKEN").unwrap_or_default(),
        };
        Ok(Self {
            database,
            redis,
            auth,
            storage,
            mail,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

pub struct AuthConfig {
    /// Access token lifetime in seconds.
    pub ttl: u64,
}

pub struct StorageConfig {
    /// Directory where uploaded images are written.
    pub root: String,
    /// Base URL under which stored images are served.
    pub public_base_url: String,
}

pub struct MailConfig {
    pub sender: String,
    pub gmail_access_token: String,
}
