use clap::Parser;
use once_cell::sync::Lazy;

/// Name of the cookie carrying the session key.
pub const SESSION_COOKIE_NAME: &str = "sms_session";

// Session Configuration
pub const SESSION_TTL_SECONDS: u64 = 86_400; // 24 hours, absolute from login
pub const FLASH_TTL_SECONDS: u64 = 300; // notices not read within 5 minutes are dropped

pub static APP_CONFIG: Lazy<Config> = Lazy::new(Config::parse);

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 3000)]
    pub port: u16,

    #[clap(long, env, default_value_t = true)]
    pub swagger_enabled: bool,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(long, env)]
    pub database_url: String,

    #[clap(long, env, default_value = "redis://127.0.0.1:6379")]
    pub redis_url: String,

    #[clap(long, env, default_value = "admin")]
    pub admin_username: String,

    #[clap(long, env, default_value = "admin123")]
    pub admin_password: String,

    #[clap(long, env, default_value = "admin@sms.com")]
    pub admin_email: String,

    #[clap(long, env, default_value = "*")]
    pub cors_allowed_origins: String,

    #[clap(long, env, default_value = "local")]
    pub app_env: String,
}
