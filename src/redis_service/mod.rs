pub mod redis_service;

pub use redis_service::{
    FlashKind, FlashMessage, FlashStore, SessionStore, get_redis, init_redis_connection,
};
