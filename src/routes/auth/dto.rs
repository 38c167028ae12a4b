use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::redis_service::FlashMessage;

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "admin")]
    pub username: String,

    #[schema(example = "admin123")]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginPageResponse {
    pub title: String,
    pub notices: Vec<FlashMessage>,
}
