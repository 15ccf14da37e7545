use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims<T> {
    pub sub: String,
    pub exp: u64,
    pub iat: u64,
    pub data: T
}

/// Payload of the access token attached to a signed-in identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    pub email: String,
}
