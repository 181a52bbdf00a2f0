use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::HeaderMap;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::utils::cookies::{self, FLASH_COOKIE};

/// Flash messages that are never read expire after this many seconds.
const FLASH_TTL: u64 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Info,
    Success,
    Error,
}

impl FlashKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashKind::Info => "info",
            FlashKind::Success => "success",
            FlashKind::Error => "error",
        }
    }
}

/// A one-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn info(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Info, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { kind: FlashKind::Error, message: message.into() }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct FlashClaims {
    #[serde(flatten)]
    flash: Flash,
    exp: usize,
}

/// Signs the flash so clients cannot forge messages, and wraps it in a
/// `Set-Cookie` value.
pub fn set_cookie(flash: Flash, secret: &str) -> Result<String, AppError> {
    let exp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Internal(e.to_string()))?
        .as_secs()
        + FLASH_TTL;

    let token = encode(
        &Header::default(),
        &FlashClaims { flash, exp: exp as usize },
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(cookies::build(FLASH_COOKIE, &token, FLASH_TTL))
}

/// Reads the pending flash message, if any. Invalid or expired cookies
/// are ignored. The caller is responsible for clearing the cookie.
pub fn peek(headers: &HeaderMap, secret: &str) -> Option<Flash> {
    let token = cookies::get(headers, FLASH_COOKIE)?;
    decode::<FlashClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()
    .map(|data| data.claims.flash)
}
