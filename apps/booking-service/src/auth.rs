//! # トークン認証
//!
//! ログイン時に HS256 の JWT を発行し、予約 API のリクエストで検証する。
//!
//! ## クレーム
//!
//! | クレーム | 内容 |
//! |---------|------|
//! | `sub` | ユーザー ID |
//! | `iat` | 発行時刻（UNIX 秒） |
//! | `exp` | 失効時刻（`iat` + 有効期間） |
//!
//! 失効判定は注入された [`Clock`] で行う（`jsonwebtoken` 側の時刻チェックは使わない）。
//!
//! ## リクエストでの扱い
//!
//! [`AuthUser`] エクストラクタが `Authorization: Bearer <token>` を検証し、
//! 予約の所有者となるユーザー ID を取り出す。

use std::sync::Arc;

use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::Duration;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use slotbook_domain::{clock::Clock, user::UserId};
use uuid::Uuid;

use crate::error::CoreError;

/// JWT のクレーム
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// トークンの発行と検証
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl:      Duration,
    clock:    Arc<dyn Clock>,
}

impl TokenIssuer {
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
            clock,
        }
    }

    /// ユーザーに対するトークンを発行する
    pub fn issue(&self, user_id: &UserId) -> Result<String, CoreError> {
        let iat = self.clock.now();
        let exp = iat
            .checked_add_signed(self.ttl)
            .ok_or_else(|| CoreError::Internal("トークンの失効時刻が範囲外です".to_string()))?;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: iat.timestamp(),
            exp: exp.timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| CoreError::Internal(format!("トークンの発行に失敗しました: {e}")))
    }

    /// トークンを検証し、ユーザー ID を返す
    ///
    /// 署名不正・形式不正は "Invalid token"、失効済みは "Permission expired"。
    pub fn verify(&self, token: &str) -> Result<UserId, CoreError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| CoreError::InvalidToken("Invalid token".to_string()))?
            .claims;

        if claims.exp <= self.clock.now().timestamp() {
            return Err(CoreError::InvalidToken("Permission expired".to_string()));
        }

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| CoreError::InvalidToken("Invalid token".to_string()))?;

        Ok(UserId::from_uuid(user_id))
    }
}

/// [`AuthUser`] が検証に使う [`TokenIssuer`] を提供する State
pub trait TokenState: Send + Sync {
    fn tokens(&self) -> &TokenIssuer;
}

/// 認証済みユーザー
///
/// ハンドラの引数に置くと、トークンの検証に失敗したリクエストは
/// ハンドラに到達する前に 401 で拒否される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser(pub UserId);

impl<S> FromRequestParts<Arc<S>> for AuthUser
where
    S: TokenState + 'static,
{
    type Rejection = CoreError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<S>) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .ok_or_else(|| CoreError::Unauthorized("UnAuthorized".to_string()))?;

        let token = header
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CoreError::InvalidToken("Invalid token".to_string()))?;

        let user_id = state.tokens().verify(token)?;
        tracing::Span::current().record("user_id", tracing::field::display(&user_id));

        Ok(AuthUser(user_id))
    }
}
