//! # OpenAPI 仕様定義
//!
//! utoipa で Booking Service の OpenAPI 仕様を Rust の型から生成する。
//! `GET /api/v1/docs` で JSON として配信する。

use axum::Json;
use utoipa::{
    Modify,
    OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

use crate::handler::{booking, health, user};

/// OpenAPI ドキュメントの配信パス
pub const DOCS_PATH: &str = "/api/v1/docs";

#[derive(OpenApi)]
#[openapi(
   info(
      title = "Slotbook API",
      version = "0.1.0",
      description = "時間帯予約サービス Slotbook の API"
   ),
   paths(
      // health
      health::health_check,
      health::readiness_check,
      // users
      user::register_user,
      user::login,
      // bookings
      booking::create_booking,
      booking::list_bookings,
      booking::get_booking,
      booking::update_booking,
      booking::delete_booking,
   ),
   components(schemas(
      slotbook_shared::ErrorResponse,
   )),
   tags(
      (name = "health", description = "ヘルスチェック"),
      (name = "users", description = "ユーザー登録と認証"),
      (name = "bookings", description = "予約管理"),
   ),
   modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

/// セキュリティスキーム定義
///
/// `Authorization: Bearer <token>` によるトークン認証を追加する。
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// GET /api/v1/docs
pub async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
