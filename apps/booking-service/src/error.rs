//! # Booking Service エラー定義
//!
//! ユースケース・ハンドラで発生するエラーと、HTTP レスポンスへの変換を定義する。
//!
//! | エラー種別 | HTTP ステータス |
//! |-----------|----------------|
//! | `BadRequest` / `InvalidRange` | 400 |
//! | `Unauthorized` / `InvalidToken` | 401 |
//! | `NotFound` | 404 |
//! | `Conflict` / `TimeConflict` | 409 |
//! | `Database` / `Internal` | 500 |

use axum::{
   Json,
   http::StatusCode,
   response::{IntoResponse, Response},
};
use slotbook_domain::{DomainError, booking::BookingRejection};
use slotbook_infra::InfraError;
use slotbook_shared::{
   ErrorResponse,
   event_log::error::{category, kind},
};
use thiserror::Error;

/// Booking Service で発生するエラー
#[derive(Debug, Error)]
pub enum CoreError {
   /// リソースが見つからない
   #[error("リソースが見つかりません: {0}")]
   NotFound(String),

   /// 不正なリクエスト（入力値の検証失敗）
   #[error("不正なリクエスト: {0}")]
   BadRequest(String),

   /// 開始時刻が終了時刻以上
   #[error("時間範囲が不正です: {0}")]
   InvalidRange(String),

   /// 同じ日付の既存予約と時間帯が重なる
   #[error("時間帯が重複しています: {0}")]
   TimeConflict(String),

   /// 一意制約との競合（登録済みメールアドレスなど）
   #[error("競合が発生しました: {0}")]
   Conflict(String),

   /// 認証情報がない、または一致しない
   #[error("認証に失敗しました: {0}")]
   Unauthorized(String),

   /// トークンの署名不正・期限切れ
   #[error("トークンが不正です: {0}")]
   InvalidToken(String),

   /// データベースエラー
   #[error("データベースエラー: {0}")]
   Database(#[from] InfraError),

   /// 内部エラー
   #[error("内部エラー: {0}")]
   Internal(String),
}

impl From<DomainError> for CoreError {
   fn from(error: DomainError) -> Self {
      match error {
         DomainError::Validation(msg) => CoreError::BadRequest(msg),
         DomainError::NotFound { entity_type, id } => {
            CoreError::NotFound(format!("{entity_type} が見つかりません: {id}"))
         }
         DomainError::Conflict(msg) => CoreError::Conflict(msg),
      }
   }
}

impl From<BookingRejection> for CoreError {
   fn from(rejection: BookingRejection) -> Self {
      match rejection {
         BookingRejection::InvalidRange { .. } => CoreError::InvalidRange(rejection.to_string()),
         BookingRejection::TimeConflict { .. } => CoreError::TimeConflict(rejection.to_string()),
      }
   }
}

impl IntoResponse for CoreError {
   fn into_response(self) -> Response {
      let body = match &self {
         CoreError::NotFound(msg) => ErrorResponse::not_found(msg.clone()),
         CoreError::BadRequest(msg) => ErrorResponse::validation_error(msg.clone()),
         CoreError::InvalidRange(msg) => ErrorResponse::invalid_range(msg.clone()),
         CoreError::TimeConflict(msg) => ErrorResponse::time_conflict(msg.clone()),
         CoreError::Conflict(msg) => ErrorResponse::conflict(msg.clone()),
         CoreError::Unauthorized(msg) => ErrorResponse::unauthorized(msg.clone()),
         CoreError::InvalidToken(msg) => ErrorResponse::invalid_token(msg.clone()),
         CoreError::Database(e) => {
            tracing::error!(
               error.category = category::INFRASTRUCTURE,
               error.kind = kind::DATABASE,
               span_trace = %e.span_trace(),
               "データベースエラー: {}",
               e
            );
            ErrorResponse::internal_error()
         }
         CoreError::Internal(msg) => {
            tracing::error!(
               error.category = category::INFRASTRUCTURE,
               error.kind = kind::INTERNAL,
               "内部エラー: {}",
               msg
            );
            ErrorResponse::internal_error()
         }
      };

      let status = StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
      (status, Json(body)).into_response()
   }
}
