//! # 予約ハンドラ
//!
//! 予約の REST API を提供する。すべてのエンドポイントで認証が必要。
//!
//! ## エンドポイント
//!
//! - `POST /booking` - 予約作成（所有者はトークンのユーザー）
//! - `GET /booking` - 予約一覧
//! - `GET /booking/{id}` - 予約詳細
//! - `PATCH /booking/{id}` - 日付・時刻の変更
//! - `DELETE /booking/{id}` - 予約削除

use std::sync::Arc;

use axum::{
   Json,
   extract::{Path, State},
   http::StatusCode,
   response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use slotbook_domain::booking::{Booking, BookingDate, BookingId, BookingPatch, TimeOfDay};
use slotbook_shared::{ApiResponse, ErrorResponse};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
   auth::{AuthUser, TokenIssuer, TokenState},
   error::CoreError,
   usecase::booking::{BookingUseCaseImpl, CreateBookingInput},
};

/// 予約 API の共有状態
pub struct BookingState {
   pub usecase: BookingUseCaseImpl,
   pub tokens:  Arc<TokenIssuer>,
}

impl TokenState for BookingState {
   fn tokens(&self) -> &TokenIssuer {
      &self.tokens
   }
}

// --- リクエスト/レスポンス型 ---

/// 予約作成リクエスト
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookingRequest {
   pub date:       String,
   pub start_time: String,
   pub end_time:   String,
}

/// 予約変更リクエスト
///
/// 省略したフィールドは現在の値を維持する。
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBookingRequest {
   pub date:       Option<String>,
   pub start_time: Option<String>,
   pub end_time:   Option<String>,
}

/// 予約 DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingDto {
   pub id:         Uuid,
   pub date:       String,
   pub start_time: String,
   pub end_time:   String,
   pub owner:      Uuid,
   pub created_at: String,
   pub updated_at: String,
}

impl From<&Booking> for BookingDto {
   fn from(booking: &Booking) -> Self {
      Self {
         id:         *booking.id().as_uuid(),
         date:       booking.date().as_str().to_string(),
         start_time: booking.slot().start().as_str().to_string(),
         end_time:   booking.slot().end().as_str().to_string(),
         owner:      *booking.owner().as_uuid(),
         created_at: booking.created_at().to_rfc3339(),
         updated_at: booking.updated_at().to_rfc3339(),
      }
   }
}

impl TryFrom<UpdateBookingRequest> for BookingPatch {
   type Error = CoreError;

   fn try_from(req: UpdateBookingRequest) -> Result<Self, Self::Error> {
      Ok(Self {
         date:  req.date.map(BookingDate::new).transpose()?,
         start: req.start_time.map(TimeOfDay::new).transpose()?,
         end:   req.end_time.map(TimeOfDay::new).transpose()?,
      })
   }
}

// --- ハンドラ ---

/// POST /booking
///
/// ## レスポンス
///
/// - `201 Created`: 作成された予約
/// - `400 Bad Request`: 入力値が不正、または開始時刻が終了時刻以上
/// - `409 Conflict`: 同じ日付の予約と時間帯が重なる
#[utoipa::path(
   post,
   path = "/booking",
   tag = "bookings",
   security(("bearer_auth" = [])),
   request_body = CreateBookingRequest,
   responses(
      (status = 201, description = "予約作成", body = ApiResponse<BookingDto>),
      (status = 400, description = "入力値が不正", body = ErrorResponse),
      (status = 401, description = "認証エラー", body = ErrorResponse),
      (status = 409, description = "時間帯の重複", body = ErrorResponse)
   )
)]
pub async fn create_booking(
   State(state): State<Arc<BookingState>>,
   AuthUser(owner): AuthUser,
   Json(req): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, CoreError> {
   let input = CreateBookingInput {
      owner,
      date: BookingDate::new(req.date)?,
      start: TimeOfDay::new(req.start_time)?,
      end: TimeOfDay::new(req.end_time)?,
   };

   let booking = state.usecase.create_booking(input).await?;

   let response = ApiResponse::new(BookingDto::from(&booking));
   Ok((StatusCode::CREATED, Json(response)))
}

/// GET /booking
#[utoipa::path(
   get,
   path = "/booking",
   tag = "bookings",
   security(("bearer_auth" = [])),
   responses(
      (status = 200, description = "予約一覧", body = ApiResponse<Vec<BookingDto>>),
      (status = 401, description = "認証エラー", body = ErrorResponse)
   )
)]
pub async fn list_bookings(
   State(state): State<Arc<BookingState>>,
   _user: AuthUser,
) -> Result<impl IntoResponse, CoreError> {
   let bookings = state.usecase.list_bookings().await?;

   let items: Vec<BookingDto> = bookings.iter().map(BookingDto::from).collect();
   Ok((StatusCode::OK, Json(ApiResponse::new(items))))
}

/// GET /booking/{id}
#[utoipa::path(
   get,
   path = "/booking/{id}",
   tag = "bookings",
   security(("bearer_auth" = [])),
   params(("id" = Uuid, Path, description = "予約 ID")),
   responses(
      (status = 200, description = "予約詳細", body = ApiResponse<BookingDto>),
      (status = 401, description = "認証エラー", body = ErrorResponse),
      (status = 404, description = "予約が見つからない", body = ErrorResponse)
   )
)]
pub async fn get_booking(
   State(state): State<Arc<BookingState>>,
   _user: AuthUser,
   Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, CoreError> {
   let booking = state
      .usecase
      .get_booking(&BookingId::from_uuid(id))
      .await?;

   Ok((StatusCode::OK, Json(ApiResponse::new(BookingDto::from(&booking)))))
}

/// PATCH /booking/{id}
///
/// ## レスポンス
///
/// - `200 OK`: 変更後の予約
/// - `400 Bad Request`: 入力値が不正、または変更後の開始時刻が終了時刻以上
/// - `404 Not Found`: 予約が見つからない
/// - `409 Conflict`: 他の予約と時間帯が重なる
#[utoipa::path(
   patch,
   path = "/booking/{id}",
   tag = "bookings",
   security(("bearer_auth" = [])),
   params(("id" = Uuid, Path, description = "予約 ID")),
   request_body = UpdateBookingRequest,
   responses(
      (status = 200, description = "変更後の予約", body = ApiResponse<BookingDto>),
      (status = 400, description = "入力値が不正", body = ErrorResponse),
      (status = 401, description = "認証エラー", body = ErrorResponse),
      (status = 404, description = "予約が見つからない", body = ErrorResponse),
      (status = 409, description = "時間帯の重複", body = ErrorResponse)
   )
)]
pub async fn update_booking(
   State(state): State<Arc<BookingState>>,
   AuthUser(actor): AuthUser,
   Path(id): Path<Uuid>,
   Json(req): Json<UpdateBookingRequest>,
) -> Result<impl IntoResponse, CoreError> {
   let patch = BookingPatch::try_from(req)?;

   let booking = state
      .usecase
      .update_booking(&BookingId::from_uuid(id), patch, &actor)
      .await?;

   Ok((StatusCode::OK, Json(ApiResponse::new(BookingDto::from(&booking)))))
}

/// DELETE /booking/{id}
///
/// 存在しない ID でも `204 No Content` を返す。
#[utoipa::path(
   delete,
   path = "/booking/{id}",
   tag = "bookings",
   security(("bearer_auth" = [])),
   params(("id" = Uuid, Path, description = "予約 ID")),
   responses(
      (status = 204, description = "削除完了"),
      (status = 401, description = "認証エラー", body = ErrorResponse)
   )
)]
pub async fn delete_booking(
   State(state): State<Arc<BookingState>>,
   AuthUser(actor): AuthUser,
   Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, CoreError> {
   state
      .usecase
      .delete_booking(&BookingId::from_uuid(id), &actor)
      .await?;

   Ok(StatusCode::NO_CONTENT)
}
