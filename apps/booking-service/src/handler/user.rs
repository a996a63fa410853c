//! # ユーザーハンドラ
//!
//! ユーザー登録とログイン（トークン発行）を提供する。認証は不要。
//!
//! ## エンドポイント
//!
//! - `POST /users` - ユーザー登録
//! - `POST /users/auth` - ログイン

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use slotbook_shared::{ApiResponse, ErrorResponse};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
   error::CoreError,
   usecase::user::{RegisterUserInput, UserUseCaseImpl},
};

/// ユーザー API の共有状態
pub struct UserState {
   pub usecase: UserUseCaseImpl,
}

// --- リクエスト/レスポンス型 ---

/// ユーザー登録リクエスト
#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
   pub name:     String,
   pub email:    String,
   pub password: String,
}

/// ログインリクエスト
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
   pub email:    String,
   pub password: String,
}

/// 登録済みユーザー DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDto {
   pub id:    Uuid,
   pub name:  String,
   pub email: String,
}

/// ログイン結果 DTO
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginDto {
   pub name:  String,
   pub email: String,
   pub token: String,
}

// --- ハンドラ ---

/// POST /users
///
/// ## レスポンス
///
/// - `201 Created`: 登録したユーザー
/// - `400 Bad Request`: 入力値が不正
/// - `409 Conflict`: 登録済みのメールアドレス
#[utoipa::path(
   post,
   path = "/users",
   tag = "users",
   request_body = RegisterRequest,
   responses(
      (status = 201, description = "ユーザー登録", body = ApiResponse<UserDto>),
      (status = 400, description = "入力値が不正", body = ErrorResponse),
      (status = 409, description = "登録済みのメールアドレス", body = ErrorResponse)
   )
)]
pub async fn register_user(
   State(state): State<Arc<UserState>>,
   Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, CoreError> {
   let input = RegisterUserInput {
      name:     req.name,
      email:    req.email,
      password: req.password,
   };

   let user = state.usecase.register(input).await?;

   let response = ApiResponse::new(UserDto {
      id:    *user.id().as_uuid(),
      name:  user.name().as_str().to_string(),
      email: user.email().as_str().to_string(),
   });
   Ok((StatusCode::CREATED, Json(response)))
}

/// POST /users/auth
///
/// ## レスポンス
///
/// - `200 OK`: ユーザー名・メールアドレスとトークン
/// - `401 Unauthorized`: 認証情報が一致しない
#[utoipa::path(
   post,
   path = "/users/auth",
   tag = "users",
   request_body = LoginRequest,
   responses(
      (status = 200, description = "ログイン成功", body = ApiResponse<LoginDto>),
      (status = 401, description = "認証情報が一致しない", body = ErrorResponse)
   )
)]
pub async fn login(
   State(state): State<Arc<UserState>>,
   Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, CoreError> {
   let output = state.usecase.login(&req.email, &req.password).await?;

   let response = ApiResponse::new(LoginDto {
      name:  output.user.name().as_str().to_string(),
      email: output.user.email().as_str().to_string(),
      token: output.token,
   });
   Ok((StatusCode::OK, Json(response)))
}
