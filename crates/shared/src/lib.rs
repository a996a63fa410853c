//! # Slotbook 共有ユーティリティ
//!
//! サービス層とインフラ層から共通で使われる、ビジネスロジックを含まない型と
//! ヘルパーを提供する。
//!
//! - [`api_response`] - 成功レスポンスのエンベロープ `{ "data": T }`
//! - [`error_response`] - RFC 9457 Problem Details 形式のエラーレスポンス
//! - [`health`] - ヘルスチェック / Readiness Check のレスポンス型
//! - [`observability`] - トレーシング初期化とリクエストスパン
//! - [`canonical_log`] - リクエスト完了サマリログ（`TraceLayer::on_response`、`observability` feature）
//! - [`event_log`] - ビジネスイベントログのマクロとフィールド定数

pub mod api_response;
#[cfg(feature = "observability")]
pub mod canonical_log;
pub mod error_response;
pub mod event_log;
pub mod health;
pub mod observability;

pub use api_response::ApiResponse;
pub use error_response::ErrorResponse;
pub use health::{CheckStatus, HealthResponse, ReadinessResponse, ReadinessStatus};
