//! # Booking Service ライブラリ
//!
//! 予約 API のユースケース・ハンドラ・認証を公開する。
//! バイナリ（`main.rs`）はここで組み立てたルーターを起動する。

pub mod app;
pub mod auth;
pub mod error;
pub mod handler;
pub mod openapi;
pub mod usecase;
