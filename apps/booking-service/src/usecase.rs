//! # ユースケース層
//!
//! Booking Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリ・時計・パスワード処理を `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約
//!
//! ## モジュール構成
//!
//! - `booking`: 予約の作成・参照・変更・削除
//! - `user`: ユーザー登録とログイン

pub mod booking;
pub mod user;

pub use booking::{BookingUseCaseImpl, CreateBookingInput};
pub use user::{LoginOutput, RegisterUserInput, UserUseCaseImpl};
