//! # Slotbook ドメイン層
//!
//! 予約（時間枠）とユーザーのドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（[`booking::Booking`], [`user::User`]）
//! - **値オブジェクト**: 生成時に検証される不変オブジェクト（[`booking::TimeSlot`],
//!   [`user::Email`] など）
//! - **ドメインサービス**: エンティティに属さないルール（[`booking::validate`]）
//! - **ドメインエラー**: ルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! booking-service → infra → domain
//! ```
//!
//! ドメイン層は DB や HTTP に一切依存しない。
//! 予約の重複判定は I/O を持たない純粋関数として実装する。
//!
//! ## モジュール構成
//!
//! - [`booking`] - 予約エンティティ、時間枠、重複バリデーション
//! - [`user`] - ユーザーエンティティとメールアドレス・表示名
//! - [`password`] - パスワード関連の値オブジェクト
//! - [`clock`] - 時刻プロバイダ
//! - [`error`] - ドメインエラー
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use slotbook_domain::booking::{BookingCandidate, BookingDate, TimeOfDay, validate};
//!
//! let candidate = BookingCandidate::new(
//!     BookingDate::new("2024-12-21")?,
//!     TimeOfDay::new("21:30")?,
//!     TimeOfDay::new("22:00")?,
//! );
//! assert!(validate(&candidate, &[]).is_ok());
//! # Ok(())
//! # }
//! ```

#[macro_use]
mod macros;

pub mod booking;
pub mod clock;
pub mod error;
pub mod password;
pub mod user;

pub use error::DomainError;
