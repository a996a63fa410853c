//! # ドメイン層エラー定義
//!
//! 値オブジェクトの生成失敗やエンティティの不在を表現するエラー型。
//!
//! 予約の受付可否（範囲不正・時間帯の重複）は入力に対する「判定結果」なので
//! このエラーではなく [`crate::booking::BookingRejection`] で表す。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の検証失敗 |
//! | `NotFound` | 404 Not Found | エンティティが存在しない |
//! | `Conflict` | 409 Conflict | 一意制約との競合 |
//!
//! ## 使用例
//!
//! ```rust
//! use slotbook_domain::DomainError;
//!
//! fn find_booking(id: &str) -> Result<(), DomainError> {
//!     Err(DomainError::NotFound {
//!         entity_type: "Booking",
//!         id:          id.to_string(),
//!     })
//! }
//!
//! assert!(find_booking("b-1").is_err());
//! ```

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Error)]
pub enum DomainError {
    /// バリデーションエラー
    ///
    /// 必須フィールドの欠落、文字数制限の超過、不正なフォーマットなど。
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// エンティティが見つからない
    #[error("{entity_type} が見つかりません: {id}")]
    NotFound {
        /// エンティティの種類（"Booking", "User"）
        entity_type: &'static str,
        /// 検索に使用した識別子
        id:          String,
    },

    /// 競合エラー
    ///
    /// メールアドレスの重複登録など、一意性の制約に反する場合に使用する。
    #[error("競合が発生しました: {0}")]
    Conflict(String),
}
