//! # ビジネスイベントログ
//!
//! 予約の作成・変更・削除や認証の成否を、`jq` で絞り込める構造化ログとして出力する。
//!
//! [`log_business_event!`] は `event.kind = "business_event"` マーカーを自動付与する。
//! フィールド名はドット記法（`event.category`、`error.kind`）で、JSON 出力では
//! フラットなキーになる。

/// ビジネスイベントを構造化ログとして出力する。
///
/// ## 慣例フィールド
///
/// - `event.category`: [`event::category`]
/// - `event.action`: [`event::action`]
/// - `event.entity_type` / `event.entity_id`: [`event::entity_type`] と対象 ID
/// - `event.actor_id`: 操作したユーザー ID（分かる場合）
/// - `event.result`: [`event::result`]
#[macro_export]
macro_rules! log_business_event {
    ($($args:tt)*) => {
        ::tracing::info!(
            event.kind = "business_event",
            $($args)*
        )
    };
}

/// イベントフィールドの定数
pub mod event {
    /// イベントカテゴリ
    pub mod category {
        pub const BOOKING: &str = "booking";
        pub const AUTH: &str = "auth";
    }

    /// イベントアクション
    pub mod action {
        // 予約
        pub const BOOKING_CREATED: &str = "booking.created";
        pub const BOOKING_REJECTED: &str = "booking.rejected";
        pub const BOOKING_UPDATED: &str = "booking.updated";
        pub const BOOKING_DELETED: &str = "booking.deleted";

        // 認証
        pub const USER_REGISTERED: &str = "auth.user_registered";
        pub const LOGIN_SUCCESS: &str = "auth.login_success";
        pub const LOGIN_FAILURE: &str = "auth.login_failure";
    }

    /// エンティティ種別
    pub mod entity_type {
        pub const BOOKING: &str = "booking";
        pub const USER: &str = "user";
    }

    /// イベント結果
    pub mod result {
        pub const SUCCESS: &str = "success";
        pub const FAILURE: &str = "failure";
    }
}

/// エラーコンテキストフィールドの定数
///
/// `tracing::error!` に `error.category` と `error.kind` を直接付ける。
pub mod error {
    /// エラーカテゴリ
    pub mod category {
        /// インフラストラクチャ（DB、パスワードハッシュ）
        pub const INFRASTRUCTURE: &str = "infrastructure";
    }

    /// エラー種別
    pub mod kind {
        pub const DATABASE: &str = "database";
        pub const INTERNAL: &str = "internal";
        pub const PASSWORD_VERIFICATION: &str = "password_verification";
        pub const TOKEN_ISSUE: &str = "token_issue";
    }
}
