//! テスト共通フィクスチャ
//!
//! DB を使用する統合テストで共通利用するヘルパー。
//! Rust の統合テスト規約に従い `tests/common/mod.rs` に配置。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use chrono::{DateTime, Utc};
use slotbook_domain::{
    booking::{Booking, BookingDate, BookingId, TimeOfDay, TimeSlot},
    password::PasswordHash,
    user::{Email, User, UserId, UserName},
};
use slotbook_infra::repository::{PostgresUserRepository, UserRepository};
use sqlx::PgPool;

/// テスト用の固定日時
pub fn test_now() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

/// テスト用のダミーハッシュ
pub const TEST_PASSWORD_HASH: &str = "$argon2id$v=19$m=65536,t=1,p=1$dGVzdA$dGVzdA";

/// ユーザーを作成して保存する
pub async fn insert_test_user(pool: &PgPool, email: &str) -> User {
    let user = User::new(
        UserId::new(),
        UserName::new("テストユーザー").unwrap(),
        Email::new(email).unwrap(),
        PasswordHash::new(TEST_PASSWORD_HASH),
        test_now(),
    );
    PostgresUserRepository::new(pool.clone())
        .insert(&user)
        .await
        .expect("ユーザー作成に失敗");
    user
}

/// 予約エンティティを作成する（保存はしない）
pub fn build_booking(owner: &UserId, date: &str, start: &str, end: &str) -> Booking {
    Booking::new(
        BookingId::new(),
        owner.clone(),
        BookingDate::new(date).unwrap(),
        TimeSlot::new(TimeOfDay::new(start).unwrap(), TimeOfDay::new(end).unwrap()).unwrap(),
        test_now(),
    )
}
