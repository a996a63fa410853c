//! # ユーザー
//!
//! ユーザーエンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 備考 |
//! |---|------------|------|
//! | [`User`] | ユーザー | 予約の所有者。登録後は変更・削除されない |
//! | [`Email`] | メールアドレス | システム全体で一意、小文字に正規化 |
//! | [`UserName`] | ユーザー表示名 | PII として Debug 出力をマスク |
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use slotbook_domain::{
//!     password::PasswordHash,
//!     user::{Email, User, UserId, UserName},
//! };
//!
//! let user = User::new(
//!     UserId::new(),
//!     UserName::new("山田太郎")?,
//!     Email::new("Taro@Example.com")?,
//!     PasswordHash::new("$argon2id$v=19$..."),
//!     chrono::Utc::now(),
//! );
//! assert_eq!(user.email().as_str(), "taro@example.com");
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{DomainError, password::PasswordHash};

define_uuid_id! {
    /// ユーザー ID
    ///
    /// 認証トークンの `sub` クレームにも使われる。
    pub struct UserId;
}

define_validated_string! {
    /// ユーザー表示名（最大 100 文字）
    pub struct UserName {
        label: "ユーザー名",
        max_length: 100,
        pii: true,
    }
}

/// メールアドレス（値オブジェクト）
///
/// 比較と一意性判定のため、前後の空白を除去し小文字に正規化して保持する。
/// 生成は [`Email::new`] のみで、デシリアライズでは作れない:
///
/// ```compile_fail
/// fn deserializable<T: serde::de::DeserializeOwned>() {}
/// deserializable::<slotbook_domain::user::Email>();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `local@domain` の形式（`@` はちょうど 1 つ、両側が空でない）
    /// - ドメイン部に `.` を含む
    /// - 最大 255 文字
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into().trim().to_lowercase();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        };

        if local.is_empty()
            || domain.is_empty()
            || domain.contains('@')
            || !domain.contains('.')
            || domain.starts_with('.')
            || domain.ends_with('.')
            || value.chars().any(char::is_whitespace)
        {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        }

        if value.len() > 255 {
            return Err(DomainError::Validation(
                "メールアドレスは255文字以内である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// ユーザーエンティティ
///
/// # 不変条件
///
/// - `email` はシステム全体で一意（ストアの一意制約で保証）
/// - パスワードは一方向ハッシュとしてのみ保持する
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id:            UserId,
    name:          UserName,
    email:         Email,
    password_hash: PasswordHash,
    created_at:    DateTime<Utc>,
}

impl User {
    /// 新しいユーザーを作成する
    pub fn new(
        id: UserId,
        name: UserName,
        email: Email,
        password_hash: PasswordHash,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            created_at: now,
        }
    }

    /// 既存のデータから復元する
    pub fn from_db(
        id: UserId,
        name: UserName,
        email: Email,
        password_hash: PasswordHash,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            password_hash,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
