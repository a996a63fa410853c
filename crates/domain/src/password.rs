//! # パスワード
//!
//! パスワード関連の値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 用途 |
//! |---|------------|------|
//! | [`PlainPassword`] | 平文パスワード | 登録・ログイン時の入力値 |
//! | [`PasswordHash`] | パスワードハッシュ | 永続化用のハッシュ値 |
//! | [`PasswordVerifyResult`] | 検証結果 | パスワード検証の成否 |

use crate::DomainError;

/// 登録時に要求するパスワードの最小文字数
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// 登録時に許容するパスワードの最大文字数
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// 平文パスワード
///
/// Debug 出力では値をマスクする。平文はハッシュ化か検証にのみ使い、保存しない。
#[derive(Clone)]
pub struct PlainPassword(String);

impl std::fmt::Debug for PlainPassword {
   fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      f.debug_tuple("PlainPassword").field(&"[REDACTED]").finish()
   }
}

impl PlainPassword {
   /// ログイン入力としてパスワードを作成する
   ///
   /// ログイン時は長さを検証しない（既存ハッシュとの照合結果だけが意味を持つ）。
   pub fn new(value: impl Into<String>) -> Self {
      Self(value.into())
   }

   /// 新規登録用のパスワードを作成する
   ///
   /// # エラー
   ///
   /// 文字数が [`MIN_PASSWORD_LENGTH`] 未満、または [`MAX_PASSWORD_LENGTH`] を
   /// 超える場合は `DomainError::Validation` を返す。
   pub fn for_registration(value: impl Into<String>) -> Result<Self, DomainError> {
      let value = value.into();
      let length = value.chars().count();

      if length < MIN_PASSWORD_LENGTH {
         return Err(DomainError::Validation(format!(
            "パスワードは {} 文字以上である必要があります",
            MIN_PASSWORD_LENGTH
         )));
      }
      if length > MAX_PASSWORD_LENGTH {
         return Err(DomainError::Validation(format!(
            "パスワードは {} 文字以内である必要があります",
            MAX_PASSWORD_LENGTH
         )));
      }

      Ok(Self(value))
   }

   /// 文字列参照を取得する
   pub fn as_str(&self) -> &str {
      &self.0
   }
}

/// パスワードハッシュ（Argon2id の PHC 文字列）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
   /// ハッシュ文字列からインスタンスを作成する
   pub fn new(hash: impl Into<String>) -> Self {
      Self(hash.into())
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

/// パスワード検証結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordVerifyResult {
   /// パスワードが一致した
   Match,
   /// パスワードが一致しなかった
   Mismatch,
}

impl PasswordVerifyResult {
   /// 一致したかどうかを返す
   pub fn is_match(&self) -> bool {
      matches!(self, Self::Match)
   }
}

impl From<bool> for PasswordVerifyResult {
   fn from(matched: bool) -> Self {
      if matched { Self::Match } else { Self::Mismatch }
   }
}
