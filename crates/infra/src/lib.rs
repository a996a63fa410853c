//! # Slotbook インフラ層
//!
//! PostgreSQL との接続と、ドメインオブジェクトの永続化を担当する。
//!
//! ## 責務
//!
//! - **データベース接続**: 接続プールの作成、マイグレーション、疎通確認
//! - **リポジトリ実装**: 予約・ユーザーの保存と取得
//! - **パスワードハッシュ**: Argon2id によるハッシュ化と検証
//!
//! ## 依存関係
//!
//! ```text
//! booking-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`password`] - パスワードのハッシュ化と検証
//! - [`repository`] - リポジトリ実装
//! - `mock` - インメモリのモックリポジトリ（`test-utils` feature）

pub mod db;
pub mod error;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod password;
pub mod repository;

pub use error::{InfraError, InfraErrorKind};
pub use password::{Argon2PasswordChecker, PasswordChecker, PasswordHasher};
