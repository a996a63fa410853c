//! # UserRepository
//!
//! ユーザー情報の永続化を担当するリポジトリ。
//!
//! メールアドレスの一意性は `users_email_key` 一意インデックスで保証する。
//! 同じメールアドレスでの同時登録は、後から INSERT した側が `Conflict` になる。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slotbook_domain::{
   password::PasswordHash,
   user::{Email, User, UserId, UserName},
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// ユーザーリポジトリトレイト
#[async_trait]
pub trait UserRepository: Send + Sync {
   /// メールアドレスでユーザーを検索
   ///
   /// # 戻り値
   ///
   /// - `Ok(Some(user))`: ユーザーが見つかった場合
   /// - `Ok(None)`: ユーザーが見つからない場合
   /// - `Err(_)`: データベースエラー
   async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError>;

   /// ID でユーザーを検索
   async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError>;

   /// ユーザーを保存する
   ///
   /// メールアドレスが登録済みの場合は `Conflict` を返す。
   async fn insert(&self, user: &User) -> Result<(), InfraError>;
}

/// users テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
   id:            Uuid,
   name:          String,
   email:         String,
   password_hash: String,
   created_at:    DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
   type Error = InfraError;

   fn try_from(row: UserRow) -> Result<Self, Self::Error> {
      Ok(User::from_db(
         UserId::from_uuid(row.id),
         UserName::new(row.name).map_err(|e| InfraError::unexpected(e.to_string()))?,
         Email::new(row.email).map_err(|e| InfraError::unexpected(e.to_string()))?,
         PasswordHash::new(row.password_hash),
         row.created_at,
      ))
   }
}

/// PostgreSQL 実装の UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
   pool: PgPool,
}

impl PostgresUserRepository {
   /// 新しいリポジトリインスタンスを作成
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
   #[tracing::instrument(skip_all, level = "debug")]
   async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError> {
      let row = sqlx::query_as::<_, UserRow>(
         r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
      )
      .bind(email.as_str())
      .fetch_optional(&self.pool)
      .await?;

      row.map(User::try_from).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError> {
      let row = sqlx::query_as::<_, UserRow>(
         r#"
            SELECT id, name, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
      )
      .bind(id.as_uuid())
      .fetch_optional(&self.pool)
      .await?;

      row.map(User::try_from).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(id = %user.id()))]
   async fn insert(&self, user: &User) -> Result<(), InfraError> {
      sqlx::query(
         r#"
            INSERT INTO users (id, name, email, password_hash, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
      )
      .bind(user.id().as_uuid())
      .bind(user.name().as_str())
      .bind(user.email().as_str())
      .bind(user.password_hash().as_str())
      .bind(user.created_at())
      .execute(&self.pool)
      .await
      .map_err(|e| InfraError::from_write(e, "User", user.id()))?;

      Ok(())
   }
}
