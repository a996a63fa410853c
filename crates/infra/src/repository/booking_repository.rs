//! # BookingRepository
//!
//! 予約の永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **同一日付の排他**: 時間帯の重複は `bookings_no_overlap` 排他制約で最終判定する。
//!   違反時は [`InfraErrorKind::Conflict`](crate::error::InfraErrorKind::Conflict) を返す
//! - **削除は冪等**: 存在しない ID の削除はエラーにせず `false` を返す
//! - **並び順**: 一覧は日付 → 開始時刻の昇順

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use slotbook_domain::{
   booking::{Booking, BookingDate, BookingId, TimeOfDay, TimeSlot},
   user::UserId,
};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::InfraError;

/// 予約リポジトリトレイト
#[async_trait]
pub trait BookingRepository: Send + Sync {
   /// すべての予約を取得する
   async fn find_all(&self) -> Result<Vec<Booking>, InfraError>;

   /// 指定日の予約を開始時刻順に取得する
   ///
   /// 重複判定のスナップショットとして使用する。
   async fn find_by_date(&self, date: &BookingDate) -> Result<Vec<Booking>, InfraError>;

   /// ID で予約を取得する
   ///
   /// # 戻り値
   ///
   /// - `Ok(Some(booking))`: 予約が見つかった場合
   /// - `Ok(None)`: 予約が見つからない場合
   async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, InfraError>;

   /// 予約を保存する
   ///
   /// 同じ日付で時間帯が重なる予約が既にあれば `Conflict` を返す。
   async fn insert(&self, booking: &Booking) -> Result<(), InfraError>;

   /// 予約の日付・時間枠・更新日時を上書きする
   ///
   /// # 戻り値
   ///
   /// - `Ok(Some(booking))`: 更新後の予約
   /// - `Ok(None)`: 予約が見つからない場合
   /// - `Err(_)`: 他の予約と重なる場合は `Conflict`
   async fn update(&self, booking: &Booking) -> Result<Option<Booking>, InfraError>;

   /// 予約を削除する
   ///
   /// 削除した場合は `true`、存在しなかった場合は `false` を返す。
   async fn delete(&self, id: &BookingId) -> Result<bool, InfraError>;
}

/// bookings テーブルの行
#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
   id:           Uuid,
   owner_id:     Uuid,
   booking_date: String,
   start_time:   String,
   end_time:     String,
   created_at:   DateTime<Utc>,
   updated_at:   DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
   type Error = InfraError;

   fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
      let date =
         BookingDate::new(row.booking_date).map_err(|e| InfraError::unexpected(e.to_string()))?;
      let start =
         TimeOfDay::new(row.start_time).map_err(|e| InfraError::unexpected(e.to_string()))?;
      let end = TimeOfDay::new(row.end_time).map_err(|e| InfraError::unexpected(e.to_string()))?;
      let slot = TimeSlot::new(start, end).map_err(|e| InfraError::unexpected(e.to_string()))?;

      Ok(Booking::from_db(
         BookingId::from_uuid(row.id),
         UserId::from_uuid(row.owner_id),
         date,
         slot,
         row.created_at,
         row.updated_at,
      ))
   }
}

const SELECT_COLUMNS: &str =
   "id, owner_id, booking_date, start_time, end_time, created_at, updated_at";

/// PostgreSQL 実装の BookingRepository
#[derive(Debug, Clone)]
pub struct PostgresBookingRepository {
   pool: PgPool,
}

impl PostgresBookingRepository {
   /// 新しいリポジトリインスタンスを作成
   pub fn new(pool: PgPool) -> Self {
      Self { pool }
   }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
   #[tracing::instrument(skip_all, level = "debug")]
   async fn find_all(&self) -> Result<Vec<Booking>, InfraError> {
      let rows = sqlx::query_as::<_, BookingRow>(&format!(
         "SELECT {SELECT_COLUMNS} FROM bookings ORDER BY booking_date, start_time"
      ))
      .fetch_all(&self.pool)
      .await?;

      rows.into_iter().map(Booking::try_from).collect()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%date))]
   async fn find_by_date(&self, date: &BookingDate) -> Result<Vec<Booking>, InfraError> {
      let rows = sqlx::query_as::<_, BookingRow>(&format!(
         "SELECT {SELECT_COLUMNS} FROM bookings WHERE booking_date = $1 ORDER BY start_time"
      ))
      .bind(date.as_str())
      .fetch_all(&self.pool)
      .await?;

      rows.into_iter().map(Booking::try_from).collect()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, InfraError> {
      let row = sqlx::query_as::<_, BookingRow>(&format!(
         "SELECT {SELECT_COLUMNS} FROM bookings WHERE id = $1"
      ))
      .bind(id.as_uuid())
      .fetch_optional(&self.pool)
      .await?;

      row.map(Booking::try_from).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(id = %booking.id()))]
   async fn insert(&self, booking: &Booking) -> Result<(), InfraError> {
      sqlx::query(
         r#"
            INSERT INTO bookings (
                id, owner_id, booking_date, start_time, end_time, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
      )
      .bind(booking.id().as_uuid())
      .bind(booking.owner().as_uuid())
      .bind(booking.date().as_str())
      .bind(booking.slot().start().as_str())
      .bind(booking.slot().end().as_str())
      .bind(booking.created_at())
      .bind(booking.updated_at())
      .execute(&self.pool)
      .await
      .map_err(|e| InfraError::from_write(e, "Booking", booking.id()))?;

      Ok(())
   }

   #[tracing::instrument(skip_all, level = "debug", fields(id = %booking.id()))]
   async fn update(&self, booking: &Booking) -> Result<Option<Booking>, InfraError> {
      let row = sqlx::query_as::<_, BookingRow>(&format!(
         r#"
            UPDATE bookings
            SET booking_date = $2, start_time = $3, end_time = $4, updated_at = $5
            WHERE id = $1
            RETURNING {SELECT_COLUMNS}
            "#
      ))
      .bind(booking.id().as_uuid())
      .bind(booking.date().as_str())
      .bind(booking.slot().start().as_str())
      .bind(booking.slot().end().as_str())
      .bind(booking.updated_at())
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| InfraError::from_write(e, "Booking", booking.id()))?;

      row.map(Booking::try_from).transpose()
   }

   #[tracing::instrument(skip_all, level = "debug", fields(%id))]
   async fn delete(&self, id: &BookingId) -> Result<bool, InfraError> {
      let result = sqlx::query("DELETE FROM bookings WHERE id = $1")
         .bind(id.as_uuid())
         .execute(&self.pool)
         .await?;

      Ok(result.rows_affected() > 0)
   }
}
