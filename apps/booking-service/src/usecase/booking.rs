//! 予約ユースケース
//!
//! 予約の作成・参照・変更・削除を行う。作成と変更は次の順で進む:
//!
//! 1. 対象日付の既存予約をストアから取得（スナップショット）
//! 2. [`validate`] / [`validate_update`] で順序と重複を判定
//! 3. ストアに保存
//!
//! 1 と 3 の間に別のリクエストが同じ時間帯を保存した場合は、ストアの排他制約が
//! 競合として報告し、ここで [`CoreError::TimeConflict`] に変換する。

use std::sync::Arc;

use slotbook_domain::{
   booking::{
      Booking,
      BookingCandidate,
      BookingDate,
      BookingId,
      BookingPatch,
      BookingRejection,
      TimeOfDay,
      validate,
      validate_update,
   },
   clock::Clock,
   user::UserId,
};
use slotbook_infra::{InfraError, repository::BookingRepository};
use slotbook_shared::{event_log::event, log_business_event};

use crate::error::CoreError;

/// 予約作成の入力
pub struct CreateBookingInput {
   pub owner: UserId,
   pub date:  BookingDate,
   pub start: TimeOfDay,
   pub end:   TimeOfDay,
}

/// 予約ユースケース
pub struct BookingUseCaseImpl {
   booking_repository: Arc<dyn BookingRepository>,
   clock:              Arc<dyn Clock>,
}

impl BookingUseCaseImpl {
   pub fn new(booking_repository: Arc<dyn BookingRepository>, clock: Arc<dyn Clock>) -> Self {
      Self {
         booking_repository,
         clock,
      }
   }

   /// 予約を作成する
   ///
   /// 所有者は認証済みユーザーから渡される値をそのまま使う。
   pub async fn create_booking(&self, input: CreateBookingInput) -> Result<Booking, CoreError> {
      let candidate = BookingCandidate::new(input.date, input.start, input.end);
      let existing = self.booking_repository.find_by_date(&candidate.date).await?;

      let slot = validate(&candidate, &existing)
         .inspect_err(|rejection| log_rejection(rejection, &input.owner, None))?;

      let booking = Booking::new(
         BookingId::new(),
         input.owner,
         candidate.date,
         slot,
         self.clock.now(),
      );

      self
         .booking_repository
         .insert(&booking)
         .await
         .map_err(|e| store_conflict(e, booking.owner(), None))?;

      log_business_event!(
         event.category = event::category::BOOKING,
         event.action = event::action::BOOKING_CREATED,
         event.entity_type = event::entity_type::BOOKING,
         event.entity_id = %booking.id(),
         event.actor_id = %booking.owner(),
         event.result = event::result::SUCCESS,
         booking.date = %booking.date(),
         booking.start_time = %booking.slot().start(),
         booking.end_time = %booking.slot().end(),
         "予約作成"
      );

      Ok(booking)
   }

   /// 全予約を取得する
   pub async fn list_bookings(&self) -> Result<Vec<Booking>, CoreError> {
      Ok(self.booking_repository.find_all().await?)
   }

   /// ID で予約を取得する
   pub async fn get_booking(&self, id: &BookingId) -> Result<Booking, CoreError> {
      self
         .booking_repository
         .find_by_id(id)
         .await?
         .ok_or_else(|| not_found(id))
   }

   /// 予約の日付・時刻を変更する
   ///
   /// 変更後の値で順序と重複を再検証する。変更対象の予約自身は重複判定から除く。
   pub async fn update_booking(
      &self,
      id: &BookingId,
      patch: BookingPatch,
      actor: &UserId,
   ) -> Result<Booking, CoreError> {
      let current = self.get_booking(id).await?;
      let candidate = current.merged_with(&patch);
      let existing = self.booking_repository.find_by_date(&candidate.date).await?;

      let slot = validate_update(&candidate, &existing, id)
         .inspect_err(|rejection| log_rejection(rejection, actor, Some(id)))?;

      let updated = current.rescheduled(candidate.date, slot, self.clock.now());

      let saved = self
         .booking_repository
         .update(&updated)
         .await
         .map_err(|e| store_conflict(e, actor, Some(id)))?
         .ok_or_else(|| not_found(id))?;

      log_business_event!(
         event.category = event::category::BOOKING,
         event.action = event::action::BOOKING_UPDATED,
         event.entity_type = event::entity_type::BOOKING,
         event.entity_id = %id,
         event.actor_id = %actor,
         event.result = event::result::SUCCESS,
         booking.date = %saved.date(),
         booking.start_time = %saved.slot().start(),
         booking.end_time = %saved.slot().end(),
         "予約変更"
      );

      Ok(saved)
   }

   /// 予約を削除する
   ///
   /// 存在しない ID でも成功として扱う（冪等）。実際に削除したかはログに残す。
   pub async fn delete_booking(&self, id: &BookingId, actor: &UserId) -> Result<(), CoreError> {
      let existed = self.booking_repository.delete(id).await?;

      log_business_event!(
         event.category = event::category::BOOKING,
         event.action = event::action::BOOKING_DELETED,
         event.entity_type = event::entity_type::BOOKING,
         event.entity_id = %id,
         event.actor_id = %actor,
         event.result = event::result::SUCCESS,
         booking.existed = existed,
         "予約削除"
      );

      Ok(())
   }
}

fn not_found(id: &BookingId) -> CoreError {
   CoreError::NotFound(format!("Booking not found: {id}"))
}

/// ストアの排他制約違反を時間帯重複として扱う
fn store_conflict(error: InfraError, actor: &UserId, id: Option<&BookingId>) -> CoreError {
   if !error.is_conflict() {
      return CoreError::Database(error);
   }
   let rejection = BookingRejection::TimeConflict { conflicting: None };
   log_rejection(&rejection, actor, id);
   rejection.into()
}

fn log_rejection(rejection: &BookingRejection, actor: &UserId, id: Option<&BookingId>) {
   log_business_event!(
      event.category = event::category::BOOKING,
      event.action = event::action::BOOKING_REJECTED,
      event.entity_type = event::entity_type::BOOKING,
      event.entity_id = id.map(tracing::field::display),
      event.actor_id = %actor,
      event.result = event::result::FAILURE,
      booking.rejection = rejection.kind(),
      "予約拒否: {}",
      rejection
   );
}
