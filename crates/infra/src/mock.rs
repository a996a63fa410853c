//! # テスト用モックリポジトリ
//!
//! ユースケーステストで使用するインメモリモックリポジトリ。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! slotbook-infra = { workspace = true, features = ["test-utils"] }
//! ```
//!
//! PostgreSQL の制約と同じ判定をロックの内側で行うため、
//! 同時実行時の振る舞い（重なる予約は 1 件しか保存されない）もここで再現できる。

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use slotbook_domain::{
   booking::{Booking, BookingDate, BookingId},
   user::{Email, User, UserId},
};

use crate::{
   error::InfraError,
   repository::{BookingRepository, UserRepository},
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
   mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// 同じ日付で時間帯が重なる予約があるか（`exclude` 自身は除く）
fn overlaps_any(bookings: &[Booking], target: &Booking, exclude: Option<&BookingId>) -> bool {
   bookings
      .iter()
      .filter(|b| Some(b.id()) != exclude)
      .any(|b| b.date() == target.date() && b.slot().overlaps(target.slot()))
}

// ===== MockBookingRepository =====

#[derive(Clone, Default)]
pub struct MockBookingRepository {
   bookings: Arc<Mutex<Vec<Booking>>>,
}

impl MockBookingRepository {
   pub fn new() -> Self {
      Self::default()
   }

   /// 重複チェックを通さずに予約を直接追加する
   pub fn add_booking(&self, booking: Booking) {
      lock(&self.bookings).push(booking);
   }

   /// 保存済みの予約のスナップショット
   pub fn bookings(&self) -> Vec<Booking> {
      lock(&self.bookings).clone()
   }
}

#[async_trait]
impl BookingRepository for MockBookingRepository {
   async fn find_all(&self) -> Result<Vec<Booking>, InfraError> {
      let mut bookings = lock(&self.bookings).clone();
      bookings.sort_by(|a, b| {
         (a.date(), a.slot().start()).cmp(&(b.date(), b.slot().start()))
      });
      Ok(bookings)
   }

   async fn find_by_date(&self, date: &BookingDate) -> Result<Vec<Booking>, InfraError> {
      let mut bookings: Vec<Booking> = lock(&self.bookings)
         .iter()
         .filter(|b| b.date() == date)
         .cloned()
         .collect();
      bookings.sort_by(|a, b| a.slot().start().cmp(b.slot().start()));
      Ok(bookings)
   }

   async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, InfraError> {
      Ok(lock(&self.bookings)
         .iter()
         .find(|b| b.id() == id)
         .cloned())
   }

   async fn insert(&self, booking: &Booking) -> Result<(), InfraError> {
      let mut bookings = lock(&self.bookings);
      if overlaps_any(&bookings, booking, None) {
         return Err(InfraError::conflict("Booking", booking.id().to_string()));
      }
      bookings.push(booking.clone());
      Ok(())
   }

   async fn update(&self, booking: &Booking) -> Result<Option<Booking>, InfraError> {
      let mut bookings = lock(&self.bookings);
      let Some(index) = bookings.iter().position(|b| b.id() == booking.id()) else {
         return Ok(None);
      };
      if overlaps_any(&bookings, booking, Some(booking.id())) {
         return Err(InfraError::conflict("Booking", booking.id().to_string()));
      }
      bookings[index] = booking.clone();
      Ok(Some(booking.clone()))
   }

   async fn delete(&self, id: &BookingId) -> Result<bool, InfraError> {
      let mut bookings = lock(&self.bookings);
      let before = bookings.len();
      bookings.retain(|b| b.id() != id);
      Ok(bookings.len() < before)
   }
}

// ===== MockUserRepository =====

#[derive(Clone, Default)]
pub struct MockUserRepository {
   users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepository {
   pub fn new() -> Self {
      Self::default()
   }

   pub fn add_user(&self, user: User) {
      lock(&self.users).push(user);
   }
}

#[async_trait]
impl UserRepository for MockUserRepository {
   async fn find_by_email(&self, email: &Email) -> Result<Option<User>, InfraError> {
      Ok(lock(&self.users)
         .iter()
         .find(|u| u.email() == email)
         .cloned())
   }

   async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, InfraError> {
      Ok(lock(&self.users).iter().find(|u| u.id() == id).cloned())
   }

   async fn insert(&self, user: &User) -> Result<(), InfraError> {
      let mut users = lock(&self.users);
      if users.iter().any(|u| u.email() == user.email()) {
         return Err(InfraError::conflict("User", user.id().to_string()));
      }
      users.push(user.clone());
      Ok(())
   }
}
