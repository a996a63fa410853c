//! # リポジトリ実装
//!
//! 予約とユーザーの永続化を担当する。ユースケース層はトレイト経由で利用し、
//! 本番では PostgreSQL 実装、テストでは [`crate::mock`] のインメモリ実装を注入する。

pub mod booking_repository;
pub mod user_repository;

pub use booking_repository::{BookingRepository, PostgresBookingRepository};
pub use user_repository::{PostgresUserRepository, UserRepository};
