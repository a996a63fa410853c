//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュール（この `handler.rs`）で re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックはユースケース層に委譲

pub mod booking;
pub mod health;
pub mod user;

pub use booking::{
    BookingState,
    create_booking,
    delete_booking,
    get_booking,
    list_bookings,
    update_booking,
};
pub use health::{ReadinessState, health_check, readiness_check};
pub use user::{UserState, login, register_user};
