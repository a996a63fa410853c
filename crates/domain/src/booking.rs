//! # 予約
//!
//! 時間枠の予約と、その受付可否を判定するバリデーションを定義する。
//!
//! ## 概念モデル
//!
//! - **BookingCandidate**: 受付前の予約候補（日付 + 開始・終了時刻）
//! - **TimeSlot**: `start < end` が保証された半開区間 `[start, end)`
//! - **Booking**: 受付済みでストアに保存される予約
//!
//! ## 状態遷移
//!
//! ```text
//! Proposed ──validate──▶ Accepted ──insert──▶ Stored ──update──▶ Stored
//!     │                                         │
//!     └──────────▶ Rejected                     └──delete──▶ Deleted（終端）
//! ```
//!
//! 日付と時刻は不透明な文字列として扱い、辞書順で比較する。
//! タイムゾーンやカレンダーの解釈は行わない。

mod entity;
mod slot;
mod validator;

pub use entity::*;
pub use slot::*;
pub use validator::*;
