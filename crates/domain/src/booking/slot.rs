//! 予約の日付・時刻・時間枠

use serde::Serialize;
use strum::IntoStaticStr;
use thiserror::Error;

use super::BookingId;

define_validated_string! {
    /// 予約日（例: `2024-12-21`）
    ///
    /// 同じ日付の予約同士だけが重複判定の対象になる。
    pub struct BookingDate {
        label: "日付",
        max_length: 32,
        ordered: true,
    }
}

define_validated_string! {
    /// 時刻（例: `21:30`）
    ///
    /// 文字列の辞書順で比較するため、`HH:mm` のようなゼロ埋め固定幅の表記を前提とする。
    pub struct TimeOfDay {
        label: "時刻",
        max_length: 32,
        ordered: true,
    }
}

/// 予約の受付を拒否する理由
#[derive(Debug, Clone, PartialEq, Eq, Error, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum BookingRejection {
    /// 開始時刻が終了時刻以上
    #[error("開始時刻は終了時刻より前である必要があります（{start} - {end}）")]
    InvalidRange { start: TimeOfDay, end: TimeOfDay },

    /// 同じ日付の既存予約と時間帯が重なっている
    ///
    /// ストアの排他制約で検出した場合は相手の ID が分からないため `None` になる。
    #[error("指定の時間帯は別の予約と重複しています")]
    TimeConflict { conflicting: Option<BookingId> },
}

impl BookingRejection {
    /// ログ・メトリクス用の種別名（`invalid_range` / `time_conflict`）
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

/// 時間枠（半開区間 `[start, end)`）
///
/// # 不変条件
///
/// - `start < end`
///
/// 生成は [`TimeSlot::new`] のみ。デシリアライズでは作れない:
///
/// ```compile_fail
/// fn deserializable<T: serde::de::DeserializeOwned>() {}
/// deserializable::<slotbook_domain::booking::TimeSlot>();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TimeSlot {
    start: TimeOfDay,
    end:   TimeOfDay,
}

impl TimeSlot {
    /// 時間枠を作成する
    ///
    /// `start >= end` の場合は [`BookingRejection::InvalidRange`] を返す。
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, BookingRejection> {
        if start >= end {
            return Err(BookingRejection::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> &TimeOfDay {
        &self.start
    }

    pub fn end(&self) -> &TimeOfDay {
        &self.end
    }

    /// 2 つの時間枠が重なるかを判定する
    ///
    /// 終了時刻は含まないため、`21:30-22:00` と `22:00-22:30` は重ならない。
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }
}
