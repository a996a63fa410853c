//! 予約エンティティ

use chrono::{DateTime, Utc};

use super::{BookingDate, TimeOfDay, TimeSlot};
use crate::user::UserId;

define_uuid_id! {
    /// 予約 ID
    ///
    /// 作成時に採番され、以後変更・再利用されない。
    pub struct BookingId;
}

/// 受付前の予約候補
///
/// 時刻の前後関係はまだ検証されていない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingCandidate {
    pub date:  BookingDate,
    pub start: TimeOfDay,
    pub end:   TimeOfDay,
}

impl BookingCandidate {
    pub fn new(date: BookingDate, start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { date, start, end }
    }
}

/// 予約の部分更新
///
/// `None` のフィールドは現在の値を維持する。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingPatch {
    pub date:  Option<BookingDate>,
    pub start: Option<TimeOfDay>,
    pub end:   Option<TimeOfDay>,
}

/// 予約エンティティ
///
/// # 不変条件
///
/// - `slot` は `start < end` を満たす（[`TimeSlot`] が保証）
/// - 同じ `date` の予約同士で `slot` が重ならない（バリデーションとストアの排他制約で保証）
/// - `owner` は認証済みユーザーから導出され、クライアントの申告値は使わない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    id:         BookingId,
    date:       BookingDate,
    slot:       TimeSlot,
    owner:      UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Booking {
    /// 受付済みの時間枠から新しい予約を作成する
    pub fn new(
        id: BookingId,
        owner: UserId,
        date: BookingDate,
        slot: TimeSlot,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            date,
            slot,
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// 既存のデータから復元する
    pub fn from_db(
        id: BookingId,
        owner: UserId,
        date: BookingDate,
        slot: TimeSlot,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            date,
            slot,
            owner,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &BookingId {
        &self.id
    }

    pub fn date(&self) -> &BookingDate {
        &self.date
    }

    pub fn slot(&self) -> &TimeSlot {
        &self.slot
    }

    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// 部分更新を適用した予約候補を返す
    ///
    /// 返り値は未検証の候補なので、保存前に再度バリデーションを通す必要がある。
    pub fn merged_with(&self, patch: &BookingPatch) -> BookingCandidate {
        BookingCandidate {
            date:  patch.date.clone().unwrap_or_else(|| self.date.clone()),
            start: patch.start.clone().unwrap_or_else(|| self.slot.start().clone()),
            end:   patch.end.clone().unwrap_or_else(|| self.slot.end().clone()),
        }
    }

    /// 日付と時間枠を差し替えた新しいインスタンスを返す
    pub fn rescheduled(self, date: BookingDate, slot: TimeSlot, now: DateTime<Utc>) -> Self {
        Self {
            date,
            slot,
            updated_at: now,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 3, 15, 16, 54).unwrap()
    }

    #[fixture]
    fn booking(now: DateTime<Utc>) -> Booking {
        Booking::new(
            BookingId::new(),
            UserId::new(),
            BookingDate::new("2024-12-21").unwrap(),
            TimeSlot::new(
                TimeOfDay::new("21:30").unwrap(),
                TimeOfDay::new("22:00").unwrap(),
            )
            .unwrap(),
            now,
        )
    }

    #[rstest]
    fn test_新規予約の作成日時と更新日時は同じ(booking: Booking, now: DateTime<Utc>) {
        assert_eq!(booking.created_at(), now);
        assert_eq!(booking.updated_at(), now);
    }

    #[rstest]
    fn test_空のパッチは現在の値をそのまま候補にする(booking: Booking) {
        let candidate = booking.merged_with(&BookingPatch::default());

        assert_eq!(candidate.date, *booking.date());
        assert_eq!(candidate.start, *booking.slot().start());
        assert_eq!(candidate.end, *booking.slot().end());
    }

    #[rstest]
    fn test_終了時刻だけのパッチは他のフィールドを維持する(booking: Booking) {
        let patch = BookingPatch {
            end: Some(TimeOfDay::new("23:00").unwrap()),
            ..Default::default()
        };

        let candidate = booking.merged_with(&patch);

        assert_eq!(
            candidate,
            BookingCandidate::new(
                BookingDate::new("2024-12-21").unwrap(),
                TimeOfDay::new("21:30").unwrap(),
                TimeOfDay::new("23:00").unwrap(),
            )
        );
    }

    #[rstest]
    fn test_再スケジュールはidと所有者と作成日時を維持する(booking: Booking, now: DateTime<Utc>) {
        let later = now + chrono::Duration::hours(1);
        let original = booking.clone();
        let slot = TimeSlot::new(
            TimeOfDay::new("09:00").unwrap(),
            TimeOfDay::new("10:00").unwrap(),
        )
        .unwrap();

        let updated = booking.rescheduled(BookingDate::new("2024-12-22").unwrap(), slot.clone(), later);

        assert_eq!(updated.id(), original.id());
        assert_eq!(updated.owner(), original.owner());
        assert_eq!(updated.created_at(), now);
        assert_eq!(updated.updated_at(), later);
        assert_eq!(updated.slot(), &slot);
        assert_eq!(updated.date().as_str(), "2024-12-22");
    }
}
