//! # 予約バリデーション
//!
//! 予約候補を受け付けてよいかを判定する。I/O を持たない純粋関数で、
//! 同じ入力に対しては常に同じ結果を返す。
//!
//! ## 判定ルール
//!
//! 1. **順序**: `start >= end` なら [`BookingRejection::InvalidRange`]
//! 2. **重複**: 同じ日付の既存予約 `e` について
//!    `candidate.start < e.end && e.start < candidate.end` が成り立てば
//!    [`BookingRejection::TimeConflict`]
//!
//! 区間は半開区間 `[start, end)` として扱うため、終了時刻と開始時刻が一致する
//! 連続した予約は重ならない。既存予約の内側に完全に収まる候補も重複として検出する。
//!
//! 既存予約の一覧はストアから取得したスナップショットで、このモジュールは保持しない。
//! 同時実行時の最終的な排他はストア側の制約で行う。

use super::{Booking, BookingCandidate, BookingId, BookingRejection, TimeSlot};

/// 新規予約の候補を検証する
///
/// 受付可能なら検証済みの [`TimeSlot`] を返す。
/// `existing` に別の日付の予約が含まれていても、それらは判定に使わない。
pub fn validate(
    candidate: &BookingCandidate,
    existing: &[Booking],
) -> Result<TimeSlot, BookingRejection> {
    check(candidate, existing, None)
}

/// 更新後の予約候補を検証する
///
/// 更新対象の予約自身（`self_id`）は重複判定から除外する。
pub fn validate_update(
    candidate: &BookingCandidate,
    existing: &[Booking],
    self_id: &BookingId,
) -> Result<TimeSlot, BookingRejection> {
    check(candidate, existing, Some(self_id))
}

fn check(
    candidate: &BookingCandidate,
    existing: &[Booking],
    exclude: Option<&BookingId>,
) -> Result<TimeSlot, BookingRejection> {
    let slot = TimeSlot::new(candidate.start.clone(), candidate.end.clone())?;

    let conflict = existing
        .iter()
        .filter(|e| e.date() == &candidate.date)
        .filter(|e| Some(e.id()) != exclude)
        .find(|e| e.slot().overlaps(&slot));

    if let Some(conflict) = conflict {
        return Err(BookingRejection::TimeConflict {
            conflicting: Some(conflict.id().clone()),
        });
    }

    Ok(slot)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::{
        booking::{BookingDate, TimeOfDay},
        user::UserId,
    };

    fn candidate(date: &str, start: &str, end: &str) -> BookingCandidate {
        BookingCandidate::new(
            BookingDate::new(date).unwrap(),
            TimeOfDay::new(start).unwrap(),
            TimeOfDay::new(end).unwrap(),
        )
    }

    fn stored(date: &str, start: &str, end: &str) -> Booking {
        Booking::new(
            BookingId::new(),
            UserId::new(),
            BookingDate::new(date).unwrap(),
            TimeSlot::new(TimeOfDay::new(start).unwrap(), TimeOfDay::new(end).unwrap()).unwrap(),
            Utc::now(),
        )
    }

    #[fixture]
    fn evening() -> Vec<Booking> {
        vec![stored("2024-12-21", "21:30", "22:00")]
    }

    #[rstest]
    fn test_途中から重なる候補は時間帯重複になる(evening: Vec<Booking>) {
        let result = validate(&candidate("2024-12-21", "21:45", "22:15"), &evening);

        assert_eq!(
            result,
            Err(BookingRejection::TimeConflict {
                conflicting: Some(evening[0].id().clone()),
            })
        );
    }

    #[rstest]
    fn test_終了時刻から始まる連続した候補は受け付ける(evening: Vec<Booking>) {
        let result = validate(&candidate("2024-12-21", "22:00", "22:30"), &evening);

        assert!(result.is_ok());
    }

    #[rstest]
    #[case("10:00", "09:00")]
    #[case("09:00", "09:00")]
    fn test_開始が終了以上なら既存予約に関係なく範囲不正になる(
        evening: Vec<Booking>,
        #[case] start: &str,
        #[case] end: &str,
    ) {
        for existing in [vec![], evening] {
            let result = validate(&candidate("2024-12-21", start, end), &existing);
            assert!(matches!(
                result,
                Err(BookingRejection::InvalidRange { .. })
            ));
        }
    }

    #[rstest]
    #[case("21:00", "21:45")] // 前から重なる
    #[case("21:40", "21:50")] // 既存の内側に収まる（境界を共有しない）
    #[case("21:00", "23:00")] // 既存を包含する
    #[case("21:30", "22:00")] // 完全一致
    #[case("21:30", "21:31")] // 開始が一致
    fn test_半開区間で重なる候補は全て時間帯重複になる(
        evening: Vec<Booking>,
        #[case] start: &str,
        #[case] end: &str,
    ) {
        let result = validate(&candidate("2024-12-21", start, end), &evening);

        assert!(matches!(
            result,
            Err(BookingRejection::TimeConflict { .. })
        ));
    }

    #[rstest]
    fn test_別の日付の予約とは重ならない(evening: Vec<Booking>) {
        let result = validate(&candidate("2024-12-22", "21:30", "22:00"), &evening);

        assert!(result.is_ok());
    }

    #[rstest]
    #[case(("09:00", "10:00"), ("10:00", "11:00"))]
    #[case(("13:00", "14:00"), ("08:00", "09:30"))]
    fn test_重ならない2件はどちらの順序でも受け付ける(
        #[case] a: (&str, &str),
        #[case] b: (&str, &str),
    ) {
        let first_a = vec![stored("2024-12-21", a.0, a.1)];
        let first_b = vec![stored("2024-12-21", b.0, b.1)];

        assert!(validate(&candidate("2024-12-21", b.0, b.1), &first_a).is_ok());
        assert!(validate(&candidate("2024-12-21", a.0, a.1), &first_b).is_ok());
    }

    #[rstest]
    fn test_同じ入力に対して同じ結果を返す(evening: Vec<Booking>) {
        let target = candidate("2024-12-21", "21:45", "22:15");

        assert_eq!(validate(&target, &evening), validate(&target, &evening));
    }

    #[rstest]
    fn test_受け付けた場合は検証済みの時間枠を返す() {
        let slot = validate(&candidate("2024-12-21", "09:00", "10:00"), &[]).unwrap();

        assert_eq!(slot.start().as_str(), "09:00");
        assert_eq!(slot.end().as_str(), "10:00");
    }

    #[rstest]
    fn test_更新時は自分自身との重複を無視する(evening: Vec<Booking>) {
        let self_id = evening[0].id().clone();

        let result = validate_update(&candidate("2024-12-21", "21:45", "22:15"), &evening, &self_id);

        assert!(result.is_ok());
    }

    #[rstest]
    fn test_更新時も他の予約との重複は検出する(evening: Vec<Booking>) {
        let other = stored("2024-12-21", "09:00", "10:00");
        let mut existing = evening;
        existing.push(other.clone());

        let result = validate_update(
            &candidate("2024-12-21", "09:30", "10:30"),
            &existing,
            existing[0].id(),
        );

        assert_eq!(
            result,
            Err(BookingRejection::TimeConflict {
                conflicting: Some(other.id().clone()),
            })
        );
    }
}
