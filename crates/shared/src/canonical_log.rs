//! # Canonical Log Line
//!
//! リクエスト完了時にステータス・レイテンシ・結果区分を 1 行にまとめて出力する。
//! `TraceLayer::on_response` に渡して使う:
//!
//! ```rust,ignore
//! TraceLayer::new_for_http()
//!     .make_span_with(make_request_span)
//!     .on_response(CanonicalLogLine)
//!     .on_failure(())
//! ```
//!
//! イベントはリクエストスパン内で記録されるため、`method` / `uri` / `request_id` /
//! `user_id` はスパンフィールドとして同じログ行に載る。
//! [`make_request_span`](crate::observability::make_request_span) が無効スパンを返す
//! ヘルスチェックでは何も出力しない。

use std::time::Duration;

use http::{Response, StatusCode};
use tower_http::trace::OnResponse;
use tracing::Span;

/// レスポンスの結果区分
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// 2xx / 3xx
    Success,
    /// 4xx（入力不正・認証失敗・予約の競合など）
    Rejected,
    /// 5xx
    Failed,
}

impl Outcome {
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_server_error() {
            Self::Failed
        } else if status.is_client_error() {
            Self::Rejected
        } else {
            Self::Success
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
        }
    }
}

/// リクエスト完了サマリを出力する `OnResponse` 実装
///
/// 5xx は ERROR、それ以外は INFO で出力する。
#[derive(Debug, Clone, Copy, Default)]
pub struct CanonicalLogLine;

impl<B> OnResponse<B> for CanonicalLogLine {
    fn on_response(self, response: &Response<B>, latency: Duration, span: &Span) {
        if span.is_disabled() {
            return;
        }

        let status = response.status();
        let outcome = Outcome::from_status(status);
        let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);

        match outcome {
            Outcome::Failed => tracing::error!(
                log.r#type = "canonical",
                http.status_code = status.as_u16(),
                http.latency_ms = latency_ms,
                http.outcome = outcome.as_str(),
                "リクエスト完了"
            ),
            Outcome::Success | Outcome::Rejected => tracing::info!(
                log.r#type = "canonical",
                http.status_code = status.as_u16(),
                http.latency_ms = latency_ms,
                http.outcome = outcome.as_str(),
                "リクエスト完了"
            ),
        }
    }
}
