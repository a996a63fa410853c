//! # アプリケーション構築
//!
//! State を受け取ってルーターとミドルウェアを組み立てる。
//! `main.rs` はインフラ初期化とサーバー起動に集中する。

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use slotbook_shared::{
    canonical_log::CanonicalLogLine,
    observability::{MakeRequestUuidV7, make_request_span},
};
use tower_http::{
    cors::CorsLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    handler::{
        BookingState,
        ReadinessState,
        UserState,
        create_booking,
        delete_booking,
        get_booking,
        health_check,
        list_bookings,
        login,
        readiness_check,
        register_user,
        update_booking,
    },
    openapi::{DOCS_PATH, openapi_document},
};

/// ルーター定義を行う
pub fn build_app(
    booking_state: Arc<BookingState>,
    user_state: Arc<UserState>,
    readiness_state: Arc<ReadinessState>,
) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route(DOCS_PATH, get(openapi_document))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .merge(
            Router::new()
                .route("/users", post(register_user))
                .route("/users/auth", post(login))
                .with_state(user_state),
        )
        .merge(
            Router::new()
                .route("/booking", get(list_bookings).post(create_booking))
                .route(
                    "/booking/{id}",
                    get(get_booking).patch(update_booking).delete(delete_booking),
                )
                .with_state(booking_state),
        )
        .layer(CorsLayer::permissive())
        // 下に書いたものが外側
        // 1. SetRequestIdLayer（最外）: UUID v7 を採番（クライアント提供値があればそれを使う）
        // 2. TraceLayer: request_id を含むスパンを作成し、完了時に 1 行サマリを出力
        // 3. PropagateRequestIdLayer: レスポンスヘッダーに X-Request-Id をコピー
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_request_span)
                .on_response(CanonicalLogLine)
                .on_failure(()),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
}
