//! # Booking Service サーバー
//!
//! 時間帯予約の REST API を提供する。
//!
//! ## 役割
//!
//! - **ユーザー**: 登録とログイン（署名付きトークンの発行）
//! - **予約**: 作成・一覧・詳細・変更・削除（トークン必須）
//! - **データ永続化**: PostgreSQL へのエンティティ保存
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `BOOKING_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `PORT` | No | ポート番号（デフォルト: `4000`） |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `SECRET_TOKEN` | **Yes** | トークン署名用の秘密鍵 |
//! | `TOKEN_TTL_SECS` | No | トークンの有効期間（秒、1 〜 315360000、デフォルト: `86400`） |
//! | `LOG_FORMAT` | No | `json` で JSON ログ出力（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p slotbook-booking-service
//!
//! # 本番環境
//! DATABASE_URL=postgres://... SECRET_TOKEN=... cargo run -p slotbook-booking-service --release
//! ```

mod config;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use chrono::Duration;
use config::BookingConfig;
use slotbook_booking_service::{
   app::build_app,
   auth::TokenIssuer,
   handler::{BookingState, ReadinessState, UserState},
   usecase::{BookingUseCaseImpl, UserUseCaseImpl},
};
use slotbook_domain::clock::{Clock, SystemClock};
use slotbook_infra::{
   Argon2PasswordChecker,
   db,
   repository::{PostgresBookingRepository, PostgresUserRepository},
};
use slotbook_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

/// Booking Service サーバーのエントリーポイント
///
/// 以下の順序で初期化を行う:
///
/// 1. 環境変数の読み込み（.env ファイル）
/// 2. トレーシングの初期化
/// 3. アプリケーション設定の読み込み
/// 4. データベース接続とマイグレーション
/// 5. ルーターの構築
/// 6. HTTP サーバーの起動（SIGINT / SIGTERM で停止）
#[tokio::main]
async fn main() -> anyhow::Result<()> {
   // .env ファイルを読み込む（存在する場合）
   dotenvy::dotenv().ok();

   // トレーシング初期化
   let tracing_config = TracingConfig::from_env("booking-service");
   init_tracing(&tracing_config);
   let _tracing_guard = tracing::info_span!("app", service = "booking-service").entered();

   // 設定読み込み
   let config = BookingConfig::from_env().context("設定の読み込みに失敗しました")?;

   tracing::info!(
      "Booking Service サーバーを起動します: {}:{}",
      config.host,
      config.port
   );

   // データベース接続プールを作成
   let pool = db::create_pool(&config.database_url)
      .await
      .context("データベース接続に失敗しました")?;
   db::run_migrations(&pool)
      .await
      .context("マイグレーションの適用に失敗しました")?;
   tracing::info!("データベースに接続しました");

   // 依存コンポーネントを初期化
   let clock: Arc<dyn Clock> = Arc::new(SystemClock);
   let tokens = Arc::new(TokenIssuer::new(
      config.secret_token.as_bytes(),
      Duration::seconds(config.token_ttl_secs),
      clock.clone(),
   ));
   let argon2 = Arc::new(Argon2PasswordChecker::new()?);

   let booking_usecase =
      BookingUseCaseImpl::new(Arc::new(PostgresBookingRepository::new(pool.clone())), clock.clone());
   let booking_state = Arc::new(BookingState {
      usecase: booking_usecase,
      tokens:  tokens.clone(),
   });

   let user_usecase = UserUseCaseImpl::new(
      Arc::new(PostgresUserRepository::new(pool.clone())),
      argon2.clone(),
      argon2,
      tokens,
      clock,
   );
   let user_state = Arc::new(UserState {
      usecase: user_usecase,
   });

   let readiness_state = Arc::new(ReadinessState { pool: pool.clone() });

   // ルーター構築
   let app = build_app(booking_state, user_state, readiness_state);

   // サーバー起動
   let addr: SocketAddr = format!("{}:{}", config.host, config.port)
      .parse()
      .context("アドレスのパースに失敗しました")?;

   let listener = TcpListener::bind(addr).await?;
   tracing::info!("Booking Service サーバーが起動しました: {}", addr);

   axum::serve(listener, app)
      .with_graceful_shutdown(shutdown_signal())
      .await?;

   pool.close().await;
   tracing::info!("Booking Service サーバーを停止しました");

   Ok(())
}

/// SIGINT（Ctrl+C）または SIGTERM を待つ
async fn shutdown_signal() {
   let ctrl_c = async {
      if let Err(e) = tokio::signal::ctrl_c().await {
         tracing::error!(error = %e, "Ctrl+C ハンドラの登録に失敗しました");
         std::future::pending::<()>().await;
      }
   };

   #[cfg(unix)]
   let terminate = async {
      match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
         Ok(mut signal) => {
            signal.recv().await;
         }
         Err(e) => {
            tracing::error!(error = %e, "SIGTERM ハンドラの登録に失敗しました");
            std::future::pending::<()>().await;
         }
      }
   };

   #[cfg(not(unix))]
   let terminate = std::future::pending::<()>();

   tokio::select! {
      () = ctrl_c => {},
      () = terminate => {},
   }

   tracing::info!("停止シグナルを受信しました。処理中のリクエストを待って終了します");
}
