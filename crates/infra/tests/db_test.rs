//! DB コネクション管理の統合テスト
//!
//! 実行方法:
//! ```bash
//! DATABASE_URL=postgres://... cargo test -p slotbook-infra --test db_test -- --ignored
//! ```

use slotbook_infra::db;
use sqlx::PgPool;

#[sqlx::test(migrations = false)]
#[ignore = "PostgreSQL が必要"]
async fn test_マイグレーションは再実行しても成功する(pool: PgPool) {
   db::run_migrations(&pool).await.unwrap();
   db::run_migrations(&pool).await.unwrap();

   let tables: Vec<String> = sqlx::query_scalar(
      "SELECT table_name::text FROM information_schema.tables \
       WHERE table_schema = 'public' AND table_name IN ('users', 'bookings') \
       ORDER BY table_name",
   )
   .fetch_all(&pool)
   .await
   .unwrap();
   assert_eq!(tables, vec!["bookings", "users"]);
}

#[sqlx::test(migrations = false)]
#[ignore = "PostgreSQL が必要"]
async fn test_疎通確認が成功する(pool: PgPool) {
   db::check_connection(&pool).await.unwrap();
}

#[sqlx::test(migrations = false)]
#[ignore = "PostgreSQL が必要"]
async fn test_クローズ後の疎通確認は失敗する(pool: PgPool) {
   pool.close().await;

   let result = db::check_connection(&pool).await;

   assert!(result.is_err());
}
