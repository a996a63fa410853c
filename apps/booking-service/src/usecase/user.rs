//! ユーザー登録・ログインのユースケース
//!
//! ## タイミング攻撃対策
//!
//! 未登録のメールアドレスでログインした場合もダミーハッシュで検証を実行し、
//! 応答時間からアカウントの有無が分からないようにする。

use std::sync::Arc;

use slotbook_domain::{
   clock::Clock,
   password::{PasswordHash, PlainPassword},
   user::{Email, User, UserId, UserName},
};
use slotbook_infra::{PasswordChecker, PasswordHasher, repository::UserRepository};
use slotbook_shared::{
   event_log::{error, event},
   log_business_event,
};

use crate::{auth::TokenIssuer, error::CoreError};

/// ダミー検証に使う有効な Argon2id 形式のハッシュ
const DUMMY_HASH: &str = "$argon2id$v=19$m=65536,t=1,p=1$AAAAAAAAAAAAAAAAAAAAAA$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// ユーザー登録の入力
pub struct RegisterUserInput {
   pub name:     String,
   pub email:    String,
   pub password: String,
}

/// ログイン結果
#[derive(Debug)]
pub struct LoginOutput {
   pub user:  User,
   pub token: String,
}

/// ユーザーユースケース
pub struct UserUseCaseImpl {
   user_repository:  Arc<dyn UserRepository>,
   password_checker: Arc<dyn PasswordChecker>,
   password_hasher:  Arc<dyn PasswordHasher>,
   tokens:           Arc<TokenIssuer>,
   clock:            Arc<dyn Clock>,
}

impl UserUseCaseImpl {
   pub fn new(
      user_repository: Arc<dyn UserRepository>,
      password_checker: Arc<dyn PasswordChecker>,
      password_hasher: Arc<dyn PasswordHasher>,
      tokens: Arc<TokenIssuer>,
      clock: Arc<dyn Clock>,
   ) -> Self {
      Self {
         user_repository,
         password_checker,
         password_hasher,
         tokens,
         clock,
      }
   }

   /// ユーザーを登録する
   ///
   /// 1. 名前・メールアドレス・パスワードを検証
   /// 2. 登録済みのメールアドレスなら 409
   /// 3. パスワードをハッシュ化して保存（同時登録はストアの一意制約で 409）
   pub async fn register(&self, input: RegisterUserInput) -> Result<User, CoreError> {
      let name = UserName::new(input.name)?;
      let email = Email::new(input.email)?;
      let password = PlainPassword::for_registration(input.password)?;

      if self.user_repository.find_by_email(&email).await?.is_some() {
         return Err(email_taken());
      }

      let password_hash = self.password_hasher.hash(&password)?;
      let user = User::new(UserId::new(), name, email, password_hash, self.clock.now());

      self.user_repository.insert(&user).await.map_err(|e| {
         if e.is_conflict() {
            email_taken()
         } else {
            CoreError::Database(e)
         }
      })?;

      log_business_event!(
         event.category = event::category::AUTH,
         event.action = event::action::USER_REGISTERED,
         event.entity_type = event::entity_type::USER,
         event.entity_id = %user.id(),
         event.result = event::result::SUCCESS,
         "ユーザー登録"
      );

      Ok(user)
   }

   /// メールアドレスとパスワードで認証し、トークンを発行する
   ///
   /// メールアドレスの形式不正・未登録・パスワード不一致はすべて
   /// 同じ 401 "Invalid credentials" を返す。
   pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutput, CoreError> {
      let password = PlainPassword::new(password);

      let user = match Email::new(email) {
         Ok(email) => self.user_repository.find_by_email(&email).await?,
         Err(_) => None,
      };

      let Some(user) = user else {
         self.dummy_verification(&password);
         log_login_failure(None);
         return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.to_string()));
      };

      let matched = match self.password_checker.verify(&password, user.password_hash()) {
         Ok(result) => result.is_match(),
         Err(e) => {
            tracing::error!(
               error.category = error::category::INFRASTRUCTURE,
               error.kind = error::kind::PASSWORD_VERIFICATION,
               user_id = %user.id(),
               "パスワード検証に失敗しました: {}",
               e
            );
            false
         }
      };

      if !matched {
         log_login_failure(Some(user.id()));
         return Err(CoreError::Unauthorized(INVALID_CREDENTIALS.to_string()));
      }

      let token = self.tokens.issue(user.id()).inspect_err(|e| {
         tracing::error!(
            error.category = error::category::INFRASTRUCTURE,
            error.kind = error::kind::TOKEN_ISSUE,
            user_id = %user.id(),
            "{}",
            e
         );
      })?;

      log_business_event!(
         event.category = event::category::AUTH,
         event.action = event::action::LOGIN_SUCCESS,
         event.entity_type = event::entity_type::USER,
         event.entity_id = %user.id(),
         event.actor_id = %user.id(),
         event.result = event::result::SUCCESS,
         "ログイン成功"
      );

      Ok(LoginOutput { user, token })
   }

   /// ユーザーが存在しない場合も実際の検証と同等の時間を消費する
   fn dummy_verification(&self, password: &PlainPassword) {
      let dummy_hash = PasswordHash::new(DUMMY_HASH);
      let _ = self.password_checker.verify(password, &dummy_hash);
   }
}

fn email_taken() -> CoreError {
   CoreError::Conflict("Email already registered".to_string())
}

fn log_login_failure(user_id: Option<&UserId>) {
   log_business_event!(
      event.category = event::category::AUTH,
      event.action = event::action::LOGIN_FAILURE,
      event.entity_type = event::entity_type::USER,
      event.entity_id = user_id.map(tracing::field::display),
      event.result = event::result::FAILURE,
      "ログイン失敗"
   );
}

#[cfg(test)]
mod tests {
   use std::sync::atomic::{AtomicUsize, Ordering};

   use chrono::{DateTime, Duration, TimeZone, Utc};
   use pretty_assertions::assert_eq;
   use rstest::{fixture, rstest};
   use slotbook_domain::{clock::FixedClock, password::PasswordVerifyResult};
   use slotbook_infra::{InfraError, mock::MockUserRepository};

   use super::*;

   // テスト用スタブ

   /// `hashed:<平文>` 形式で「ハッシュ化」し、検証回数を数える
   #[derive(Default)]
   struct StubPasswords {
      verify_calls: AtomicUsize,
   }

   impl PasswordChecker for StubPasswords {
      fn verify(
         &self,
         password: &PlainPassword,
         hash: &PasswordHash,
      ) -> Result<PasswordVerifyResult, InfraError> {
         self.verify_calls.fetch_add(1, Ordering::SeqCst);
         Ok((hash.as_str() == format!("hashed:{}", password.as_str())).into())
      }
   }

   impl PasswordHasher for StubPasswords {
      fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
         Ok(PasswordHash::new(format!("hashed:{}", password.as_str())))
      }
   }

   #[fixture]
   fn now() -> DateTime<Utc> {
      Utc.with_ymd_and_hms(2024, 12, 21, 9, 0, 0).unwrap()
   }

   struct Fixture {
      sut:       UserUseCaseImpl,
      repo:      MockUserRepository,
      passwords: Arc<StubPasswords>,
      tokens:    Arc<TokenIssuer>,
   }

   fn setup(now: DateTime<Utc>) -> Fixture {
      let repo = MockUserRepository::new();
      let passwords = Arc::new(StubPasswords::default());
      let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(now));
      let tokens = Arc::new(TokenIssuer::new(
         b"test-secret",
         Duration::days(1),
         clock.clone(),
      ));
      let sut = UserUseCaseImpl::new(
         Arc::new(repo.clone()),
         passwords.clone(),
         passwords.clone(),
         tokens.clone(),
         clock,
      );
      Fixture {
         sut,
         repo,
         passwords,
         tokens,
      }
   }

   fn register_input(email: &str) -> RegisterUserInput {
      RegisterUserInput {
         name:     "Kenji".to_string(),
         email:    email.to_string(),
         password: "password123".to_string(),
      }
   }

   // ===== register =====

   #[rstest]
   #[tokio::test]
   async fn test_ユーザーを登録するとハッシュ化したパスワードで保存される(
      now: DateTime<Utc>,
   ) {
      let f = setup(now);

      let user = f.sut.register(register_input("kenji@example.com")).await.unwrap();

      assert_eq!(user.email().as_str(), "kenji@example.com");
      assert_eq!(user.password_hash().as_str(), "hashed:password123");
      assert_eq!(user.created_at(), now);
      let stored = f.repo.find_by_email(user.email()).await.unwrap();
      assert_eq!(stored, Some(user));
   }

   #[rstest]
   #[tokio::test]
   async fn test_登録済みのメールアドレスは409(now: DateTime<Utc>) {
      let f = setup(now);
      f.sut.register(register_input("kenji@example.com")).await.unwrap();

      let result = f.sut.register(register_input("Kenji@Example.com")).await;

      assert!(matches!(result, Err(CoreError::Conflict(msg)) if msg == "Email already registered"));
   }

   #[rstest]
   #[case("", "kenji@example.com", "password123")]
   #[case("Kenji", "not-an-email", "password123")]
   #[case("Kenji", "kenji@example.com", "short")]
   #[tokio::test]
   async fn test_入力値が不正なら400(
      now: DateTime<Utc>,
      #[case] name: &str,
      #[case] email: &str,
      #[case] password: &str,
   ) {
      let f = setup(now);

      let result = f
         .sut
         .register(RegisterUserInput {
            name:     name.to_string(),
            email:    email.to_string(),
            password: password.to_string(),
         })
         .await;

      assert!(matches!(result, Err(CoreError::BadRequest(_))));
   }

   // ===== login =====

   #[rstest]
   #[tokio::test]
   async fn test_正しい認証情報でトークンが発行される(now: DateTime<Utc>) {
      let f = setup(now);
      let user = f.sut.register(register_input("kenji@example.com")).await.unwrap();

      let output = f.sut.login("kenji@example.com", "password123").await.unwrap();

      assert_eq!(output.user, user);
      assert_eq!(f.tokens.verify(&output.token).unwrap(), *user.id());
   }

   #[rstest]
   #[tokio::test]
   async fn test_パスワードが違えば401(now: DateTime<Utc>) {
      let f = setup(now);
      f.sut.register(register_input("kenji@example.com")).await.unwrap();

      let result = f.sut.login("kenji@example.com", "wrong-password").await;

      assert!(matches!(result, Err(CoreError::Unauthorized(msg)) if msg == "Invalid credentials"));
   }

   #[rstest]
   #[tokio::test]
   async fn test_未登録のメールアドレスでもダミー検証を実行して401(now: DateTime<Utc>) {
      let f = setup(now);

      let result = f.sut.login("nobody@example.com", "password123").await;

      assert!(matches!(result, Err(CoreError::Unauthorized(msg)) if msg == "Invalid credentials"));
      assert_eq!(f.passwords.verify_calls.load(Ordering::SeqCst), 1);
   }

   #[rstest]
   #[tokio::test]
   async fn test_形式不正のメールアドレスも401(now: DateTime<Utc>) {
      let f = setup(now);

      let result = f.sut.login("not-an-email", "password123").await;

      assert!(matches!(result, Err(CoreError::Unauthorized(_))));
   }
}
