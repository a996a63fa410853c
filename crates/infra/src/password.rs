//! # パスワードハッシュ
//!
//! Argon2id によるパスワードのハッシュ化と検証を提供する。
//!
//! パラメータは OWASP 推奨値（RFC 9106）:
//! - Memory: 64 MB
//! - Iterations: 1
//! - Parallelism: 1

use argon2::{
    Algorithm,
    Argon2,
    Params,
    PasswordHasher as _,
    PasswordVerifier as _,
    Version,
    password_hash::{PasswordHash as Argon2PasswordHash, SaltString},
};
use rand::Rng as _;
use slotbook_domain::password::{PasswordHash, PasswordVerifyResult, PlainPassword};

use crate::InfraError;

/// パスワード検証を担当するトレイト
pub trait PasswordChecker: Send + Sync {
    /// パスワードを検証する
    ///
    /// # Errors
    ///
    /// - 不正なハッシュ形式の場合
    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError>;
}

/// パスワードのハッシュ化を担当するトレイト
pub trait PasswordHasher: Send + Sync {
    /// 新しいソルトでパスワードをハッシュ化する
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError>;
}

/// Argon2id による実装
pub struct Argon2PasswordChecker {
    argon2: Argon2<'static>,
}

impl Argon2PasswordChecker {
    pub fn new() -> Result<Self, InfraError> {
        let params = Params::new(
            65536, // memory (KB) = 64 MB
            1,     // iterations
            1,     // parallelism
            None,  // output length (default: 32)
        )
        .map_err(|e| InfraError::unexpected(format!("Argon2 パラメータが不正です: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl PasswordChecker for Argon2PasswordChecker {
    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<PasswordVerifyResult, InfraError> {
        let parsed = Argon2PasswordHash::new(hash.as_str())
            .map_err(|e| InfraError::unexpected(format!("不正なハッシュ形式: {e}")))?;

        let matched = self
            .argon2
            .verify_password(password.as_str().as_bytes(), &parsed)
            .is_ok();

        Ok(PasswordVerifyResult::from(matched))
    }
}

impl PasswordHasher for Argon2PasswordChecker {
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
        let mut salt_bytes = [0u8; 16];
        rand::rng().fill(&mut salt_bytes);
        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| InfraError::unexpected(format!("ソルトの生成に失敗しました: {e}")))?;

        let hashed = self
            .argon2
            .hash_password(password.as_str().as_bytes(), &salt)
            .map_err(|e| InfraError::unexpected(format!("ハッシュ化に失敗しました: {e}")))?;

        Ok(PasswordHash::new(hashed.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn argon2() -> Argon2PasswordChecker {
        Argon2PasswordChecker::new().unwrap()
    }

    #[rstest]
    fn test_ハッシュ化したパスワードを検証できる(argon2: Argon2PasswordChecker) {
        let password = PlainPassword::new("password123");

        let hash = argon2.hash(&password).unwrap();
        let result = argon2.verify(&password, &hash).unwrap();

        assert!(hash.as_str().starts_with("$argon2id$v=19$m=65536,t=1,p=1$"));
        assert!(result.is_match());
    }

    #[rstest]
    fn test_異なるパスワードは一致しない(argon2: Argon2PasswordChecker) {
        let hash = argon2.hash(&PlainPassword::new("password123")).unwrap();

        let result = argon2
            .verify(&PlainPassword::new("wrongpassword"), &hash)
            .unwrap();

        assert_eq!(result, PasswordVerifyResult::Mismatch);
    }

    #[rstest]
    fn test_同じパスワードでもソルトが異なるためハッシュは毎回変わる(
        argon2: Argon2PasswordChecker,
    ) {
        let password = PlainPassword::new("password123");

        let first = argon2.hash(&password).unwrap();
        let second = argon2.hash(&password).unwrap();

        assert_ne!(first, second);
    }

    #[rstest]
    fn test_不正なハッシュ形式はエラー(argon2: Argon2PasswordChecker) {
        let result = argon2.verify(
            &PlainPassword::new("password123"),
            &PasswordHash::new("not-a-valid-hash"),
        );

        assert!(result.is_err());
    }
}
