//! 사용자 계정.

use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};

use crate::credential::{is_valid_email, is_valid_user_name};
use crate::error::{InvestError, InvestResult};

/// 기본 역할.
pub const DEFAULT_PROFILE: &str = "USER";

/// 관리자 역할.
pub const ADMIN_PROFILE: &str = "ADMIN";

/// 영속 사용자.
///
/// 비밀번호 해시는 어떤 직렬화 결과에도 포함되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx-support", derive(sqlx::FromRow))]
pub struct User {
    pub id: i32,
    /// 로그인 핸들 (고유)
    pub user_name: String,
    pub name: Option<String>,
    pub email: Option<String>,
    /// 역할 (ADMIN, USER)
    pub profile: Option<String>,
    /// Argon2 PHC 해시
    #[serde(skip_serializing, default)]
    pub password: String,
}

impl User {
    /// 관리자 여부
    pub fn is_admin(&self) -> bool {
        self.profile.as_deref() == Some(ADMIN_PROFILE)
    }
}

/// 회원 가입 요청.
#[derive(Debug, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(deserialize_with = "secret_from_string")]
    pub password: SecretString,
}

fn secret_from_string<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|s| SecretString::new(s.into()))
}

impl NewUser {
    /// 입력 형식을 검증합니다. 중복 여부는 저장소에서 확인합니다.
    pub fn validate(&self) -> InvestResult<()> {
        if self.user_name.is_empty() {
            return Err(InvestError::Validation("User name is required".into()));
        }
        if self.email.is_empty() {
            return Err(InvestError::Validation("Email is required".into()));
        }
        if !is_valid_email(&self.email) {
            return Err(InvestError::Validation("Invalid email format".into()));
        }
        if !is_valid_user_name(&self.user_name) {
            return Err(InvestError::Validation("Invalid username format".into()));
        }
        Ok(())
    }

    /// 저장할 역할. 지정하지 않으면 기본 역할입니다.
    pub fn profile_or_default(&self) -> &str {
        self.profile.as_deref().unwrap_or(DEFAULT_PROFILE)
    }
}
