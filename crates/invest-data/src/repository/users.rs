//! User Repository
//!
//! 사용자 계정 관련 데이터베이스 연산을 담당합니다.

use invest_core::{
    hash_password, verify_password, InvestError, InvestResult, NewUser, SecretString, User,
};
use sqlx::{PgExecutor, PgPool};
use tracing::{info, warn};

use crate::error::{DataError, Result};

/// User Repository
pub struct UserRepository;

impl UserRepository {
    /// ID로 조회
    pub async fn find_by_id<'e, E>(executor: E, id: i32) -> Result<Option<User>>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(user)
    }

    /// 로그인 핸들로 조회
    pub async fn find_by_user_name<'e, E>(executor: E, user_name: &str) -> Result<Option<User>>
    where
        E: PgExecutor<'e>,
    {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE user_name = $1")
            .bind(user_name)
            .fetch_optional(executor)
            .await?;

        Ok(user)
    }

    /// 전체 사용자 목록
    pub async fn list(pool: &PgPool) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
            .fetch_all(pool)
            .await?;

        Ok(users)
    }

    /// ID로 조회. 없으면 Not-found.
    pub async fn view(pool: &PgPool, id: i32) -> InvestResult<User> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| InvestError::NotFound("User not found".into()))
    }

    /// 회원 가입
    ///
    /// 입력을 검증하고, 중복 로그인 핸들을 거부하며, 비밀번호는 Argon2 해시로 저장합니다.
    pub async fn create(pool: &PgPool, input: NewUser) -> InvestResult<User> {
        input.validate()?;

        if Self::find_by_user_name(pool, &input.user_name).await?.is_some() {
            return Err(InvestError::Validation("User already exists".into()));
        }

        let password_hash = hash_password(&input.password)
            .map_err(|e| InvestError::Persistence(e.to_string()))?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (user_name, name, email, profile, password)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&input.user_name)
        .bind(&input.name)
        .bind(&input.email)
        .bind(input.profile_or_default())
        .bind(&password_hash)
        .fetch_one(pool)
        .await
        .map_err(|e| match DataError::from(e) {
            DataError::DuplicateError(_) => InvestError::Validation("User already exists".into()),
            other => other.into(),
        })?;

        info!(
            user_id = user.id,
            user_name = %user.user_name,
            admin = user.is_admin(),
            "사용자 생성"
        );
        Ok(user)
    }

    /// 로그인 핸들과 비밀번호 확인. 일치하지 않으면 `None`.
    pub async fn check_credentials(
        pool: &PgPool,
        user_name: &str,
        password: &SecretString,
    ) -> InvestResult<Option<User>> {
        let Some(user) = Self::find_by_user_name(pool, user_name).await? else {
            return Ok(None);
        };

        match verify_password(password, &user.password) {
            Ok(()) => Ok(Some(user)),
            Err(e) => {
                warn!(user_name, error = %e, "자격증명 불일치");
                Ok(None)
            }
        }
    }
}
