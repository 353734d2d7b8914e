//! 사용자 자격증명 처리.
//!
//! Argon2 기반 비밀번호 해싱과 로그인 핸들/이메일 형식 검증.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use secrecy::{ExposeSecret, SecretString};
use validator::ValidateEmail;

/// 자격증명 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("비밀번호 해싱 실패")]
    HashingFailed,
    #[error("비밀번호 검증 실패")]
    VerificationFailed,
    #[error("잘못된 해시 형식")]
    InvalidHashFormat,
}

/// 비밀번호 해싱.
///
/// Argon2id 알고리즘을 사용하며 솔트는 자동으로 생성됩니다.
/// 반환값은 솔트를 포함한 PHC 형식 문자열입니다.
pub fn hash_password(password: &SecretString) -> Result<String, CredentialError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.expose_secret().as_bytes(), &salt)
        .map_err(|_| CredentialError::HashingFailed)?;

    Ok(hash.to_string())
}

/// 저장된 PHC 해시와 평문 비밀번호를 비교합니다.
pub fn verify_password(password: &SecretString, hash: &str) -> Result<(), CredentialError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| CredentialError::InvalidHashFormat)?;

    Argon2::default()
        .verify_password(password.expose_secret().as_bytes(), &parsed_hash)
        .map_err(|_| CredentialError::VerificationFailed)
}

/// 로그인 핸들 형식 검증.
///
/// 영문자, 숫자, `_`, `.`, `-`만 허용하며 최소 3자 이상이어야 합니다.
pub fn is_valid_user_name(user_name: &str) -> bool {
    user_name.chars().count() >= 3
        && user_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// 이메일 형식 검증.
pub fn is_valid_email(email: &str) -> bool {
    email.validate_email()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.into())
    }

    #[test]
    fn test_hash_and_verify_password() {
        let password = secret("TestPassword123!");
        let hash = hash_password(&password).unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(&password, &hash).is_ok());
        assert!(verify_password(&secret("WrongPassword123!"), &hash).is_err());
    }

    #[test]
    fn test_same_password_different_hashes() {
        let hash1 = hash_password(&secret("Password1")).unwrap();
        let hash2 = hash_password(&secret("Password1")).unwrap();

        // 솔트가 다르므로 해시가 다름
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_invalid_hash_format() {
        let result = verify_password(&secret("password"), "not-a-valid-hash");
        assert!(matches!(result, Err(CredentialError::InvalidHashFormat)));
    }

    #[test]
    fn test_user_name_rules() {
        assert!(is_valid_user_name("ana.souza"));
        assert!(is_valid_user_name("joe_99"));
        assert!(!is_valid_user_name("ab"));
        assert!(!is_valid_user_name("com espaco"));
        assert!(!is_valid_user_name("ação"));
    }

    #[test]
    fn test_email_rules() {
        assert!(is_valid_email("ana@example.com"));
        assert!(!is_valid_email("ana.example.com"));
        assert!(!is_valid_email("@example.com"));
    }
}
