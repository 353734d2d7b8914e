//! 제공자 JSON을 관대하게 역직렬화하는 serde 헬퍼.
//!
//! 제공자는 텍스트 식별자를 숫자로, 정수 분류 코드를 실수로 보내기도 합니다.

use serde::{de::Error, Deserialize, Deserializer};
use serde_json::Value;

/// 문자열, 숫자, 불리언을 문자열로 받습니다. `null`은 `None`입니다.
pub(crate) fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(D::Error::custom(format!("expected text, got {}", other))),
    }
}

/// 정수 또는 정수로 표현 가능한 실수를 받습니다. `null`은 `None`입니다.
pub(crate) fn opt_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return i32::try_from(i)
                    .map(Some)
                    .map_err(|_| D::Error::custom(format!("integer out of range: {}", i)));
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f >= i32::MIN as f64 && f <= i32::MAX as f64 => {
                    Ok(Some(f.trunc() as i32))
                }
                _ => Err(D::Error::custom(format!("integer out of range: {}", n))),
            }
        }
        other => Err(D::Error::custom(format!("expected integer, got {}", other))),
    }
}

/// 키가 있을 때만 호출되어 `Some`으로 감쌉니다.
///
/// `#[serde(default)]`와 함께 쓰면 키 없음은 `None`, `null`은 `Some(None)`이 됩니다.
pub(crate) fn present_string<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    opt_string(deserializer).map(Some)
}

/// `present_string`의 정수 버전.
pub(crate) fn present_i32<'de, D>(deserializer: D) -> Result<Option<Option<i32>>, D::Error>
where
    D: Deserializer<'de>,
{
    opt_i32(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Lenient {
        #[serde(default, deserialize_with = "opt_string")]
        text: Option<String>,
        #[serde(default, deserialize_with = "opt_i32")]
        code: Option<i32>,
    }

    #[test]
    fn test_number_as_text() {
        let p: Lenient = serde_json::from_value(json!({"text": 1234, "code": 7})).unwrap();
        assert_eq!(p.text.as_deref(), Some("1234"));
        assert_eq!(p.code, Some(7));
    }

    #[test]
    fn test_float_classifier() {
        let p: Lenient = serde_json::from_value(json!({"code": 3.0})).unwrap();
        assert_eq!(p.code, Some(3));
        assert_eq!(p.text, None);
    }

    #[test]
    fn test_null_and_missing() {
        let p: Lenient = serde_json::from_value(json!({"text": null})).unwrap();
        assert_eq!(p.text, None);
        assert_eq!(p.code, None);
    }

    #[derive(Debug, Deserialize)]
    struct Presence {
        #[serde(default, deserialize_with = "present_string")]
        text: Option<Option<String>>,
        #[serde(default, deserialize_with = "present_i32")]
        code: Option<Option<i32>>,
    }

    #[test]
    fn test_presence_tells_null_from_missing() {
        let p: Presence = serde_json::from_value(json!({"text": null})).unwrap();
        assert_eq!(p.text, Some(None));
        assert_eq!(p.code, None);

        let p: Presence = serde_json::from_value(json!({"text": 5, "code": 2.0})).unwrap();
        assert_eq!(p.text, Some(Some("5".to_string())));
        assert_eq!(p.code, Some(Some(2)));
    }

    #[test]
    fn test_rejects_wrong_shapes() {
        assert!(serde_json::from_value::<Lenient>(json!({"code": "abc"})).is_err());
        assert!(serde_json::from_value::<Lenient>(json!({"text": [1, 2]})).is_err());
        assert!(serde_json::from_value::<Lenient>(json!({"code": 1e12})).is_err());
    }
}
