//! Culture Context - Value Objects

use serde::{Deserialize, Serialize};

/// 文化代码 (如 "en", "fr-ca")
///
/// 不变量:
/// - 非空
/// - 仅包含 ASCII 字母、数字和 '-'
/// - 构造时统一转为小写（文化匹配不区分大小写）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CultureCode(String);

impl CultureCode {
    pub fn new(code: impl Into<String>) -> Result<Self, &'static str> {
        let code = code.into();
        let code = code.trim().to_ascii_lowercase();
        if code.is_empty() {
            return Err("文化代码不能为空");
        }
        if !code
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-')
        {
            return Err("文化代码仅允许 ASCII 字母、数字和 '-'");
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CultureCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_culture_code_normalization() {
        let code = CultureCode::new(" Fr-CA ").unwrap();
        assert_eq!(code.as_str(), "fr-ca");
    }

    #[test]
    fn test_culture_code_rejects_empty() {
        assert!(CultureCode::new("").is_err());
        assert!(CultureCode::new("   ").is_err());
    }

    #[test]
    fn test_culture_code_rejects_invalid_chars() {
        assert!(CultureCode::new("fr_CA").is_err());
        assert!(CultureCode::new("en us").is_err());
    }
}
