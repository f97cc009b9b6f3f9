//! Security Module
//!
//! 解析時のセキュリティ対策を実装するモジュール。
//! 巨大な入力、過度に深いネスト、DOCTYPE宣言（XXE攻撃）への対策を提供します。

use crate::error::XlsxExtError;

/// 解析時の制限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ParseLimits {
    /// 入力の最大サイズ（バイト）
    /// デフォルト: 64MB (67_108_864 bytes)
    pub max_input_size: usize,
    /// 要素の最大ネスト深さ
    /// デフォルト: 64
    pub max_depth: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            max_input_size: 67_108_864, // 64MB
            max_depth: 64,
        }
    }
}

impl ParseLimits {
    /// 入力サイズを検証
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 上限以内の場合
    /// * `Err(XlsxExtError::SecurityViolation)` - 上限を超えた場合
    pub fn check_input_size(&self, size: usize) -> Result<(), XlsxExtError> {
        if size > self.max_input_size {
            return Err(XlsxExtError::SecurityViolation(format!(
                "Input exceeds maximum size: {} bytes (max: {} bytes)",
                size, self.max_input_size
            )));
        }
        Ok(())
    }

    /// ネスト深さを検証
    pub fn check_depth(&self, depth: usize, element: &str) -> Result<(), XlsxExtError> {
        if depth > self.max_depth {
            return Err(XlsxExtError::SecurityViolation(format!(
                "Element <{}> nested too deeply: depth {} (max: {})",
                element, depth, self.max_depth
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = ParseLimits::default();
        assert_eq!(limits.max_input_size, 67_108_864);
        assert_eq!(limits.max_depth, 64);
    }

    #[test]
    fn test_check_input_size() {
        let limits = ParseLimits {
            max_input_size: 10,
            max_depth: 4,
        };
        assert!(limits.check_input_size(10).is_ok());
        match limits.check_input_size(11) {
            Err(XlsxExtError::SecurityViolation(msg)) => assert!(msg.contains("maximum size")),
            other => panic!("Expected SecurityViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_check_depth() {
        let limits = ParseLimits {
            max_input_size: 10,
            max_depth: 4,
        };
        assert!(limits.check_depth(4, "extLst").is_ok());
        match limits.check_depth(5, "x14:cfRule") {
            Err(XlsxExtError::SecurityViolation(msg)) => {
                assert!(msg.contains("x14:cfRule"));
                assert!(msg.contains("depth 5"));
            }
            other => panic!("Expected SecurityViolation, got {:?}", other),
        }
    }
}
