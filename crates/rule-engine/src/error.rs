//! 规则引擎错误类型

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("规则解析失败 (位置 {position}): {message}")]
    Parse { position: usize, message: String },

    #[error("不支持的表达式类型: {0}")]
    UnsupportedExpression(String),

    #[error("不支持的操作符: {0}")]
    UnsupportedOperator(String),

    #[error("非法的节点结构: {0}")]
    UnsupportedNode(String),

    #[error("规则集合为空，无法合并")]
    EmptyRuleSet,

    #[error("字段不存在: {0}")]
    FieldNotFound(String),

    #[error("类型不匹配: 期望 {expected}, 实际 {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("操作符 {0} 缺少操作数")]
    MissingOperand(String),
}

impl RuleError {
    /// 是否属于规则文本/结构本身的问题（区别于求值阶段的数据问题）
    pub fn is_rule_error(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::UnsupportedExpression(_) | Self::EmptyRuleSet
        )
    }
}

pub type Result<T> = std::result::Result<T, RuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_carries_position() {
        let err = RuleError::Parse {
            position: 4,
            message: "意外的符号 '>'".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("位置 4"));
        assert!(text.contains(">"));
    }

    #[test]
    fn test_rule_error_classification() {
        assert!(RuleError::EmptyRuleSet.is_rule_error());
        assert!(
            RuleError::Parse {
                position: 0,
                message: "x".into()
            }
            .is_rule_error()
        );
        assert!(!RuleError::FieldNotFound("age".into()).is_rule_error());
        assert!(
            !RuleError::TypeMismatch {
                expected: "number".into(),
                actual: "string".into()
            }
            .is_rule_error()
        );
    }
}
