//! 请求 DTO 定义

use rule_engine::AstNode;
use serde::Deserialize;
use validator::Validate;

/// 创建规则请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRuleRequest {
    #[validate(length(min = 1, max = 2000, message = "规则文本长度必须在1-2000个字符之间"))]
    pub rule_string: String,
}

/// 合并规则请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CombineRulesRequest {
    #[validate(length(min = 1, message = "至少需要一条规则"))]
    pub rule_strings: Vec<String>,
}

/// 内联求值请求：直接携带规则树和数据记录
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateAstRequest {
    pub ast: AstNode,
    pub data: serde_json::Value,
}

/// 按已存规则求值请求
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluateRuleRequest {
    pub data: serde_json::Value,
}

/// 分页参数
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PaginationParams {
    /// 单页条数，限制在 1..=100
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, 100)
    }

    /// 查询偏移量，页码从 1 开始
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rule_request_validation() {
        let valid = CreateRuleRequest {
            rule_string: "age > 30".to_string(),
        };
        assert!(valid.validate().is_ok());

        let empty = CreateRuleRequest {
            rule_string: String::new(),
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_combine_rules_request_rejects_empty_list() {
        let empty = CombineRulesRequest {
            rule_strings: vec![],
        };
        assert!(empty.validate().is_err());

        let valid = CombineRulesRequest {
            rule_strings: vec!["age > 30".to_string()],
        };
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_pagination_defaults() {
        let params: PaginationParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.page_size, 20);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_pagination_bounds() {
        let params = PaginationParams {
            page: 0,
            page_size: 1000,
        };
        assert_eq!(params.limit(), 100);
        assert_eq!(params.offset(), 0);

        let params = PaginationParams {
            page: 3,
            page_size: 10,
        };
        assert_eq!(params.offset(), 20);
    }

    #[test]
    fn test_camel_case_deserialization() {
        let req: CreateRuleRequest =
            serde_json::from_str(r#"{"ruleString": "age > 30"}"#).unwrap();
        assert_eq!(req.rule_string, "age > 30");
    }
}
