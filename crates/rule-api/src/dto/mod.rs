//! 请求/响应 DTO 定义

pub mod request;
pub mod response;

pub use request::{
    CombineRulesRequest, CreateRuleRequest, EvaluateAstRequest, EvaluateRuleRequest,
    PaginationParams,
};
pub use response::{ApiResponse, EvaluationDto, PageResponse, RuleDto};
