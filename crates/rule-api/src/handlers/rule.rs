//! 规则 API 处理器
//!
//! 实现规则的创建、查询、删除、合并与求值。
//! 规则只有解析成功才会落库：解析失败时请求原子地失败，不产生记录。

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rule_engine::{AstNode, EvaluationContext};
use tracing::info;
use validator::Validate;

use crate::{
    dto::{
        ApiResponse, CombineRulesRequest, CreateRuleRequest, EvaluateAstRequest,
        EvaluateRuleRequest, EvaluationDto, PageResponse, PaginationParams, RuleDto,
    },
    error::ApiError,
};
use crate::state::AppState;

/// 创建规则
///
/// POST /api/rules
pub async fn create_rule(
    State(state): State<AppState>,
    Json(req): Json<CreateRuleRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RuleDto>>), ApiError> {
    req.validate()?;

    let ast = rule_engine::parse_rule(&req.rule_string).map_err(ApiError::InvalidRule)?;
    let ast_json = serde_json::to_value(&ast)?;

    let row = state.rules.insert(&req.rule_string, &ast_json).await?;
    info!(rule_id = row.id, "Rule created");

    Ok((StatusCode::CREATED, Json(ApiResponse::success(row.into()))))
}

/// 获取规则列表（分页）
///
/// GET /api/rules
pub async fn list_rules(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<RuleDto>>>, ApiError> {
    let total = state.rules.count().await?;
    if total == 0 {
        return Ok(Json(ApiResponse::success(PageResponse::empty(
            pagination.page,
            pagination.page_size,
        ))));
    }

    let rows = state
        .rules
        .list(pagination.limit(), pagination.offset())
        .await?;
    let items: Vec<RuleDto> = rows.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(PageResponse::new(
        items,
        total,
        pagination.page,
        pagination.page_size,
    ))))
}

/// 获取规则详情
///
/// GET /api/rules/{id}
pub async fn get_rule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<RuleDto>>, ApiError> {
    let row = state
        .rules
        .get(id)
        .await?
        .ok_or(ApiError::RuleNotFound(id))?;
    Ok(Json(ApiResponse::success(row.into())))
}

/// 删除规则
///
/// DELETE /api/rules/{id}
pub async fn delete_rule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    if !state.rules.delete(id).await? {
        return Err(ApiError::RuleNotFound(id));
    }

    info!(rule_id = id, "Rule deleted");
    Ok(Json(ApiResponse::<()>::success_empty()))
}

/// 合并多条规则为一棵决策树并持久化
///
/// POST /api/combine
///
/// 任一规则解析失败则整体失败，不产生部分结果。
pub async fn combine_rules(
    State(state): State<AppState>,
    Json(req): Json<CombineRulesRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RuleDto>>), ApiError> {
    req.validate()?;

    let combined = rule_engine::combine_rules(&req.rule_strings).map_err(ApiError::InvalidRule)?;
    let ast_json = serde_json::to_value(&combined)?;

    let rule_string = format!("Combined Rule({})", req.rule_strings.join(", "));
    let row = state.rules.insert(&rule_string, &ast_json).await?;
    info!(rule_id = row.id, rules = req.rule_strings.len(), "Rules combined");

    Ok((StatusCode::CREATED, Json(ApiResponse::success(row.into()))))
}

/// 对内联规则树求值
///
/// POST /api/evaluate
///
/// 请求直接携带规则树和数据记录，不访问存储。
pub async fn evaluate_ast(
    Json(req): Json<EvaluateAstRequest>,
) -> Result<Json<ApiResponse<EvaluationDto>>, ApiError> {
    let ctx = EvaluationContext::new(req.data);
    let result = rule_engine::evaluate(&req.ast, &ctx).map_err(ApiError::EvaluationFailed)?;

    Ok(Json(ApiResponse::success(EvaluationDto { result })))
}

/// 对已存规则求值
///
/// POST /api/rules/{id}/evaluate
pub async fn evaluate_rule(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<EvaluateRuleRequest>,
) -> Result<Json<ApiResponse<EvaluationDto>>, ApiError> {
    let row = state
        .rules
        .get(id)
        .await?
        .ok_or(ApiError::RuleNotFound(id))?;

    // 存储损坏（JSONB 无法还原为规则树）是系统错误而不是请求错误
    let ast: AstNode = serde_json::from_value(row.ast)
        .map_err(|e| ApiError::Internal(format!("规则 {id} 的 AST 无法还原: {e}")))?;

    let ctx = EvaluationContext::new(req.data);
    let result = rule_engine::evaluate(&ast, &ctx).map_err(ApiError::EvaluationFailed)?;

    Ok(Json(ApiResponse::success(EvaluationDto { result })))
}
