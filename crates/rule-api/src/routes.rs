//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射。

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::{handlers, state::AppState};

/// 构建规则管理路由
///
/// 包含规则 CRUD、合并与求值操作
pub fn rule_routes() -> Router<AppState> {
    Router::new()
        .route("/rules", post(handlers::rule::create_rule))
        .route("/rules", get(handlers::rule::list_rules))
        .route("/rules/{id}", get(handlers::rule::get_rule))
        .route("/rules/{id}", delete(handlers::rule::delete_rule))
        .route("/rules/{id}/evaluate", post(handlers::rule::evaluate_rule))
        .route("/combine", post(handlers::rule::combine_rules))
        .route("/evaluate", post(handlers::rule::evaluate_ast))
}

/// 构建完整的 API 路由
///
/// 返回所有 API 路由（不含前缀，由调用方在 main.rs 中挂载）
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(rule_routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes_construction() {
        let _rule = rule_routes();
        let _api = api_routes();
    }
}
