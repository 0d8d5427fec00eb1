//! 应用状态定义

use crate::repository::RuleRepository;
use sqlx::PgPool;

/// Axum 应用共享状态
///
/// 在 handler 间共享数据库连接池和规则仓库。
#[derive(Clone)]
pub struct AppState {
    /// PostgreSQL 连接池（就绪探针直接使用）
    pub pool: PgPool,
    /// 规则存储仓库
    pub rules: RuleRepository,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let rules = RuleRepository::new(pool.clone());
        Self { pool, rules }
    }
}
