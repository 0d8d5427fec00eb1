//! 规则服务（REST API）
//!
//! 暴露规则的创建、查询、删除、合并与求值接口。
//! 规则解析和求值逻辑在 ruleflow-engine，这里只做传输层翻译和持久化。

pub mod dto;
pub mod error;
pub mod handlers;
pub mod repository;
pub mod routes;
pub mod state;

pub use error::{ApiError, Result};
pub use state::AppState;
