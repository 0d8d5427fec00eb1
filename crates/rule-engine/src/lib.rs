//! 规则表达式引擎
//!
//! 将文本规则（如 `age > 30 AND department = 'Sales'`）解析为规范 AST，
//! 支持：
//! - 规则文本归一化与解析
//! - 规范 AST 构建和 JSON 序列化
//! - AST 对数据记录的布尔求值
//! - 多规则按最高频操作符合并为一棵决策树
//!
//! 所有操作都是同步纯函数：节点构建后不再变更，任意多次求值/合并
//! 可以在独立输入上并发进行，无需协调。

pub mod ast;
pub mod builder;
pub mod combiner;
pub mod error;
pub mod evaluator;
pub mod normalize;
pub mod parser;
pub mod token;

pub use ast::{AstNode, NodeKind, OperandKind};
pub use builder::build_ast;
pub use combiner::combine_rules;
pub use error::{Result, RuleError};
pub use evaluator::{EvaluationContext, evaluate};
pub use normalize::normalize;
pub use parser::{Expr, parse};

/// 规则文本 → 规范 AST 的完整管线：归一化 → 解析 → 构建
pub fn parse_rule(rule_string: &str) -> Result<AstNode> {
    let normalized = normalize(rule_string);
    let expr = parser::parse(&normalized)?;
    builder::build_ast(&expr)
}
