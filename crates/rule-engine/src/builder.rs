//! 规范 AST 构建
//!
//! 将通用表达式树逐节点映射为规范的双子树表示。
//! 无状态的纯结构变换：操作符符号原样透传（是否支持由求值阶段判定），
//! 操作数在这里一次性打上字面量/字段引用标记。

use crate::ast::AstNode;
use crate::error::{Result, RuleError};
use crate::parser::Expr;

/// 通用表达式树 → 规范 AST
///
/// 规范模型无法表示的结构（如三元表达式）在这里失败。
pub fn build_ast(expr: &Expr) -> Result<AstNode> {
    match expr {
        Expr::Binary { op, left, right } => {
            Ok(AstNode::operator(*op, build_ast(left)?, build_ast(right)?))
        }
        Expr::Unary { op, operand } => Ok(AstNode::unary_operator(*op, build_ast(operand)?)),
        Expr::Number(text) => Ok(AstNode::literal(text.clone())),
        Expr::Str(text) => Ok(AstNode::literal(text.clone())),
        Expr::Bool(value) => Ok(AstNode::literal(value.to_string())),
        Expr::Identifier(name) => Ok(AstNode::identifier(name.clone())),
        Expr::Conditional { .. } => {
            Err(RuleError::UnsupportedExpression("conditional".to_string()))
        }
    }
}
