//! AST 求值器
//!
//! 对数据记录递归求值规范 AST。顶层结果必须是布尔值，
//! 中间结果可以是数值或字符串。纯函数，无副作用，不记录日志。
//!
//! 类型策略：
//! - `&&` / `||` 要求两侧都是布尔值；
//! - 大小比较在两侧同为数值时按数值比较，同为字符串时按字典序，
//!   类型不一致直接返回类型不匹配错误；
//! - 相等比较是严格的值加类型相等，数值间统一按 f64 比较，
//!   跨类型恒为不相等，不做隐式转换。

use crate::ast::{AstNode, NodeKind, OperandKind};
use crate::error::{Result, RuleError};
use serde_json::Value;
use std::cmp::Ordering;

/// 求值上下文，包装一次求值的只读数据记录
#[derive(Debug, Clone, Default)]
pub struct EvaluationContext {
    data: Value,
}

impl EvaluationContext {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// 从 JSON 文本创建
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let data: Value = serde_json::from_str(json)?;
        Ok(Self { data })
    }

    /// 按字段名取值，支持点号分隔的嵌套路径（如 "user.age"）
    pub fn get_field(&self, path: &str) -> Option<&Value> {
        let mut current = &self.data;
        for part in path.split('.') {
            match current {
                Value::Object(map) => current = map.get(part)?,
                _ => return None,
            }
        }
        Some(current)
    }

    pub fn data(&self) -> &Value {
        &self.data
    }
}

/// 求值入口：对数据记录求值整棵规则树，顶层结果必须是布尔值
pub fn evaluate(node: &AstNode, ctx: &EvaluationContext) -> Result<bool> {
    match eval_node(node, ctx)? {
        Value::Bool(matched) => Ok(matched),
        other => Err(RuleError::TypeMismatch {
            expected: "boolean".to_string(),
            actual: type_name(&other).to_string(),
        }),
    }
}

/// 递归求值单个节点，中间结果允许布尔/数值/字符串
fn eval_node(node: &AstNode, ctx: &EvaluationContext) -> Result<Value> {
    match node.kind {
        NodeKind::Operand => eval_operand(node, ctx),
        NodeKind::Operator => eval_operator(node, ctx),
    }
}

fn eval_operand(node: &AstNode, ctx: &EvaluationContext) -> Result<Value> {
    if node.left.is_some() || node.right.is_some() {
        return Err(RuleError::UnsupportedNode(format!(
            "操作数节点 '{}' 不应有子节点",
            node.value
        )));
    }

    match node.operand {
        Some(OperandKind::Literal) => Ok(literal_value(&node.value)),
        Some(OperandKind::Identifier) => lookup(ctx, &node.value),
        // 历史数据没有语法标记：沿用「可解析为数字即视为字面量」的行为
        None => {
            if node.value.parse::<f64>().is_ok() {
                Ok(literal_value(&node.value))
            } else {
                lookup(ctx, &node.value)
            }
        }
    }
}

/// 字面量文本转值：数值 → f64，true/false → 布尔，其余按字符串
fn literal_value(text: &str) -> Value {
    if let Ok(parsed) = text.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(parsed) {
            return Value::Number(number);
        }
    }
    match text {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::String(text.to_string()),
    }
}

fn lookup(ctx: &EvaluationContext, name: &str) -> Result<Value> {
    ctx.get_field(name)
        .cloned()
        .ok_or_else(|| RuleError::FieldNotFound(name.to_string()))
}

fn eval_operator(node: &AstNode, ctx: &EvaluationContext) -> Result<Value> {
    let left = node
        .left
        .as_deref()
        .ok_or_else(|| RuleError::MissingOperand(node.value.clone()))?;
    let left_value = eval_node(left, ctx)?;

    // 一元操作符只有 left，right 不存在且绝不求值
    let right = match node.right.as_deref() {
        Some(right) => right,
        None => {
            return match node.value.as_str() {
                "!" => logical_not(&left_value),
                "-" => numeric_negate(&left_value),
                other => Err(RuleError::MissingOperand(other.to_string())),
            };
        }
    };
    let right_value = eval_node(right, ctx)?;

    match node.value.as_str() {
        "&&" => logical(&left_value, &right_value, |a, b| a && b),
        "||" => logical(&left_value, &right_value, |a, b| a || b),
        ">" => compare(&left_value, &right_value, |o| o == Ordering::Greater),
        ">=" => compare(&left_value, &right_value, |o| o != Ordering::Less),
        "<" => compare(&left_value, &right_value, |o| o == Ordering::Less),
        "<=" => compare(&left_value, &right_value, |o| o != Ordering::Greater),
        "==" | "===" => Ok(Value::Bool(strict_eq(&left_value, &right_value))),
        "!=" | "!==" => Ok(Value::Bool(!strict_eq(&left_value, &right_value))),
        other => Err(RuleError::UnsupportedOperator(other.to_string())),
    }
}

fn logical<F>(left: &Value, right: &Value, apply: F) -> Result<Value>
where
    F: Fn(bool, bool) -> bool,
{
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(apply(*a, *b))),
        _ => {
            let offender = if left.is_boolean() { right } else { left };
            Err(RuleError::TypeMismatch {
                expected: "boolean".to_string(),
                actual: type_name(offender).to_string(),
            })
        }
    }
}

fn logical_not(value: &Value) -> Result<Value> {
    match value {
        Value::Bool(b) => Ok(Value::Bool(!b)),
        other => Err(RuleError::TypeMismatch {
            expected: "boolean".to_string(),
            actual: type_name(other).to_string(),
        }),
    }
}

fn numeric_negate(value: &Value) -> Result<Value> {
    let number = as_f64(value).ok_or_else(|| RuleError::TypeMismatch {
        expected: "number".to_string(),
        actual: type_name(value).to_string(),
    })?;
    serde_json::Number::from_f64(-number)
        .map(Value::Number)
        .ok_or_else(|| RuleError::TypeMismatch {
            expected: "number".to_string(),
            actual: "non-finite number".to_string(),
        })
}

/// 大小比较：同为数值按数值，同为字符串按字典序，其余组合报类型错误
fn compare<F>(left: &Value, right: &Value, matches: F) -> Result<Value>
where
    F: Fn(Ordering) -> bool,
{
    let ordering = match (left, right) {
        (Value::Number(_), Value::Number(_)) => {
            match (as_f64(left), as_f64(right)) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => {
                    return Err(RuleError::TypeMismatch {
                        expected: "number".to_string(),
                        actual: "non-finite number".to_string(),
                    });
                }
            }
        }
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => {
            return Err(RuleError::TypeMismatch {
                expected: type_name(left).to_string(),
                actual: type_name(right).to_string(),
            });
        }
    };
    Ok(Value::Bool(matches(ordering)))
}

/// 严格相等：数值间统一按 f64 比较（100 与 100.0 相等），
/// 其余要求类型与值完全一致，跨类型恒为不相等
fn strict_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(_), Value::Number(_)) => match (as_f64(left), as_f64(right)) {
            (Some(a), Some(b)) => a == b,
            _ => left == right,
        },
        _ => left == right,
    }
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
