//! 规范 AST 节点定义
//!
//! 引擎唯一对外交换和持久化的树形结构，序列化形如
//! `{kind, value, left, right}`，经任意存储/传输层往返后结构不变。

use serde::{Deserialize, Serialize};

/// 节点类别：内部节点是操作符，叶子节点是操作数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Operator,
    Operand,
}

/// 操作数的语法类别
///
/// 构建 AST 时一次性确定。求值阶段据此区分字面量和字段引用，
/// 纯数字命名的字段不会被误判成数值字面量。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperandKind {
    Literal,
    Identifier,
}

/// 规范 AST 节点
///
/// 操作数节点：`value` 为字面量文本或字段名，无子节点。
/// 二元操作符节点：左右子节点齐全；一元操作符节点只有 `left`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstNode {
    pub kind: NodeKind,
    pub value: String,
    /// 操作数语法标记。历史数据可能缺失，缺失时求值端回退为
    /// 按「文本是否可解析为数字」判断。
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operand: Option<OperandKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left: Option<Box<AstNode>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right: Option<Box<AstNode>>,
}

impl AstNode {
    /// 构造二元操作符节点
    pub fn operator(value: impl Into<String>, left: AstNode, right: AstNode) -> Self {
        Self {
            kind: NodeKind::Operator,
            value: value.into(),
            operand: None,
            left: Some(Box::new(left)),
            right: Some(Box::new(right)),
        }
    }

    /// 构造一元操作符节点（只有 left）
    pub fn unary_operator(value: impl Into<String>, operand: AstNode) -> Self {
        Self {
            kind: NodeKind::Operator,
            value: value.into(),
            operand: None,
            left: Some(Box::new(operand)),
            right: None,
        }
    }

    /// 构造字面量操作数节点
    pub fn literal(value: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Operand,
            value: value.into(),
            operand: Some(OperandKind::Literal),
            left: None,
            right: None,
        }
    }

    /// 构造字段引用操作数节点
    pub fn identifier(name: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Operand,
            value: name.into(),
            operand: Some(OperandKind::Identifier),
            left: None,
            right: None,
        }
    }

    pub fn is_operator(&self) -> bool {
        self.kind == NodeKind::Operator
    }

    pub fn is_operand(&self) -> bool {
        self.kind == NodeKind::Operand
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialization_shape() {
        let node = AstNode::operator(">", AstNode::identifier("age"), AstNode::literal("30"));

        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["kind"], json!("operator"));
        assert_eq!(value["value"], json!(">"));
        assert_eq!(value["left"]["kind"], json!("operand"));
        assert_eq!(value["left"]["operand"], json!("identifier"));
        assert_eq!(value["right"]["operand"], json!("literal"));
        // 操作数节点无子节点字段
        assert!(value["left"].get("left").is_none());
    }

    #[test]
    fn test_roundtrip() {
        let node = AstNode::operator(
            "&&",
            AstNode::operator(">", AstNode::identifier("age"), AstNode::literal("30")),
            AstNode::unary_operator("!", AstNode::identifier("blocked")),
        );

        let json = serde_json::to_string(&node).unwrap();
        let parsed: AstNode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, node);
    }

    #[test]
    fn test_legacy_shape_without_operand_tag() {
        // 历史存储只有 {kind, value, left, right} 四个字段
        let json = r#"
        {
            "kind": "operator",
            "value": ">",
            "left": {"kind": "operand", "value": "age", "left": null, "right": null},
            "right": {"kind": "operand", "value": "30", "left": null, "right": null}
        }
        "#;

        let node: AstNode = serde_json::from_str(json).unwrap();
        assert!(node.is_operator());
        let left = node.left.as_deref().unwrap();
        assert!(left.is_operand());
        assert_eq!(left.operand, None);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let json = r#"{"kind": "function", "value": "max"}"#;
        assert!(serde_json::from_str::<AstNode>(json).is_err());
    }
}
