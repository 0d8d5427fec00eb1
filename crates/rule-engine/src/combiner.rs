//! 规则合并
//!
//! 将多条规则文本各自解析为规范 AST，再按「最高频操作符」
//! 启发式折叠为一棵决策树。
//!
//! 平局裁决：统计时记录每个操作符的计数和首次出现位置（对所有树
//! 做前序遍历的全局顺序），计数相同取先出现者。相比依赖哈希表的
//! 枚举顺序，这保证同样的输入永远得到同样的合并结果。

use crate::ast::AstNode;
use crate::error::{Result, RuleError};
use crate::parse_rule;

/// 没有任何操作符可统计时（所有规则都是裸操作数）使用的折叠操作符
const DEFAULT_GLUE: &str = "&&";

/// 合并多条规则文本为一棵决策树
///
/// 任何一条规则解析失败都会使整个合并失败，不产生部分结果。
/// 折叠是左结合的：结果树的 left 是已合并的累积树，right 是下一条规则。
pub fn combine_rules<S: AsRef<str>>(rule_strings: &[S]) -> Result<AstNode> {
    if rule_strings.is_empty() {
        return Err(RuleError::EmptyRuleSet);
    }

    let trees = rule_strings
        .iter()
        .map(|rule| parse_rule(rule.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let glue = most_frequent_operator(&trees).unwrap_or_else(|| DEFAULT_GLUE.to_string());

    let mut iter = trees.into_iter();
    let Some(mut combined) = iter.next() else {
        return Err(RuleError::EmptyRuleSet);
    };
    for tree in iter {
        combined = AstNode::operator(glue.clone(), combined, tree);
    }

    Ok(combined)
}

/// 统计所有树中每个操作符符号的出现次数，返回最高频者
///
/// 返回 None 表示所有树都不含操作符节点。
fn most_frequent_operator(trees: &[AstNode]) -> Option<String> {
    // 按首次出现顺序排列的 (符号, 计数) 列表
    let mut tally: Vec<(String, usize)> = Vec::new();
    for tree in trees {
        count_operators(tree, &mut tally);
    }

    let mut best: Option<(String, usize)> = None;
    for (symbol, count) in tally {
        match &best {
            Some((_, best_count)) if *best_count >= count => {}
            _ => best = Some((symbol, count)),
        }
    }
    best.map(|(symbol, _)| symbol)
}

/// 前序遍历累计操作符计数
fn count_operators(node: &AstNode, tally: &mut Vec<(String, usize)>) {
    if node.is_operator() {
        match tally.iter_mut().find(|(symbol, _)| *symbol == node.value) {
            Some((_, count)) => *count += 1,
            None => tally.push((node.value.clone(), 1)),
        }
    }
    if let Some(left) = node.left.as_deref() {
        count_operators(left, tally);
    }
    if let Some(right) = node.right.as_deref() {
        count_operators(right, tally);
    }
}
