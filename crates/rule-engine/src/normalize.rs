//! 规则文本归一化
//!
//! 把用户书写的替代形式（`AND` / `OR` / 单个 `=`）替换为引擎原生操作符。
//! 纯文本变换，幂等，本身不会失败，语法问题留给下游解析阶段报告。

use regex::Regex;
use std::sync::LazyLock;

static AND_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bAND\b").expect("regex literal"));
static OR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bOR\b").expect("regex literal"));

/// 归一化规则文本
///
/// 依次执行：整词 `AND` → `&&`，整词 `OR` → `||`，
/// 孤立的 `=` → `==`（已是 `==`/`===` 或属于 `>=`/`<=`/`!=` 的不改写）。
pub fn normalize(rule: &str) -> String {
    let replaced = AND_RE.replace_all(rule, "&&");
    let replaced = OR_RE.replace_all(&replaced, "||");
    expand_equals(&replaced)
}

/// 将孤立的 `=` 扩写为 `==`
///
/// 孤立指前一个字符不是 `=`/`!`/`<`/`>` 且后一个字符不是 `=`。
/// 这样 `a = b` 变成 `a == b`，而 `a == b`、`a >= b` 保持原样，
/// 重复归一化不会再次改写。
fn expand_equals(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        if c == '=' {
            let prev = i.checked_sub(1).and_then(|j| chars.get(j));
            let next = chars.get(i + 1);
            let standalone =
                !matches!(prev, Some('=' | '!' | '<' | '>')) && !matches!(next, Some('='));
            if standalone {
                out.push_str("==");
                continue;
            }
        }
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_replacement() {
        assert_eq!(
            normalize("age > 30 AND department = 'Sales'"),
            "age > 30 && department == 'Sales'"
        );
        assert_eq!(normalize("a OR b"), "a || b");
    }

    #[test]
    fn test_keywords_are_whole_word_only() {
        // ANDROID / ORDER 中的 AND / OR 不是整词，不替换
        assert_eq!(normalize("ANDROID > 1"), "ANDROID > 1");
        assert_eq!(normalize("ORDER = 2"), "ORDER == 2");
    }

    #[test]
    fn test_single_equals_expansion() {
        assert_eq!(normalize("a = b"), "a == b");
        assert_eq!(normalize("a == b"), "a == b");
        assert_eq!(normalize("a === b"), "a === b");
    }

    #[test]
    fn test_compound_operators_untouched() {
        assert_eq!(normalize("a >= 1"), "a >= 1");
        assert_eq!(normalize("a <= 1"), "a <= 1");
        assert_eq!(normalize("a != 1"), "a != 1");
        assert_eq!(normalize("a !== 1"), "a !== 1");
    }

    #[test]
    fn test_idempotent() {
        let cases = [
            "age > 30 AND department = 'Sales'",
            "a = b OR c >= d",
            "x == y && z != w",
            "(a = 1 OR b = 2) AND c = 3",
        ];
        for case in cases {
            let once = normalize(case);
            assert_eq!(normalize(&once), once, "归一化不幂等: {case}");
        }
    }

    #[test]
    fn test_lowercase_keywords_not_replaced() {
        // 关键字替换大小写敏感
        assert_eq!(normalize("a and b"), "a and b");
    }
}
