//! 规则表达式词法单元
//!
//! 基于 logos 的 Token 定义。归一化后的规则文本在这里切分，
//! 无法识别的字符由解析层转成带位置信息的解析错误。

use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    // 逻辑操作符
    #[token("&&")]
    AndAnd,

    #[token("||")]
    OrOr,

    #[token("!==")]
    StrictNotEq,

    #[token("!=")]
    NotEq,

    #[token("!")]
    Bang,

    // 比较操作符
    #[token("===")]
    StrictEq,

    #[token("==")]
    EqEq,

    #[token(">=")]
    GreaterEq,

    #[token(">")]
    Greater,

    #[token("<=")]
    LessEq,

    #[token("<")]
    Less,

    // 算术操作符（语法上接受，求值阶段不支持时报错）
    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    // 分隔符
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("?")]
    Question,

    #[token(":")]
    Colon,

    // 字面量
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().to_string())]
    Number(String),

    #[regex(r#""([^"\\]|\\.)*""#, |lex| unquote(lex.slice()))]
    #[regex(r#"'([^'\\]|\\.)*'"#, |lex| unquote(lex.slice()))]
    Str(String),

    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),

    // 标识符：字段名，允许点号分隔的嵌套路径（如 user.age）
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z0-9_]+)*", |lex| lex.slice().to_string())]
    Ident(String),
}

/// 去掉字符串字面量两端的引号
fn unquote(quoted: &str) -> String {
    quoted[1..quoted.len() - 1].to_string()
}
