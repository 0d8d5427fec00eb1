//! 规则表达式语法分析
//!
//! 递归下降解析，按标准优先级（`||` < `&&` < 相等 < 大小比较 <
//! 加减 < 乘除 < 一元 < 原子）产出通用表达式树。
//! 通用树允许少量规范模型不支持的结构（如三元表达式），统一由
//! AST 构建阶段拒绝，保证「能解析」和「能表示」两类错误可区分。

use crate::error::{Result, RuleError};
use crate::token::Token;
use logos::Logos;
use std::ops::Range;

/// 通用表达式树
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary {
        op: &'static str,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: &'static str,
        operand: Box<Expr>,
    },
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    Number(String),
    Str(String),
    Bool(bool),
    Identifier(String),
}

/// 解析归一化后的规则文本
///
/// 任何语法错误立即失败并携带字节位置和出错片段，不返回部分树。
pub fn parse(input: &str) -> Result<Expr> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        input,
    };
    let expr = parser.parse_expression()?;
    parser.expect_end()?;
    Ok(expr)
}

/// 词法分析：整串切分，遇到非法字符立即报错
fn tokenize(input: &str) -> Result<Vec<(Token, Range<usize>)>> {
    let mut lexer = Token::lexer(input);
    let mut tokens = Vec::new();

    while let Some(item) = lexer.next() {
        let span = lexer.span();
        match item {
            Ok(token) => tokens.push((token, span)),
            Err(()) => {
                return Err(RuleError::Parse {
                    position: span.start,
                    message: format!("无法识别的符号 '{}'", &input[span]),
                });
            }
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: Vec<(Token, Range<usize>)>,
    pos: usize,
    input: &'a str,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).map(|(token, _)| token.clone());
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// 当前位置（用于错误信息），流末尾时为输入长度
    fn position(&self) -> usize {
        self.tokens
            .get(self.pos)
            .map(|(_, span)| span.start)
            .unwrap_or(self.input.len())
    }

    fn fragment(&self) -> &str {
        self.tokens
            .get(self.pos)
            .map(|(_, span)| &self.input[span.clone()])
            .unwrap_or("<末尾>")
    }

    fn error(&self, message: impl Into<String>) -> RuleError {
        RuleError::Parse {
            position: self.position(),
            message: message.into(),
        }
    }

    fn expect(&mut self, expected: Token, what: &str) -> Result<()> {
        if self.peek() == Some(&expected) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(format!("期望 {what}, 实际是 '{}'", self.fragment())))
        }
    }

    fn expect_end(&self) -> Result<()> {
        if self.pos < self.tokens.len() {
            Err(self.error(format!("表达式之后存在多余内容 '{}'", self.fragment())))
        } else {
            Ok(())
        }
    }

    // expression := conditional
    fn parse_expression(&mut self) -> Result<Expr> {
        self.parse_conditional()
    }

    // conditional := or ('?' expression ':' conditional)?
    fn parse_conditional(&mut self) -> Result<Expr> {
        let test = self.parse_or()?;

        if self.peek() == Some(&Token::Question) {
            self.pos += 1;
            let consequent = self.parse_expression()?;
            self.expect(Token::Colon, "':'")?;
            let alternate = self.parse_conditional()?;
            return Ok(Expr::Conditional {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
            });
        }

        Ok(test)
    }

    // or := and ('||' and)*
    fn parse_or(&mut self) -> Result<Expr> {
        let mut left = self.parse_and()?;
        while self.peek() == Some(&Token::OrOr) {
            self.pos += 1;
            let right = self.parse_and()?;
            left = binary("||", left, right);
        }
        Ok(left)
    }

    // and := equality ('&&' equality)*
    fn parse_and(&mut self) -> Result<Expr> {
        let mut left = self.parse_equality()?;
        while self.peek() == Some(&Token::AndAnd) {
            self.pos += 1;
            let right = self.parse_equality()?;
            left = binary("&&", left, right);
        }
        Ok(left)
    }

    // equality := relational (('==' | '===' | '!=' | '!==') relational)*
    fn parse_equality(&mut self) -> Result<Expr> {
        let mut left = self.parse_relational()?;
        loop {
            let op = match self.peek() {
                Some(Token::EqEq) => "==",
                Some(Token::StrictEq) => "===",
                Some(Token::NotEq) => "!=",
                Some(Token::StrictNotEq) => "!==",
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_relational()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    // relational := additive (('>' | '>=' | '<' | '<=') additive)*
    fn parse_relational(&mut self) -> Result<Expr> {
        let mut left = self.parse_additive()?;
        loop {
            let op = match self.peek() {
                Some(Token::Greater) => ">",
                Some(Token::GreaterEq) => ">=",
                Some(Token::Less) => "<",
                Some(Token::LessEq) => "<=",
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_additive()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    // additive := multiplicative (('+' | '-') multiplicative)*
    fn parse_additive(&mut self) -> Result<Expr> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => "+",
                Some(Token::Minus) => "-",
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_multiplicative()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    // multiplicative := unary (('*' | '/' | '%') unary)*
    fn parse_multiplicative(&mut self) -> Result<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => "*",
                Some(Token::Slash) => "/",
                Some(Token::Percent) => "%",
                _ => break,
            };
            self.pos += 1;
            let right = self.parse_unary()?;
            left = binary(op, left, right);
        }
        Ok(left)
    }

    // unary := ('!' | '-') unary | primary
    fn parse_unary(&mut self) -> Result<Expr> {
        let op = match self.peek() {
            Some(Token::Bang) => "!",
            Some(Token::Minus) => "-",
            _ => return self.parse_primary(),
        };
        self.pos += 1;
        let operand = self.parse_unary()?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    // primary := number | string | bool | identifier | '(' expression ')'
    fn parse_primary(&mut self) -> Result<Expr> {
        match self.advance() {
            Some(Token::Number(text)) => Ok(Expr::Number(text)),
            Some(Token::Str(text)) => Ok(Expr::Str(text)),
            Some(Token::Bool(value)) => Ok(Expr::Bool(value)),
            Some(Token::Ident(name)) => Ok(Expr::Identifier(name)),
            Some(Token::LParen) => {
                let expr = self.parse_expression()?;
                self.expect(Token::RParen, "')'")?;
                Ok(expr)
            }
            Some(_) => {
                // advance 已越过出错的 token，回退一格让错误指向它
                self.pos -= 1;
                Err(self.error(format!("意外的符号 '{}'", self.fragment())))
            }
            None => Err(self.error("表达式不完整，缺少操作数")),
        }
    }
}

fn binary(op: &'static str, left: Expr, right: Expr) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}
