//! API 处理器模块

pub mod rule;
