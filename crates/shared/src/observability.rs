//! 日志初始化模块
//!
//! 基于 tracing-subscriber 的统一日志配置：环境过滤 + pretty/JSON 双格式。
//! 服务在启动早期调用一次 `init`，之后全程使用 `tracing` 宏输出。

use crate::config::ObservabilityConfig;
use anyhow::Result;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// 初始化全局日志订阅器
///
/// RUST_LOG 环境变量优先于配置文件中的 log_level。
/// 重复初始化（如测试场景）返回错误而不是 panic。
pub fn init(service_name: &str, config: &ObservabilityConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = if config.log_format == "json" {
        fmt::layer()
            .json()
            .with_span_events(FmtSpan::CLOSE)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer().with_target(true).with_ansi(true).boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    info!(service = %service_name, "Observability initialized");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_init_returns_error_not_panic() {
        let config = ObservabilityConfig::default();
        init("test-service", &config).unwrap();
        // 全局订阅器已注册，再次初始化应报错而不是 panic
        assert!(init("test-service", &config).is_err());
    }
}
