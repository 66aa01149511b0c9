//! 日志初始化
//!
//! 库内部只使用 `tracing` 宏记录事件，订阅者由宿主程序决定。
//! 这里提供一个默认的 fmt 订阅者，日志级别来自 `BOND_GATEWAY_LOG_LEVEL`。

use tracing::Level;

use crate::env::{core::LogLevel, EnvVar};

/// 将日志级别字符串转换为 `tracing::Level`
///
/// 无法识别的值回退到 `INFO`。
pub fn parse_level(value: &str) -> Level {
    value.trim().parse().unwrap_or(Level::INFO)
}

/// 安装全局 fmt 订阅者
///
/// 重复调用是安全的：如果全局订阅者已经存在，则保留原来的订阅者并返回 `false`。
pub fn init_logging() -> bool {
    let level = match LogLevel::get() {
        Ok(value) => parse_level(&value),
        Err(e) => {
            eprintln!("{}，使用默认日志级别 info", e);
            Level::INFO
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("trace"), Level::TRACE);
        assert_eq!(parse_level("DEBUG"), Level::DEBUG);
        assert_eq!(parse_level("warn"), Level::WARN);
        assert_eq!(parse_level("error"), Level::ERROR);
        assert_eq!(parse_level("info"), Level::INFO);
        assert_eq!(parse_level("verbose"), Level::INFO);
    }

    #[test]
    fn test_init_logging_twice() {
        let _ = init_logging();
        // 第二次安装一定失败，但不能 panic
        assert!(!init_logging());
    }
}
