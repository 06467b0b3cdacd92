//! 服务生命周期定义

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 服务生命周期类型
///
/// 决定容器如何复用实例。默认为 [`Lifetime::Scoped`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifetime {
    /// 瞬时模式 - 每次解析都创建新实例
    Transient,
    /// 作用域模式 - 在同一作用域内共享实例
    #[default]
    Scoped,
    /// 单例模式 - 整个进程生命周期内只创建一个实例
    Singleton,
}

impl Lifetime {
    /// 生命周期名称（小写）
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifetime::Transient => "transient",
            Lifetime::Scoped => "scoped",
            Lifetime::Singleton => "singleton",
        }
    }

    /// 是否在解析之间复用实例
    pub fn is_shared(&self) -> bool {
        !matches!(self, Lifetime::Transient)
    }
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 生命周期名称解析失败
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("无效的生命周期: {0}")]
pub struct ParseLifetimeError(pub String);

impl FromStr for Lifetime {
    type Err = ParseLifetimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "transient" => Ok(Lifetime::Transient),
            "scoped" => Ok(Lifetime::Scoped),
            "singleton" => Ok(Lifetime::Singleton),
            other => Err(ParseLifetimeError(other.to_string())),
        }
    }
}
