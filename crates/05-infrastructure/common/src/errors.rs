//! 错误类型定义

use crate::lifecycle::Lifetime;
use thiserror::Error;

/// 依赖解析错误类型
///
/// 由容器在解析或构造实例时产生。
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("服务未注册: {type_name}")]
    ServiceNotRegistered { type_name: String },

    #[error("服务创建失败: {type_name}, 原因: {source}")]
    ServiceCreationFailed {
        type_name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("类型不匹配: 期望 {expected}, 实际 {actual}")]
    TypeMismatch { expected: String, actual: String },

    #[error("服务注册失败: {type_name}, 原因: {message}")]
    RegistrationError { type_name: String, message: String },
}

impl DependencyError {
    /// 创建未注册错误
    pub fn not_registered(type_name: impl Into<String>) -> Self {
        Self::ServiceNotRegistered {
            type_name: type_name.into(),
        }
    }

    /// 创建类型不匹配错误
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// 包装构造过程中的任意错误
    pub fn creation_failed<E>(type_name: impl Into<String>, source: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::ServiceCreationFailed {
            type_name: type_name.into(),
            source: source.into(),
        }
    }
}

/// 注入配置错误类型
///
/// 全部在启动期（扫描、注册、启动实例化）检测，默认视为致命错误。
#[derive(Error, Debug)]
pub enum InjectionError {
    #[error("无效的工厂类型: {declared} 声明的工厂 {factory}, 原因: {reason}")]
    InvalidFactory {
        declared: String,
        factory: String,
        reason: String,
    },

    #[error("服务注册不明确: {declared} 以不同生命周期多次注册到 {target}: {lifetimes:?}")]
    AmbiguousRegistration {
        declared: String,
        target: String,
        lifetimes: Vec<Lifetime>,
    },

    #[error("缺少构造器: {declared} 无法直接构造 {implementation}")]
    MissingActivator {
        declared: String,
        implementation: String,
    },

    #[error("构造器不匹配: {declared} 期望 {expected}, 实际 {actual}")]
    ActivatorMismatch {
        declared: String,
        expected: String,
        actual: String,
    },

    #[error("服务注册失败: {source}")]
    Registration {
        #[from]
        source: DependencyError,
    },

    #[error("启动实例化失败: {target}, 原因: {source}")]
    BootInstantiation {
        target: String,
        source: DependencyError,
    },

    #[error("注入配置加载失败: {message}")]
    Settings { message: String },
}

impl InjectionError {
    /// 创建无效工厂错误
    pub fn invalid_factory(
        declared: impl Into<String>,
        factory: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidFactory {
            declared: declared.into(),
            factory: factory.into(),
            reason: reason.into(),
        }
    }

    /// 创建配置加载错误
    pub fn settings(message: impl Into<String>) -> Self {
        Self::Settings {
            message: message.into(),
        }
    }
}

/// 依赖解析结果
pub type DependencyResult<T> = Result<T, DependencyError>;

/// 启动期注入结果
pub type InjectionResult<T> = Result<T, InjectionError>;
