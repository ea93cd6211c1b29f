//! 错误类型定义

use thiserror::Error;

/// 依赖注入错误类型
///
/// 除 [`DependencyError::UnknownBeanName`] 与 [`DependencyError::TypeMismatch`] 外，
/// 其余错误均为配置错误，会中止容器构建。
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("无法满足的依赖: {definition} 缺少参数 {missing}, 待解析定义: [{}]{}", .pending.join(", "), format_cycle(.cycle))]
    UnsatisfiableDependency {
        definition: String,
        missing: String,
        pending: Vec<String>,
        cycle: Option<String>,
    },

    #[error("Bean 名称重复: {name}")]
    DuplicateBeanName { name: String },

    #[error("参数存在多个候选 Bean: {definition} 的参数 {parameter}, 候选: [{}]", .candidates.join(", "))]
    AmbiguousBean {
        definition: String,
        parameter: String,
        candidates: Vec<String>,
    },

    #[error("参数没有匹配的 Bean: {definition} 的参数 {parameter}")]
    NoMatchingBean { definition: String, parameter: String },

    #[error("不支持的聚合类型: {definition} 的参数 {parameter}, 形态: {shape}")]
    UnsupportedComposite {
        definition: String,
        parameter: String,
        shape: String,
    },

    #[error("配置无效: {definition} 需要 {configuration} 实例, 但该配置没有可用的无参构造")]
    BadConfiguration {
        definition: String,
        configuration: String,
    },

    #[error("Bean 不存在: {name}")]
    UnknownBeanName { name: String },

    #[error("Bean 类型不匹配: {name}, 期望 {expected}, 实际 {actual}")]
    TypeMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    #[error("循环依赖检测到: {dependency_chain}")]
    CircularDependency { dependency_chain: String },

    #[error("组件创建失败: {type_name}, 原因: {source}")]
    ComponentCreationFailed {
        type_name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl DependencyError {
    /// 是否为配置错误（容器构建不可恢复）
    pub fn is_configuration_error(&self) -> bool {
        !matches!(
            self,
            Self::UnknownBeanName { .. } | Self::TypeMismatch { .. }
        )
    }

    /// 创建 Bean 不存在错误
    pub fn unknown_bean(name: impl Into<String>) -> Self {
        Self::UnknownBeanName { name: name.into() }
    }

    /// 创建组件创建失败错误
    pub fn creation_failed(
        type_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let message: String = message.into();
        Self::ComponentCreationFailed {
            type_name: type_name.into(),
            source: message.into(),
        }
    }
}

fn format_cycle(cycle: &Option<String>) -> String {
    cycle
        .as_ref()
        .map(|chain| format!(", 循环: {chain}"))
        .unwrap_or_default()
}

/// 结果类型别名
pub type DependencyResult<T> = Result<T, DependencyError>;
