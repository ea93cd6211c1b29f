//! Bean 定义注册表
//!
//! 从配置源中提取 Bean 工厂声明，此阶段不创建任何实例

use crate::factory::{function_invoker, method_invoker, BeanFunction, BeanMethod, Invoker};
use crate::resolver::Parameters;
use infrastructure_common::{
    Argument, BeanInstance, DependencyError, DependencyResult, Lifetime, TypeDescriptor, TypeInfo,
};
use std::fmt::{self, Debug, Display, Formatter};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

/// 配置源 trait
///
/// 配置类型通过 [`Configuration::declare`] 声明自己提供的 Bean 工厂。
/// 绑定方法在每次调用前都会通过 [`Configuration::instantiate`] 创建新的配置实例，
/// 返回 `None` 表示该配置没有可用的无参构造。
///
/// # 示例
///
/// ```rust
/// use di_abstractions::{Configuration, Declarations};
/// use std::sync::Arc;
///
/// struct Star;
/// struct Planet;
/// struct StarSystem(Arc<Star>, Vec<Arc<Planet>>);
///
/// #[derive(Default)]
/// struct SpaceConfig;
///
/// impl SpaceConfig {
///     fn mars(&self) -> Planet {
///         Planet
///     }
/// }
///
/// impl Configuration for SpaceConfig {
///     fn declare(beans: &mut Declarations<Self>) {
///         beans.function("get_sun", || Star).named("Sun");
///         beans.method("get_mars", Self::mars).named("Mars");
///         beans
///             .function("get_system", |star: Arc<Star>, planets: Vec<Arc<Planet>>| {
///                 StarSystem(star, planets)
///             })
///             .prototype();
///     }
///
///     fn instantiate() -> Option<Self> {
///         Some(Self)
///     }
/// }
/// ```
pub trait Configuration: Send + Sync + Sized + 'static {
    /// 声明 Bean 工厂
    fn declare(beans: &mut Declarations<Self>);

    /// 创建配置实例
    fn instantiate() -> Option<Self> {
        None
    }

    /// 配置源名称
    fn source_name() -> &'static str {
        TypeInfo::of::<Self>().short_name()
    }
}

/// 创建配置实例的函数
pub type OwnerConstructor = Arc<dyn Fn() -> Option<BeanInstance> + Send + Sync>;

/// 单个 Bean 工厂声明
pub struct BeanDeclaration {
    identifier: String,
    name: Option<String>,
    lifetime: Lifetime,
    parameters: Vec<TypeDescriptor>,
    return_type: TypeInfo,
    bound: bool,
    invoker: Invoker,
}

impl BeanDeclaration {
    fn new(
        identifier: &str,
        parameters: Vec<TypeDescriptor>,
        return_type: TypeInfo,
        bound: bool,
        invoker: Invoker,
    ) -> Self {
        Self {
            identifier: identifier.to_string(),
            name: None,
            lifetime: Lifetime::Singleton,
            parameters,
            return_type,
            bound,
            invoker,
        }
    }

    /// 设置显式名称，空字符串表示使用生成的名称
    pub fn named(&mut self, name: impl Into<String>) -> &mut Self {
        let name = name.into();
        self.name = (!name.is_empty()).then_some(name);
        self
    }

    /// 声明为原型
    pub fn prototype(&mut self) -> &mut Self {
        self.with_lifetime(Lifetime::Prototype)
    }

    /// 设置生命周期
    pub fn with_lifetime(&mut self, lifetime: Lifetime) -> &mut Self {
        self.lifetime = lifetime;
        self
    }

    /// 工厂标识符
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// 显式名称
    pub fn explicit_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// 参数类型描述
    pub fn parameters(&self) -> &[TypeDescriptor] {
        &self.parameters
    }

    /// 返回类型
    pub fn return_type(&self) -> &TypeInfo {
        &self.return_type
    }

    /// 生命周期
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// 是否需要配置实例
    pub fn is_bound(&self) -> bool {
        self.bound
    }
}

impl Debug for BeanDeclaration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanDeclaration")
            .field("identifier", &self.identifier)
            .field("name", &self.name)
            .field("lifetime", &self.lifetime)
            .field("parameters", &self.parameters)
            .field("return_type", &self.return_type)
            .field("bound", &self.bound)
            .field("invoker", &"<function>")
            .finish()
    }
}

/// 配置源内的声明集合
pub struct Declarations<C> {
    entries: Vec<BeanDeclaration>,
    _configuration: PhantomData<fn() -> C>,
}

impl<C: Configuration> Declarations<C> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            _configuration: PhantomData,
        }
    }

    /// 声明不需要配置实例的工厂函数
    pub fn function<F, Args>(&mut self, identifier: &str, factory: F) -> &mut BeanDeclaration
    where
        F: BeanFunction<Args>,
        F::Output: Send + Sync + 'static,
        Args: Parameters,
    {
        self.push(BeanDeclaration::new(
            identifier,
            Args::descriptors(),
            TypeInfo::of::<F::Output>(),
            false,
            function_invoker(factory),
        ))
    }

    /// 声明以配置实例为接收者的工厂方法
    pub fn method<F, Args>(&mut self, identifier: &str, factory: F) -> &mut BeanDeclaration
    where
        F: BeanMethod<C, Args>,
        F::Output: Send + Sync + 'static,
        Args: Parameters,
    {
        self.push(BeanDeclaration::new(
            identifier,
            Args::descriptors(),
            TypeInfo::of::<F::Output>(),
            true,
            method_invoker::<C, F, Args>(factory),
        ))
    }

    /// 以手工给出的类型描述声明工厂函数
    pub fn raw<I>(
        &mut self,
        identifier: &str,
        parameters: Vec<TypeDescriptor>,
        return_type: TypeInfo,
        invoker: I,
    ) -> &mut BeanDeclaration
    where
        I: Fn(Vec<Argument>) -> DependencyResult<BeanInstance> + Send + Sync + 'static,
    {
        let invoker: Invoker = Arc::new(move |_: Option<&BeanInstance>, arguments: Vec<Argument>| {
            invoker(arguments)
        });
        self.push(BeanDeclaration::new(
            identifier,
            parameters,
            return_type,
            false,
            invoker,
        ))
    }

    fn push(&mut self, declaration: BeanDeclaration) -> &mut BeanDeclaration {
        let index = self.entries.len();
        self.entries.push(declaration);
        &mut self.entries[index]
    }

    /// 声明数量
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// 是否没有声明
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 已提取声明的配置源
pub struct ConfigSource {
    name: String,
    owner: TypeInfo,
    constructor: OwnerConstructor,
    declarations: Vec<BeanDeclaration>,
}

impl ConfigSource {
    /// 从配置类型提取声明
    pub fn of<C: Configuration>() -> Self {
        let mut beans = Declarations::<C>::new();
        C::declare(&mut beans);

        Self {
            name: C::source_name().to_string(),
            owner: TypeInfo::of::<C>(),
            constructor: Arc::new(|| C::instantiate().map(BeanInstance::new)),
            declarations: beans.entries,
        }
    }

    /// 配置源名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 配置类型
    pub fn owner(&self) -> &TypeInfo {
        &self.owner
    }

    /// 全部声明
    pub fn declarations(&self) -> &[BeanDeclaration] {
        &self.declarations
    }
}

impl Debug for ConfigSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigSource")
            .field("name", &self.name)
            .field("owner", &self.owner)
            .field("declarations", &self.declarations)
            .finish_non_exhaustive()
    }
}

/// 定义编号，即声明被发现的顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefinitionId(usize);

impl DefinitionId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    /// 发现顺序
    pub fn index(self) -> usize {
        self.0
    }
}

/// 工厂调用方式
#[derive(Clone)]
pub enum Receiver {
    /// 普通函数
    Free,
    /// 需要配置实例的方法
    Bound {
        /// 配置类型
        owner: TypeInfo,
        /// 配置实例构造函数
        constructor: OwnerConstructor,
    },
}

impl Receiver {
    /// 创建配置实例，`Ok(None)` 表示普通函数
    pub fn instantiate(&self, definition: &BeanDefinition) -> DependencyResult<Option<BeanInstance>> {
        match self {
            Self::Free => Ok(None),
            Self::Bound { owner, constructor } => {
                constructor()
                    .map(Some)
                    .ok_or_else(|| DependencyError::BadConfiguration {
                        definition: definition.to_string(),
                        configuration: owner.name.to_string(),
                    })
            }
        }
    }
}

impl Debug for Receiver {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => f.write_str("Free"),
            Self::Bound { owner, .. } => f.debug_struct("Bound").field("owner", owner).finish(),
        }
    }
}

/// Bean 定义
///
/// 提取后不可变，由注册表持有直到交给解析引擎。
pub struct BeanDefinition {
    id: DefinitionId,
    source: String,
    identifier: String,
    explicit_name: Option<String>,
    parameters: Vec<TypeDescriptor>,
    return_type: TypeInfo,
    lifetime: Lifetime,
    receiver: Receiver,
    invoker: Invoker,
}

impl BeanDefinition {
    /// 定义编号
    pub fn id(&self) -> DefinitionId {
        self.id
    }

    /// 所属配置源
    pub fn source(&self) -> &str {
        &self.source
    }

    /// 工厂标识符，生成名称时作为前缀
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// 显式名称
    pub fn explicit_name(&self) -> Option<&str> {
        self.explicit_name.as_deref()
    }

    /// 参数类型描述
    pub fn parameters(&self) -> &[TypeDescriptor] {
        &self.parameters
    }

    /// 参数数量
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// 返回类型
    pub fn return_type(&self) -> &TypeInfo {
        &self.return_type
    }

    /// 生命周期
    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// 调用方式
    pub fn receiver(&self) -> &Receiver {
        &self.receiver
    }

    /// 是否需要配置实例
    pub fn requires_receiver(&self) -> bool {
        matches!(self.receiver, Receiver::Bound { .. })
    }

    /// 调用工厂并校验返回类型
    pub fn invoke(
        &self,
        receiver: Option<&BeanInstance>,
        arguments: Vec<Argument>,
    ) -> DependencyResult<BeanInstance> {
        let bean = (self.invoker)(receiver, arguments)?;
        if bean.type_info().id != self.return_type.id {
            return Err(DependencyError::creation_failed(
                self.to_string(),
                format!(
                    "工厂返回 {}, 但声明的返回类型为 {}",
                    bean.type_info().name,
                    self.return_type.name
                ),
            ));
        }
        Ok(bean)
    }
}

impl Display for BeanDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.source, self.identifier)
    }
}

impl Debug for BeanDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BeanDefinition")
            .field("id", &self.id)
            .field("source", &self.source)
            .field("identifier", &self.identifier)
            .field("explicit_name", &self.explicit_name)
            .field("parameters", &self.parameters)
            .field("return_type", &self.return_type)
            .field("lifetime", &self.lifetime)
            .field("receiver", &self.receiver)
            .finish_non_exhaustive()
    }
}

/// Bean 定义注册表
#[derive(Debug, Default)]
pub struct DefinitionRegistry {
    definitions: Vec<Arc<BeanDefinition>>,
}

impl DefinitionRegistry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 载入配置源的全部声明，返回新增定义数量
    pub fn load(&mut self, source: ConfigSource) -> usize {
        let ConfigSource {
            name,
            owner,
            constructor,
            declarations,
        } = source;
        let count = declarations.len();

        for declaration in declarations {
            let receiver = if declaration.bound {
                Receiver::Bound {
                    owner,
                    constructor: constructor.clone(),
                }
            } else {
                Receiver::Free
            };

            let definition = BeanDefinition {
                id: DefinitionId::new(self.definitions.len()),
                source: name.clone(),
                identifier: declaration.identifier,
                explicit_name: declaration.name,
                parameters: declaration.parameters,
                return_type: declaration.return_type,
                lifetime: declaration.lifetime,
                receiver,
                invoker: declaration.invoker,
            };
            debug!(
                "提取 Bean 定义: {} -> {} ({})",
                definition, definition.return_type, definition.lifetime
            );
            self.definitions.push(Arc::new(definition));
        }

        count
    }

    /// 已提取的定义，按发现顺序排列
    pub fn definitions(&self) -> &[Arc<BeanDefinition>] {
        &self.definitions
    }

    /// 定义数量
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// 交给解析引擎的待解析队列
    ///
    /// 按参数数量升序稳定排序只是调度上的启发，不影响解析结果的正确性。
    pub fn into_pending(self, sort_by_parameter_count: bool) -> Vec<Arc<BeanDefinition>> {
        let mut pending = self.definitions;
        if sort_by_parameter_count {
            pending.sort_by_key(|definition| definition.parameter_count());
        }
        pending
    }
}
