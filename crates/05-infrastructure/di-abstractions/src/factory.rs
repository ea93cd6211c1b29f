//! Bean 工厂抽象接口
//!
//! 把普通函数和配置类型上的方法适配为类型擦除的工厂调用器

use crate::resolver::Parameters;
use infrastructure_common::{Argument, BeanInstance, DependencyError, DependencyResult};
use std::sync::Arc;

/// 类型擦除后的工厂调用器
///
/// 第一个参数是配置实例（仅绑定方法需要），第二个参数按声明顺序给出已解析的参数。
pub type Invoker = Arc<
    dyn Fn(Option<&BeanInstance>, Vec<Argument>) -> DependencyResult<BeanInstance>
        + Send
        + Sync,
>;

/// 不需要配置实例的工厂函数
pub trait BeanFunction<Args>: Send + Sync + 'static {
    /// 工厂产出的 Bean 类型
    type Output;

    /// 调用工厂
    fn call(&self, args: Args) -> Self::Output;
}

impl<F, R> BeanFunction<()> for F
where
    F: Fn() -> R + Send + Sync + 'static,
{
    type Output = R;

    #[inline]
    fn call(&self, _: ()) -> Self::Output {
        self()
    }
}

macro_rules! define_bean_function ({ $($param:ident)* } => {
    impl<F, R, $($param,)*> BeanFunction<($($param,)*)> for F
    where
        F: Fn($($param),*) -> R + Send + Sync + 'static,
    {
        type Output = R;

        #[inline]
        #[allow(non_snake_case)]
        fn call(&self, ($($param,)*): ($($param,)*)) -> Self::Output {
            (self)($($param,)*)
        }
    }
});

define_bean_function! { T1 }
define_bean_function! { T1 T2 }
define_bean_function! { T1 T2 T3 }
define_bean_function! { T1 T2 T3 T4 }
define_bean_function! { T1 T2 T3 T4 T5 }
define_bean_function! { T1 T2 T3 T4 T5 T6 }

/// 需要配置实例 `C` 的工厂方法
pub trait BeanMethod<C, Args>: Send + Sync + 'static {
    /// 工厂产出的 Bean 类型
    type Output;

    /// 以配置实例为接收者调用工厂
    fn call(&self, receiver: &C, args: Args) -> Self::Output;
}

impl<C, F, R> BeanMethod<C, ()> for F
where
    F: Fn(&C) -> R + Send + Sync + 'static,
{
    type Output = R;

    #[inline]
    fn call(&self, receiver: &C, _: ()) -> Self::Output {
        self(receiver)
    }
}

macro_rules! define_bean_method ({ $($param:ident)* } => {
    impl<C, F, R, $($param,)*> BeanMethod<C, ($($param,)*)> for F
    where
        F: Fn(&C, $($param),*) -> R + Send + Sync + 'static,
    {
        type Output = R;

        #[inline]
        #[allow(non_snake_case)]
        fn call(&self, receiver: &C, ($($param,)*): ($($param,)*)) -> Self::Output {
            (self)(receiver, $($param,)*)
        }
    }
});

define_bean_method! { T1 }
define_bean_method! { T1 T2 }
define_bean_method! { T1 T2 T3 }
define_bean_method! { T1 T2 T3 T4 }
define_bean_method! { T1 T2 T3 T4 T5 }
define_bean_method! { T1 T2 T3 T4 T5 T6 }

/// 为普通函数创建调用器
pub fn function_invoker<F, Args>(factory: F) -> Invoker
where
    F: BeanFunction<Args>,
    F::Output: Send + Sync + 'static,
    Args: Parameters,
{
    Arc::new(
        move |_: Option<&BeanInstance>, arguments: Vec<Argument>| -> DependencyResult<BeanInstance> {
            let args = Args::from_arguments(arguments)?;
            Ok(BeanInstance::new(factory.call(args)))
        },
    )
}

/// 为绑定方法创建调用器
pub fn method_invoker<C, F, Args>(factory: F) -> Invoker
where
    C: Send + Sync + 'static,
    F: BeanMethod<C, Args>,
    F::Output: Send + Sync + 'static,
    Args: Parameters,
{
    Arc::new(
        move |receiver: Option<&BeanInstance>, arguments: Vec<Argument>| -> DependencyResult<BeanInstance> {
            let receiver = receiver
                .ok_or_else(|| {
                    DependencyError::creation_failed(std::any::type_name::<C>(), "缺少配置实例")
                })?
                .downcast::<C>()?;
            let args = Args::from_arguments(arguments)?;
            Ok(BeanInstance::new(factory.call(&receiver, args)))
        },
    )
}
