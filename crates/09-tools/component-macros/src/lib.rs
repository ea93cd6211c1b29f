//! # Component Macros
//!
//! 这个 crate 提供了在编译期声明 Bean 工厂的过程宏。
//!
//! ## 核心宏
//!
//! - [`configuration`] - 把固有 impl 块中标记的函数注册为 Bean 工厂
//! - [`bean`] / [`prototype`] - 工厂标记，只在 `#[configuration]` 内有效
//!
//! ## 使用示例
//!
//! ```rust
//! use component_macros::configuration;
//! use std::sync::Arc;
//!
//! pub struct Star;
//! pub struct Planet;
//! pub struct StarSystem(Arc<Star>, Vec<Arc<Planet>>);
//!
//! #[derive(Default)]
//! pub struct SpaceConfig;
//!
//! #[configuration(default)]
//! impl SpaceConfig {
//!     #[bean("Sun")]
//!     fn sun() -> Star {
//!         Star
//!     }
//!
//!     #[bean(name = "Mars", prototype)]
//!     fn mars(&self) -> Planet {
//!         Planet
//!     }
//!
//!     #[bean]
//!     fn system(star: Arc<Star>, planets: Vec<Arc<Planet>>) -> StarSystem {
//!         StarSystem(star, planets)
//!     }
//! }
//! ```

use proc_macro::TokenStream;

mod args;
mod configuration;
mod utils;

// Re-exports are not allowed in proc-macro crates

/// 配置源宏
///
/// 为 impl 块的类型实现 `di_abstractions::Configuration`，
/// 块内带 `#[bean]` 或 `#[prototype]` 标记的函数成为 Bean 工厂：
/// 以 `&self` 为接收者的函数注册为绑定方法，其余注册为普通函数。
///
/// # 参数
///
/// - `default` - 通过 `Default` 创建配置实例，绑定方法需要
/// - `name = "Name"` - 自定义配置源名称
///
/// # 示例
///
/// ```rust,ignore
/// #[configuration(default)]
/// impl SpaceConfig {
///     #[bean("Earth")]
///     fn earth(&self) -> Planet {
///         Planet
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn configuration(args: TokenStream, input: TokenStream) -> TokenStream {
    configuration::configuration_impl(args, input)
}

/// Bean 工厂标记
///
/// # 参数
///
/// - `"Name"` 或 `name = "Name"` - 显式名称，缺省时使用 `函数名#序号`
/// - `prototype` - 每次查找都创建新实例
#[proc_macro_attribute]
pub fn bean(_args: TokenStream, input: TokenStream) -> TokenStream {
    misplaced_marker(BEAN_USAGE, input)
}

/// 原型工厂标记，等价于 `#[bean(prototype)]`
#[proc_macro_attribute]
pub fn prototype(_args: TokenStream, input: TokenStream) -> TokenStream {
    misplaced_marker(PROTOTYPE_USAGE, input)
}

const BEAN_USAGE: &str = "#[bean] 只能用于 #[configuration] impl 块中的函数";
const PROTOTYPE_USAGE: &str = "#[prototype] 只能用于 #[configuration] impl 块中的函数";

// 标记在 #[configuration] 展开时已被移除，能走到这里说明用错了位置
fn misplaced_marker(message: &str, input: TokenStream) -> TokenStream {
    let input = proc_macro2::TokenStream::from(input);
    let error = syn::Error::new(proc_macro2::Span::call_site(), message).to_compile_error();
    TokenStream::from(quote::quote! {
        #error
        #input
    })
}
