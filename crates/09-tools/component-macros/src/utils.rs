//! 宏工具函数

use syn::{Attribute, FnArg, Signature};

/// 标记属性名称
pub const BEAN_ATTRIBUTE: &str = "bean";
/// 原型标记属性名称
pub const PROTOTYPE_ATTRIBUTE: &str = "prototype";

/// 工厂的接收者形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverKind {
    /// 没有接收者的关联函数
    Free,
    /// `&self`
    Shared,
}

/// 检查属性名称
pub fn is_attribute(attr: &Attribute, name: &str) -> bool {
    attr.path()
        .get_ident()
        .map(|ident| ident == name)
        .unwrap_or(false)
}

/// 是否为 Bean 标记属性
pub fn is_marker(attr: &Attribute) -> bool {
    is_attribute(attr, BEAN_ATTRIBUTE) || is_attribute(attr, PROTOTYPE_ATTRIBUTE)
}

/// 移除全部 Bean 标记属性
pub fn strip_markers(attrs: &mut Vec<Attribute>) {
    attrs.retain(|attr| !is_marker(attr));
}

/// 判断工厂的接收者形式，只接受 `&self`
pub fn receiver_kind(sig: &Signature) -> syn::Result<ReceiverKind> {
    match sig.inputs.first() {
        Some(FnArg::Receiver(receiver)) => {
            if receiver.reference.is_none() || receiver.mutability.is_some() {
                return Err(syn::Error::new_spanned(
                    receiver,
                    "工厂方法的接收者必须是 &self",
                ));
            }
            Ok(ReceiverKind::Shared)
        }
        _ => Ok(ReceiverKind::Free),
    }
}

/// 检查工厂签名是否可以注册
pub fn check_signature(sig: &Signature) -> syn::Result<()> {
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(asyncness, "工厂不能是 async 函数"));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(&sig.generics, "工厂不能带泛型参数"));
    }
    if matches!(sig.output, syn::ReturnType::Default) {
        return Err(syn::Error::new_spanned(sig, "工厂必须有返回值"));
    }
    Ok(())
}
