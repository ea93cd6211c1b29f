//! 宏参数解析

use syn::{
    parse::Parse, parse::ParseStream, punctuated::Punctuated, Expr, Lit, LitStr, Meta, Result,
    Token,
};

/// `#[configuration(...)]` 的参数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationArgs {
    /// 通过 `Default` 创建配置实例
    pub default: bool,
    /// 自定义配置源名称
    pub name: Option<String>,
}

impl Parse for ConfigurationArgs {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let mut args = Self::default();

        let parsed = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        for meta in parsed {
            match meta {
                Meta::Path(path) if path.is_ident("default") => args.default = true,
                Meta::NameValue(nv) if nv.path.is_ident("name") => {
                    args.name = Some(string_value(&nv.value)?);
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "未知的 configuration 参数，可用参数: default, name = \"...\"",
                    ))
                }
            }
        }

        Ok(args)
    }
}

/// `#[bean(...)]` / `#[prototype(...)]` 的参数
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeanArgs {
    /// 显式名称
    pub name: Option<String>,
    /// 是否为原型
    pub prototype: bool,
}

impl BeanArgs {
    /// 解析标记属性的参数，`#[bean]` 与 `#[bean()]` 等价
    pub fn from_attribute(attr: &syn::Attribute, prototype: bool) -> Result<Self> {
        let mut args = match &attr.meta {
            Meta::Path(_) => Self::default(),
            Meta::List(list) if list.tokens.is_empty() => Self::default(),
            Meta::List(list) => list.parse_args::<Self>()?,
            Meta::NameValue(nv) => {
                return Err(syn::Error::new_spanned(nv, "请使用 #[bean(\"Name\")] 指定名称"))
            }
        };
        args.prototype |= prototype;
        Ok(args)
    }
}

impl Parse for BeanArgs {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let mut args = Self::default();

        // 位置参数形式的名称
        if input.peek(LitStr) {
            let name: LitStr = input.parse()?;
            args.name = Some(name.value());
            if input.is_empty() {
                return Ok(args);
            }
            input.parse::<Token![,]>()?;
        }

        let parsed = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        for meta in parsed {
            match meta {
                Meta::Path(path) if path.is_ident("prototype") => args.prototype = true,
                Meta::Path(path) if path.is_ident("singleton") => args.prototype = false,
                Meta::NameValue(nv) if nv.path.is_ident("name") => {
                    args.name = Some(string_value(&nv.value)?);
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "未知的 bean 参数，可用参数: \"Name\", name = \"...\", prototype, singleton",
                    ))
                }
            }
        }

        Ok(args)
    }
}

fn string_value(expr: &Expr) -> Result<String> {
    match expr {
        Expr::Lit(expr_lit) => match &expr_lit.lit {
            Lit::Str(lit_str) => Ok(lit_str.value()),
            _ => Err(syn::Error::new_spanned(expr, "期望字符串字面量")),
        },
        _ => Err(syn::Error::new_spanned(expr, "期望字符串字面量")),
    }
}
