//! `#[configuration]` 宏实现

use crate::args::{BeanArgs, ConfigurationArgs};
use crate::utils::{self, ReceiverKind, BEAN_ATTRIBUTE, PROTOTYPE_ATTRIBUTE};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, ImplItem, ImplItemFn, ItemImpl};

/// 从 impl 块中收集到的工厂
struct Factory {
    ident: syn::Ident,
    receiver: ReceiverKind,
    args: BeanArgs,
}

impl Factory {
    /// 生成 `declare` 中的一条声明语句
    fn declaration(&self) -> TokenStream2 {
        let ident = &self.ident;
        let identifier = ident.to_string();
        let register = match self.receiver {
            ReceiverKind::Free => quote! { beans.function(#identifier, Self::#ident) },
            ReceiverKind::Shared => quote! { beans.method(#identifier, Self::#ident) },
        };
        let name = self.args.name.as_ref().map(|name| quote! { .named(#name) });
        let prototype = self.args.prototype.then(|| quote! { .prototype() });

        quote! {
            #register #name #prototype;
        }
    }
}

/// 实现 #[configuration] 宏
pub fn configuration_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let configuration_args = if args.is_empty() {
        ConfigurationArgs::default()
    } else {
        match syn::parse::<ConfigurationArgs>(args) {
            Ok(args) => args,
            Err(e) => return e.to_compile_error().into(),
        }
    };

    let mut item_impl = parse_macro_input!(input as ItemImpl);

    match expand(&configuration_args, &mut item_impl) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(args: &ConfigurationArgs, item_impl: &mut ItemImpl) -> syn::Result<TokenStream2> {
    if let Some((_, path, _)) = &item_impl.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[configuration] 只能用于固有 impl 块",
        ));
    }

    let mut factories = Vec::new();
    for item in &mut item_impl.items {
        if let ImplItem::Fn(function) = item {
            if let Some(factory) = collect_factory(function)? {
                factories.push(factory);
            }
        }
    }

    let self_ty = &item_impl.self_ty;
    let (impl_generics, _, where_clause) = item_impl.generics.split_for_impl();
    let declarations = factories.iter().map(Factory::declaration);

    let instantiate = args.default.then(|| {
        quote! {
            fn instantiate() -> ::core::option::Option<Self> {
                ::core::option::Option::Some(<Self as ::core::default::Default>::default())
            }
        }
    });
    let source_name = args.name.as_ref().map(|name| {
        quote! {
            fn source_name() -> &'static str {
                #name
            }
        }
    });

    Ok(quote! {
        #item_impl

        impl #impl_generics ::di_abstractions::Configuration for #self_ty #where_clause {
            fn declare(beans: &mut ::di_abstractions::Declarations<Self>) {
                #(#declarations)*
            }

            #instantiate

            #source_name
        }
    })
}

/// 读取并移除工厂上的标记属性，没有标记时返回 `None`
fn collect_factory(function: &mut ImplItemFn) -> syn::Result<Option<Factory>> {
    let mut args: Option<BeanArgs> = None;
    for attr in &function.attrs {
        let parsed = if utils::is_attribute(attr, BEAN_ATTRIBUTE) {
            BeanArgs::from_attribute(attr, false)?
        } else if utils::is_attribute(attr, PROTOTYPE_ATTRIBUTE) {
            BeanArgs::from_attribute(attr, true)?
        } else {
            continue;
        };

        // #[bean("Name")] 与 #[prototype] 可以同时出现
        args = Some(match args {
            Some(previous) => BeanArgs {
                name: parsed.name.or(previous.name),
                prototype: previous.prototype || parsed.prototype,
            },
            None => parsed,
        });
    }

    let Some(args) = args else {
        return Ok(None);
    };

    utils::check_signature(&function.sig)?;
    let receiver = utils::receiver_kind(&function.sig)?;
    utils::strip_markers(&mut function.attrs);

    Ok(Some(Factory {
        ident: function.sig.ident.clone(),
        receiver,
        args,
    }))
}
