use crate::template::{Segment, SlotArg, parse_template};
use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Error, Expr, LitStr, Result, Token};

/// `sql!("template", args...)`
pub(crate) struct SqlInput {
    template: LitStr,
    args: Vec<Expr>,
}

impl Parse for SqlInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let template: LitStr = input.parse()?;
        let args = if input.is_empty() {
            Vec::new()
        } else {
            input.parse::<Token![,]>()?;
            Punctuated::<Expr, Token![,]>::parse_terminated(input)?
                .into_iter()
                .collect()
        };
        Ok(Self { template, args })
    }
}

pub(crate) fn expand(input: SqlInput) -> Result<TokenStream> {
    let span = input.template.span();
    let segments = parse_template(&input.template.value(), span)?;

    // Positional arguments are evaluated once, up front, in order.
    let arg_idents: Vec<_> = (0..input.args.len())
        .map(|i| format_ident!("__sql_arg{}", i, span = Span::mixed_site()))
        .collect();
    let arg_bindings = input.args.iter().zip(&arg_idents).map(|(expr, ident)| {
        quote! { let #ident = &(#expr); }
    });

    let builder = format_ident!("__sql_builder", span = Span::mixed_site());
    let label = syn::Lifetime::new("'__sql", Span::mixed_site());

    let mut used = vec![false; input.args.len()];
    let mut next = 0usize;
    let mut fallible = false;
    let mut steps = Vec::with_capacity(segments.len());

    for segment in segments {
        match segment {
            Segment::Literal(text) => {
                steps.push(quote! { #builder.append_literal(#text); });
            }
            Segment::Slot { arg, literal } => {
                let target = match arg {
                    SlotArg::Next => {
                        let idx = next;
                        next += 1;
                        positional(&arg_idents, &mut used, idx, span)?
                    }
                    SlotArg::Index(idx) => positional(&arg_idents, &mut used, idx, span)?,
                    SlotArg::Inline(expr) => quote! { &(#expr) },
                };
                if literal {
                    steps.push(quote! {
                        #builder.append_literal(::core::convert::AsRef::<str>::as_ref(#target));
                    });
                } else {
                    fallible = true;
                    steps.push(quote! {
                        if let ::core::result::Result::Err(e) =
                            ::sqlbind::Fragment::append_to(#target, &mut #builder)
                        {
                            break #label ::core::result::Result::Err(e);
                        }
                    });
                }
            }
        }
    }

    if let Some(unused) = used.iter().position(|u| !u) {
        return Err(Error::new(
            input.args[unused].span(),
            "argument never used in sql template",
        ));
    }

    let capacity = steps.len();
    let ok = quote! {
        ::core::result::Result::<::sqlbind::SqlQueryBuilder, ::sqlbind::SqlError>::Ok(#builder)
    };
    let body = if fallible {
        quote! { #label: { #(#steps)* #ok } }
    } else {
        quote! { #(#steps)* #ok }
    };

    Ok(quote! {
        {
            #(#arg_bindings)*
            #[allow(unused_mut)]
            let mut #builder = ::sqlbind::SqlQueryBuilder::with_capacity(#capacity);
            #body
        }
    })
}

fn positional(
    idents: &[syn::Ident],
    used: &mut [bool],
    idx: usize,
    span: Span,
) -> Result<TokenStream> {
    let Some(ident) = idents.get(idx) else {
        return Err(Error::new(
            span,
            format!(
                "sql template refers to argument {idx}, but {} argument(s) were given",
                idents.len()
            ),
        ));
    };
    used[idx] = true;
    Ok(quote! { #ident })
}
