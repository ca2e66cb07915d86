//! Code generation for the kprintf macros.

use crate::tokenization::tokenize_format_string;
use crate::validation::count_native_reads;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Expr, Ident, LitStr};

/// Checks the template against the arguments and builds the call to the
/// runtime entry point `entry` (`format_to` or `format_to_slice`).
///
/// Each argument is boxed with `Arg::from` in call order.
pub fn generate_format_call(
    entry: &str,
    target: &Expr,
    format_lit: &LitStr,
    explicit_args: &[&Expr],
) -> syn::Result<TokenStream> {
    let format_str = format_lit.value();
    let tokens = tokenize_format_string(&format_str, format_lit)?;
    let expected = count_native_reads(&tokens, format_lit)?;

    if expected != explicit_args.len() {
        return Err(syn::Error::new(
            format_lit.span(),
            format!(
                "Template reads {expected} argument{} but {} {} supplied.",
                if expected == 1 { "" } else { "s" },
                explicit_args.len(),
                if explicit_args.len() == 1 { "was" } else { "were" },
            ),
        ));
    }

    let entry = Ident::new(entry, proc_macro2::Span::call_site());
    Ok(quote! {
        ::kprintf::#entry(
            #target,
            #format_lit,
            &[#(::kprintf::Arg::from(#explicit_args)),*],
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(format_lit: LitStr, args: &[Expr]) -> syn::Result<TokenStream> {
        let target: Expr = syn::parse_quote!(&mut out);
        let args: Vec<&Expr> = args.iter().collect();
        generate_format_call("format_to", &target, &format_lit, &args)
    }

    #[test]
    fn test_expansion_boxes_arguments() {
        let code = generate(
            syn::parse_quote!("%d-%s"),
            &[syn::parse_quote!(count), syn::parse_quote!(name)],
        )
        .unwrap()
        .to_string();
        assert!(code.contains("format_to"));
        assert_eq!(code.matches("Arg :: from").count(), 2);
    }

    #[test]
    fn test_argument_count_mismatch() {
        let err = generate(syn::parse_quote!("%d %d"), &[syn::parse_quote!(a)]).unwrap_err();
        assert!(err.to_string().contains("reads 2 arguments but 1 was supplied"));

        let err = generate(syn::parse_quote!("none"), &[syn::parse_quote!(a)]).unwrap_err();
        assert!(err.to_string().contains("reads 0 arguments"));
    }

    #[test]
    fn test_positional_replay_needs_one_argument() {
        assert!(generate(syn::parse_quote!("%1$d %1$x"), &[syn::parse_quote!(v)]).is_ok());
    }
}
