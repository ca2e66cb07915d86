//! Macro argument parsing structures.

use syn::{
    Expr, LitStr, Token,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    token::Comma,
};

/// kprintf!/ksnprintf! arguments: destination, template, args
pub struct FormatArgs {
    pub target: Expr,
    pub format: LitStr,
    pub args: Punctuated<Expr, Comma>,
}

impl Parse for FormatArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let target = input.parse()?;
        input.parse::<Token![,]>()?;
        let format = input.parse()?;

        let args = if input.is_empty() {
            Punctuated::new()
        } else {
            input.parse::<Token![,]>()?;
            Punctuated::parse_terminated(input)?
        };

        Ok(Self {
            target,
            format,
            args,
        })
    }
}
