//! Procedural macros for the kprintf format engine.
//!
//! This crate provides two macros:
//! - `kprintf!`: Formats into any `kprintf::Formatter`
//! - `ksnprintf!`: Formats into a byte buffer and returns the length
//!
//! # Architecture
//!
//! Expansion runs in three phases:
//! 1. **Tokenization**: The template is split at compile-time into literal
//!    runs, `%%` escapes and conversion specifiers
//! 2. **Validation**: Every conversion is checked against the flags and
//!    length modifiers its dispatcher accepts, and the arguments the
//!    template reads are counted
//! 3. **Code Generation**: The macro expands to a call of the runtime
//!    entry point with each argument boxed as a `kprintf::Arg`
//!
//! The implementation is organized into focused modules:
//! - `constants`: Compile-time limits
//! - `types`: Token and conversion types
//! - `validation`: Conversion and argument-count checks
//! - `parsing`: Macro argument parsing
//! - `tokenization`: Template tokenization
//! - `codegen`: Code generation
//!
//! # Compile-Time Checks
//!
//! A template accepted here never reaches a template panic in the runtime
//! engine:
//!
//! - Dangling `%` and specifiers that run off the end are rejected
//! - Unknown conversion letters are rejected
//! - Flags, widths, precisions and length modifiers a conversion does not
//!   take are rejected
//! - `%0$` and positional references that skip ahead are rejected
//! - The number of supplied arguments must equal the number of arguments
//!   the template reads; `*` counts read one each and a positional
//!   argument is read only on its first reference
//!
//! What is not checked: the argument *kinds*. Passing an integer to `%f`
//! still panics at run time.
//!
//! # Security
//!
//! - **Templates**: Maximum 10,000 bytes
//! - **Tokens**: Maximum 256 tokens per template

#![forbid(unsafe_code)]

mod codegen;
mod constants;
mod parsing;
mod tokenization;
mod types;
mod validation;

use proc_macro::TokenStream;
use syn::parse_macro_input;

use codegen::generate_format_call;
use parsing::FormatArgs;

fn expand(entry: &str, input: TokenStream) -> TokenStream {
    let args = parse_macro_input!(input as FormatArgs);
    let explicit_args: Vec<_> = args.args.iter().collect();

    match generate_format_call(entry, &args.target, &args.format, &explicit_args) {
        Ok(code) => TokenStream::from(code),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Formats a printf-style template into a formatter.
///
/// # Syntax
///
/// ```ignore
/// kprintf!(formatter, "template", args...)
/// ```
///
/// - `formatter`: Expression of type `&mut F` where `F: kprintf::Formatter`
/// - `template`: String literal in C printf syntax
/// - `args...`: One expression per argument the template reads, each
///   convertible into `kprintf::Arg`
///
/// # Returns
///
/// `Result<(), F::Error>`: the formatter's own error if it refused output.
///
/// # Examples
///
/// ```
/// use kprintf::kprintf;
///
/// let mut out: heapless::Vec<u8, 64> = heapless::Vec::new();
/// kprintf!(&mut out, "[%5.1f] %-6s|%#x", 12.34, "boot", 255u32).unwrap();
/// assert_eq!(out.as_slice(), b"[ 12.3] boot  |0xff");
/// ```
#[proc_macro]
pub fn kprintf(input: TokenStream) -> TokenStream {
    expand("format_to", input)
}

/// Formats a printf-style template into a byte buffer, like C `snprintf`.
///
/// # Syntax
///
/// ```ignore
/// ksnprintf!(buffer, "template", args...)
/// ```
///
/// - `buffer`: Expression of type `&mut [u8]` (or `&mut [u8; N]`)
/// - `template`, `args...`: As for `kprintf!`
///
/// # Returns
///
/// `Result<usize, kprintf::FormatError>`: the number of bytes written, or
/// `BufferFull` with the bytes that fit left in the buffer.
///
/// # Examples
///
/// ```
/// use kprintf::ksnprintf;
///
/// let mut buf = [0u8; 32];
/// let len = ksnprintf!(&mut buf, "%1$s/%2$03d/%1$s", "cpu", 7).unwrap();
/// assert_eq!(&buf[..len], b"cpu/007/cpu");
/// ```
#[proc_macro]
pub fn ksnprintf(input: TokenStream) -> TokenStream {
    expand("format_to_slice", input)
}
