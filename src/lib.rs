//! A freestanding printf-style format engine.
//!
//! The crate interprets C `printf` templates without allocating and
//! without the standard library, so it can back the console output of a
//! kernel, a bootloader or firmware.
//!
//! # Architecture
//!
//! One call runs through four stages:
//! 1. **Scanning**: [`printf_format`] walks the template once, splitting
//!    it into literal runs and conversion specifiers
//! 2. **Option parsing**: each specifier's flags, positional index, width,
//!    precision and length modifier become a [`FormatOptions`]
//! 3. **Argument access**: an [`ArgCursor`] hands out the arguments in
//!    call order and replays `%N$` references from a fixed cache
//! 4. **Rendering**: a [`FormatAgent`] turns each conversion into output;
//!    [`StandardAgent`] routes every letter to a conversion dispatcher
//!    that writes into a [`Formatter`]
//!
//! The modules follow those stages:
//! - `constants`: engine limits and fixed texts
//! - `error`: recoverable output errors
//! - `options`: per-conversion options, length modifiers, locale data
//! - `args`: call-site arguments and the argument cursor
//! - `sink`: the output trait and the bundled formatters
//! - `format`: the scanner, the agent trait and the option parser
//! - `numfmt`: integer and fixed-point rendering
//! - `dispatch`: the conversion dispatchers and the stock agent
//!
//! # Errors
//!
//! Two classes of failure are kept apart:
//!
//! - **Output failures** (a full buffer, a closed console) are values. The
//!   formatter's own error type is returned unchanged from every entry
//!   point.
//! - **Template defects** (a dangling `%`, an unknown conversion letter, a
//!   flag the conversion forbids, a positional reference that skips ahead,
//!   too few arguments) are programming errors and panic. The
//!   [`kprintf!`] and [`ksnprintf!`] macros reject all of them at compile
//!   time, so panics are only reachable through the function API.
//!
//! # Features
//!
//! - `alloc`: a [`Formatter`] for `alloc::vec::Vec<u8>`
//! - `defmt`: `defmt::Format` for the public data types

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

#[cfg(feature = "alloc")]
extern crate alloc;

// Lets macro expansions spell `::kprintf::` inside this crate's own tests.
extern crate self as kprintf;

// ============================================================================
// Module Organization
// ============================================================================

mod args;
mod constants;
mod dispatch;
mod error;
mod format;
mod numfmt;
mod options;
mod sink;

// ============================================================================
// Re-exports for Public API
// ============================================================================

pub use args::{Address, Arg, ArgCursor, ArgSlot, PopArg};
pub use constants::{DEFAULT_FLOAT_PRECISION, MAX_POSITIONAL_ARGS, NULL_STRING};
pub use dispatch::{StandardAgent, do_printf_chars, do_printf_floats, do_printf_ints};
pub use error::FormatError;
pub use format::{FormatAgent, printf_format};
pub use numfmt::{FloatStyle, IntStyle, Integer, print_float, print_int};
pub use options::{FormatOptions, LocaleOptions, SizeModifier};
pub use sink::{FmtWriteFormatter, Formatter, SliceFormatter};

pub use kprintf_proc_macro::{kprintf, ksnprintf};

// ============================================================================
// Entry Points
// ============================================================================

/// Formats `template` into `formatter` in the "C" locale.
///
/// # Errors
///
/// Whatever the formatter reports; output stops at the first failure.
///
/// # Panics
///
/// On a malformed template or arguments that do not match it.
///
/// # Examples
///
/// ```
/// use kprintf::{Arg, format_to};
///
/// let mut out: heapless::Vec<u8, 32> = heapless::Vec::new();
/// format_to(&mut out, "%s=%04x", &[Arg::from("id"), Arg::from(42u32)]).unwrap();
/// assert_eq!(out.as_slice(), b"id=002a");
/// ```
pub fn format_to<F>(formatter: &mut F, template: &str, args: &[Arg<'_>]) -> Result<(), F::Error>
where
    F: Formatter + ?Sized,
{
    format_to_with_locale(formatter, template, args, LocaleOptions::C)
}

/// Formats `template` into `formatter`, rendering numbers with `locale`.
///
/// # Errors
///
/// Whatever the formatter reports; output stops at the first failure.
///
/// # Panics
///
/// On a malformed template or arguments that do not match it.
pub fn format_to_with_locale<F>(
    formatter: &mut F,
    template: &str,
    args: &[Arg<'_>],
    locale: LocaleOptions<'_>,
) -> Result<(), F::Error>
where
    F: Formatter + ?Sized,
{
    let mut cache = [ArgSlot::default(); MAX_POSITIONAL_ARGS];
    let mut cursor = ArgCursor::new(args, &mut cache);
    let mut agent = StandardAgent::with_locale(formatter, locale);
    printf_format(&mut agent, template, &mut cursor)
}

/// Formats `template` into `buf` and returns the number of bytes written.
///
/// No terminating NUL is appended.
///
/// # Errors
///
/// [`FormatError::BufferFull`] when the output does not fit; the bytes
/// that fit are left in `buf`.
///
/// # Panics
///
/// On a malformed template or arguments that do not match it.
///
/// # Examples
///
/// ```
/// use kprintf::{Arg, format_to_slice};
///
/// let mut buf = [0u8; 16];
/// let len = format_to_slice(&mut buf, "%-4d|", &[Arg::from(7)]).unwrap();
/// assert_eq!(&buf[..len], b"7   |");
/// ```
pub fn format_to_slice(
    buf: &mut [u8],
    template: &str,
    args: &[Arg<'_>],
) -> Result<usize, FormatError> {
    let mut out = SliceFormatter::new(buf);
    format_to(&mut out, template, args)?;
    Ok(out.len())
}
