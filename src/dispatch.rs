//! Conversion Dispatchers and the stock agent that routes to them.
//!
//! Each dispatcher pops a correctly sized argument and hands it to the
//! numeric renderers. Option combinations a conversion does not support
//! are programming errors in the template and fail an assertion.

use core::ffi::{c_int, c_long, c_longlong, c_uint, c_ulong, c_ulonglong};

use crate::args::{Address, ArgCursor};
use crate::constants::{DEFAULT_FLOAT_PRECISION, FLOAT_STUB, NULL_STRING, NULL_WIDE_STRING};
use crate::format::FormatAgent;
use crate::numfmt::{FloatStyle, IntStyle, Integer, print_float, print_int};
use crate::options::{FormatOptions, LocaleOptions, SizeModifier};
use crate::sink::Formatter;

/// Length of a NUL-terminated string stored in a slice without the NUL.
fn terminated_len<T: Copy + Default + PartialEq>(text: &[T]) -> usize {
    let nul = T::default();
    text.iter().position(|&unit| unit == nul).unwrap_or(text.len())
}

/// `%c`, `%s` and `%p`.
///
/// # Panics
///
/// On `conversion` outside `c s p` and on flags the conversion forbids.
pub fn do_printf_chars<F>(
    out: &mut F,
    conversion: char,
    opts: &FormatOptions,
    size: SizeModifier,
    args: &mut ArgCursor<'_, '_>,
) -> Result<(), F::Error>
where
    F: Formatter + ?Sized,
{
    match conversion {
        'p' => {
            assert!(!opts.fill_zeros, "%p does not take the '0' flag");
            assert!(!opts.left_justify, "%p does not take the '-' flag");
            assert!(!opts.alt_conversion, "%p does not take the '#' flag");
            assert!(opts.minimum_width == 0, "%p does not take a width");
            assert!(size == SizeModifier::Default, "%p does not take a length modifier");
            let Address(address) = args.pop(opts);
            out.append_str("0x")?;
            print_int(out, address, &IntStyle::new(16))
        }
        'c' => {
            assert!(!opts.fill_zeros, "%c does not take the '0' flag");
            assert!(!opts.alt_conversion, "%c does not take the '#' flag");
            assert!(size == SizeModifier::Default, "%c does not take a length modifier");
            assert!(
                opts.precision.unwrap_or(0) == 0,
                "%c does not take a precision"
            );
            let ch: u8 = args.pop(opts);
            let padding = opts.minimum_width.saturating_sub(1);
            if opts.left_justify {
                out.append(ch)?;
                out.pad(b' ', padding)
            } else {
                out.pad(b' ', padding)?;
                out.append(ch)
            }
        }
        's' => {
            assert!(!opts.fill_zeros, "%s does not take the '0' flag");
            assert!(!opts.alt_conversion, "%s does not take the '#' flag");
            match size {
                SizeModifier::Default => {
                    let text: Option<&[u8]> = args.pop(opts);
                    let text = text.unwrap_or(NULL_STRING);
                    let text = &text[..clamped_len(terminated_len(text), opts)];
                    justified(out, text.len(), opts, |out| out.append_bytes(text))
                }
                SizeModifier::Long => {
                    let text: Option<&[u32]> = args.pop(opts);
                    let text = text.unwrap_or(NULL_WIDE_STRING);
                    let text = &text[..clamped_len(terminated_len(text), opts)];
                    justified(out, text.len(), opts, |out| {
                        text.iter().try_for_each(|&unit| out.append_wide(unit))
                    })
                }
                other => panic!("%s does not take length modifier {other:?}"),
            }
        }
        other => panic!("unexpected printf conversion {other:?} for the text dispatcher"),
    }
}

fn clamped_len(len: usize, opts: &FormatOptions) -> usize {
    opts.precision.map_or(len, |precision| len.min(precision))
}

/// Pads `len` units of `body` with spaces to the minimum width.
fn justified<F, B>(out: &mut F, len: usize, opts: &FormatOptions, body: B) -> Result<(), F::Error>
where
    F: Formatter + ?Sized,
    B: FnOnce(&mut F) -> Result<(), F::Error>,
{
    let padding = opts.minimum_width.saturating_sub(len);
    if opts.left_justify {
        body(out)?;
        out.pad(b' ', padding)
    } else {
        out.pad(b' ', padding)?;
        body(out)
    }
}

fn int_style<'l>(base: u32, opts: &FormatOptions, locale: &LocaleOptions<'l>) -> IntStyle<'l> {
    IntStyle {
        minimum_width: opts.minimum_width,
        minimum_digits: opts.precision.unwrap_or(1),
        fill: opts.fill(),
        left_justify: opts.left_justify,
        always_sign: opts.always_sign,
        plus_becomes_space: opts.plus_becomes_space,
        locale: *locale,
        ..IntStyle::new(base)
    }
}

/// Shared tail of `%o`, `%x` and `%X`: optional prefix, then the digits.
fn print_prefixed<F, T>(
    out: &mut F,
    number: T,
    prefix: &str,
    style: &IntStyle<'_>,
    opts: &FormatOptions,
) -> Result<(), F::Error>
where
    F: Formatter + ?Sized,
    T: Integer,
{
    if opts.alt_conversion && !number.is_zero() {
        out.append_str(prefix)?;
    }
    if opts.precision == Some(0) && number.is_zero() {
        return Ok(());
    }
    print_int(out, number, style)
}

/// `%d`, `%i`, `%o`, `%u`, `%x` and `%X`.
///
/// # Panics
///
/// On `conversion` outside that set, on `#` with `d i u`, and on the `L`
/// length modifier.
pub fn do_printf_ints<F>(
    out: &mut F,
    conversion: char,
    opts: &FormatOptions,
    size: SizeModifier,
    args: &mut ArgCursor<'_, '_>,
    locale: &LocaleOptions<'_>,
) -> Result<(), F::Error>
where
    F: Formatter + ?Sized,
{
    match conversion {
        'd' | 'i' => {
            assert!(!opts.alt_conversion, "%{conversion} does not take the '#' flag");
            let style = IntStyle {
                group_thousands: opts.group_thousands,
                ..int_style(10, opts, locale)
            };
            let print = |out: &mut F, number: i64| {
                // Precision zero and a zero value print nothing at all.
                if opts.precision == Some(0) && number == 0 {
                    return Ok(());
                }
                print_int(out, number, &style)
            };
            match size {
                SizeModifier::Long => print(out, i64::from(args.pop::<c_long>(opts))),
                SizeModifier::LongLong => print(out, args.pop::<c_longlong>(opts)),
                SizeModifier::Native => print(out, args.pop::<isize>(opts) as i64),
                SizeModifier::Default => print(out, i64::from(args.pop::<c_int>(opts))),
                SizeModifier::LongDouble => panic!("%{conversion} does not take the 'L' modifier"),
            }
        }
        'o' | 'x' | 'X' => {
            let (base, prefix, use_capitals) = match conversion {
                'o' => (8, "0", false),
                'x' => (16, "0x", false),
                _ => (16, "0X", true),
            };
            let style = IntStyle {
                use_capitals,
                ..int_style(base, opts, locale)
            };
            match size {
                SizeModifier::Long => {
                    print_prefixed(out, args.pop::<c_ulong>(opts), prefix, &style, opts)
                }
                SizeModifier::LongLong => {
                    print_prefixed(out, args.pop::<c_ulonglong>(opts), prefix, &style, opts)
                }
                SizeModifier::Native => {
                    print_prefixed(out, args.pop::<usize>(opts), prefix, &style, opts)
                }
                SizeModifier::Default => {
                    print_prefixed(out, args.pop::<c_uint>(opts), prefix, &style, opts)
                }
                SizeModifier::LongDouble => panic!("%{conversion} does not take the 'L' modifier"),
            }
        }
        'u' => {
            assert!(!opts.alt_conversion, "%u does not take the '#' flag");
            // %u always prints at least one digit; precision is not applied.
            let style = IntStyle {
                minimum_digits: 1,
                group_thousands: opts.group_thousands,
                ..int_style(10, opts, locale)
            };
            match size {
                SizeModifier::LongLong => print_int(out, args.pop::<c_ulonglong>(opts), &style),
                SizeModifier::Long => print_int(out, args.pop::<c_ulong>(opts), &style),
                SizeModifier::Native => print_int(out, args.pop::<usize>(opts), &style),
                SizeModifier::Default => print_int(out, args.pop::<c_uint>(opts), &style),
                SizeModifier::LongDouble => panic!("%u does not take the 'L' modifier"),
            }
        }
        other => panic!("unexpected printf conversion {other:?} for the integer dispatcher"),
    }
}

/// `%f` and `%F`; `%e %E %g %G` print the `%f` placeholder text.
///
/// The placeholder conversions are a behavior change from a bare stub
/// that prints `%f` and leaves the argument in the list: here they read
/// their `f64` and drop it, so later sequential conversions read the
/// arguments they expect.
///
/// # Panics
///
/// On `conversion` outside that set and on length modifiers other than
/// `L`. `L` reads an `f64`; there is no wider float type.
pub fn do_printf_floats<F>(
    out: &mut F,
    conversion: char,
    opts: &FormatOptions,
    size: SizeModifier,
    args: &mut ArgCursor<'_, '_>,
    locale: &LocaleOptions<'_>,
) -> Result<(), F::Error>
where
    F: Formatter + ?Sized,
{
    assert!(
        matches!(size, SizeModifier::Default | SizeModifier::LongDouble),
        "%{conversion} does not take length modifier {size:?}"
    );
    match conversion {
        'f' | 'F' => {
            let value: f64 = args.pop(opts);
            let style = FloatStyle {
                minimum_width: opts.minimum_width,
                precision: opts.precision.unwrap_or(DEFAULT_FLOAT_PRECISION),
                fill: opts.fill(),
                left_justify: opts.left_justify,
                always_sign: opts.always_sign,
                plus_becomes_space: opts.plus_becomes_space,
                use_capitals: conversion == 'F',
                group_thousands: opts.group_thousands,
                locale: *locale,
            };
            print_float(out, value, &style)
        }
        'g' | 'G' | 'e' | 'E' => {
            let _: f64 = args.pop(opts);
            out.append_str(FLOAT_STUB)
        }
        other => panic!("unexpected printf conversion {other:?} for the float dispatcher"),
    }
}

/// The agent `format_to` uses: literal text goes straight to the
/// formatter and every conversion letter is routed to its dispatcher.
#[derive(Debug)]
pub struct StandardAgent<'f, 'l, F: ?Sized> {
    formatter: &'f mut F,
    locale: LocaleOptions<'l>,
}

impl<'f, F: Formatter + ?Sized> StandardAgent<'f, 'static, F> {
    pub fn new(formatter: &'f mut F) -> Self {
        Self::with_locale(formatter, LocaleOptions::C)
    }
}

impl<'f, 'l, F: Formatter + ?Sized> StandardAgent<'f, 'l, F> {
    pub fn with_locale(formatter: &'f mut F, locale: LocaleOptions<'l>) -> Self {
        Self { formatter, locale }
    }
}

impl<F: Formatter + ?Sized> FormatAgent for StandardAgent<'_, '_, F> {
    type Error = F::Error;

    fn literal(&mut self, text: &str) -> Result<(), Self::Error> {
        self.formatter.append_str(text)
    }

    fn literal_percent(&mut self) -> Result<(), Self::Error> {
        self.formatter.append(b'%')
    }

    fn conversion(
        &mut self,
        conversion: char,
        options: FormatOptions,
        size: SizeModifier,
        args: &mut ArgCursor<'_, '_>,
    ) -> Result<(), Self::Error> {
        let out = &mut *self.formatter;
        match conversion {
            'c' | 'p' | 's' => do_printf_chars(out, conversion, &options, size, args),
            'd' | 'i' | 'o' | 'x' | 'X' | 'u' => {
                do_printf_ints(out, conversion, &options, size, args, &self.locale)
            }
            'f' | 'F' | 'g' | 'G' | 'e' | 'E' => {
                do_printf_floats(out, conversion, &options, size, args, &self.locale)
            }
            other => panic!("unknown printf conversion {other:?}"),
        }
    }
}
