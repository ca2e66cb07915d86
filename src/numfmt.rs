//! Numeric rendering primitives used by the conversion dispatchers.
//!
//! Both renderers stream straight into the [`Formatter`]; nothing is
//! buffered beyond a fixed digit array.

use core::fmt::{self, Write};

use crate::constants::{MAX_FLOAT_FRACTION_DIGITS, MAX_INT_DIGITS};
use crate::options::LocaleOptions;
use crate::sink::Formatter;

/// Integer types `print_int` accepts.
pub trait Integer: Copy {
    const SIGNED: bool;

    /// Returns `(is_negative, magnitude)`.
    fn split_sign(self) -> (bool, u64);

    fn is_zero(self) -> bool {
        self.split_sign().1 == 0
    }
}

macro_rules! signed_integer {
    ($($ty:ty),+) => {$(
        impl Integer for $ty {
            const SIGNED: bool = true;

            fn split_sign(self) -> (bool, u64) {
                (self < 0, (self as i64).unsigned_abs())
            }
        }
    )+};
}

macro_rules! unsigned_integer {
    ($($ty:ty),+) => {$(
        impl Integer for $ty {
            const SIGNED: bool = false;

            fn split_sign(self) -> (bool, u64) {
                (false, self as u64)
            }
        }
    )+};
}

signed_integer!(i8, i16, i32, i64, isize);
unsigned_integer!(u8, u16, u32, u64, usize);

/// Layout of one rendered integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntStyle<'l> {
    pub base: u32,
    pub minimum_width: usize,
    /// Leading zeros are added until this many digits are printed.
    pub minimum_digits: usize,
    pub fill: u8,
    pub left_justify: bool,
    pub group_thousands: bool,
    pub always_sign: bool,
    pub plus_becomes_space: bool,
    pub use_capitals: bool,
    pub locale: LocaleOptions<'l>,
}

impl IntStyle<'_> {
    /// Plain rendering in `base`: no width, no flags, C locale.
    pub const fn new(base: u32) -> Self {
        Self {
            base,
            minimum_width: 0,
            minimum_digits: 1,
            fill: b' ',
            left_justify: false,
            group_thousands: false,
            always_sign: false,
            plus_becomes_space: false,
            use_capitals: false,
            locale: LocaleOptions::C,
        }
    }
}

/// Layout of one rendered fixed-point float.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatStyle<'l> {
    pub minimum_width: usize,
    pub precision: usize,
    pub fill: u8,
    pub left_justify: bool,
    pub always_sign: bool,
    pub plus_becomes_space: bool,
    /// Selects `INF`/`NAN` over `inf`/`nan`.
    pub use_capitals: bool,
    pub group_thousands: bool,
    pub locale: LocaleOptions<'l>,
}

fn sign_byte(
    negative: bool,
    signed: bool,
    always_sign: bool,
    plus_becomes_space: bool,
) -> Option<u8> {
    if negative {
        Some(b'-')
    } else if signed && always_sign {
        Some(b'+')
    } else if signed && plus_becomes_space {
        Some(b' ')
    } else {
        None
    }
}

/// Emits `body_len` bytes of content padded to `width`.
///
/// Zero fill goes between the sign and the digits; any other fill goes
/// before the sign. Left justification always pads with spaces.
fn padded<F, B>(
    out: &mut F,
    sign: Option<u8>,
    body_len: usize,
    width: usize,
    fill: u8,
    left_justify: bool,
    body: B,
) -> Result<(), F::Error>
where
    F: Formatter + ?Sized,
    B: FnOnce(&mut F) -> Result<(), F::Error>,
{
    let padding = width.saturating_sub(body_len + usize::from(sign.is_some()));
    if !left_justify && fill != b'0' {
        out.pad(fill, padding)?;
    }
    if let Some(sign) = sign {
        out.append(sign)?;
    }
    if !left_justify && fill == b'0' {
        out.pad(b'0', padding)?;
    }
    body(out)?;
    if left_justify {
        out.pad(b' ', padding)?;
    }
    Ok(())
}

/// Renders `value` according to `style`.
///
/// # Panics
///
/// If `style.base` is outside `2..=16`.
pub fn print_int<F, T>(out: &mut F, value: T, style: &IntStyle<'_>) -> Result<(), F::Error>
where
    F: Formatter + ?Sized,
    T: Integer,
{
    assert!((2..=16).contains(&style.base), "unsupported radix {}", style.base);
    let table: &[u8; 16] = if style.use_capitals {
        b"0123456789ABCDEF"
    } else {
        b"0123456789abcdef"
    };
    let base = u64::from(style.base);

    let (negative, mut magnitude) = value.split_sign();
    let mut buffer = [0u8; MAX_INT_DIGITS];
    let mut start = MAX_INT_DIGITS;
    loop {
        start -= 1;
        buffer[start] = table[(magnitude % base) as usize];
        magnitude /= base;
        if magnitude == 0 {
            break;
        }
    }
    let digits = &buffer[start..];

    let zeros = style.minimum_digits.saturating_sub(digits.len());
    let run = zeros + digits.len();
    let locale = &style.locale;
    let separators = if style.group_thousands {
        locale.separator_count(run)
    } else {
        0
    };
    let body_len = run + separators * locale.thousands_sep.len();
    let sign = sign_byte(negative, T::SIGNED, style.always_sign, style.plus_becomes_space);

    padded(out, sign, body_len, style.minimum_width, style.fill, style.left_justify, |out| {
        if separators == 0 {
            out.pad(b'0', zeros)?;
            return out.append_bytes(digits);
        }
        for i in 0..run {
            out.append(if i < zeros { b'0' } else { digits[i - zeros] })?;
            if locale.is_group_boundary(run - 1 - i) {
                out.append_str(locale.thousands_sep)?;
            }
        }
        Ok(())
    })
}

/// Counts the bytes `core::fmt` would produce.
struct Measure(usize);

impl Write for Measure {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

/// Streams `core::fmt` digits into a formatter, applying the locale's
/// decimal point and digit grouping on the way.
struct LocalizedDigits<'o, 'l, F: Formatter + ?Sized> {
    out: &'o mut F,
    locale: &'o LocaleOptions<'l>,
    group: bool,
    int_remaining: usize,
    error: Option<F::Error>,
}

impl<F: Formatter + ?Sized> LocalizedDigits<'_, '_, F> {
    fn emit(&mut self, byte: u8) -> Result<(), F::Error> {
        if self.int_remaining > 0 {
            self.int_remaining -= 1;
            self.out.append(byte)?;
            if self.group && self.locale.is_group_boundary(self.int_remaining) {
                self.out.append_str(self.locale.thousands_sep)?;
            }
            return Ok(());
        }
        if byte == b'.' {
            return self.out.append_str(self.locale.decimal_point);
        }
        self.out.append(byte)
    }
}

impl<F: Formatter + ?Sized> Write for LocalizedDigits<'_, '_, F> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for byte in s.bytes() {
            if let Err(error) = self.emit(byte) {
                self.error = Some(error);
                return Err(fmt::Error);
            }
        }
        Ok(())
    }
}

/// Renders `value` in fixed-point notation according to `style`.
pub fn print_float<F>(out: &mut F, value: f64, style: &FloatStyle<'_>) -> Result<(), F::Error>
where
    F: Formatter + ?Sized,
{
    let sign = sign_byte(
        value.is_sign_negative(),
        true,
        style.always_sign,
        style.plus_becomes_space,
    );

    if !value.is_finite() {
        let text = match (value.is_nan(), style.use_capitals) {
            (true, false) => "nan",
            (true, true) => "NAN",
            (false, false) => "inf",
            (false, true) => "INF",
        };
        return padded(out, sign, text.len(), style.minimum_width, b' ', style.left_justify, |out| {
            out.append_str(text)
        });
    }

    let magnitude = value.abs();
    let precision = style.precision;
    // `core::fmt` rejects precisions above `u16::MAX`.
    let exact = precision.min(MAX_FLOAT_FRACTION_DIGITS);
    let mut measure = Measure(0);
    // Measuring never fails.
    let _ = write!(measure, "{:.*}", exact, magnitude);

    let fraction_len = if exact > 0 { exact + 1 } else { 0 };
    let int_digits = measure.0 - fraction_len;
    let locale = &style.locale;
    let separators = if style.group_thousands {
        locale.separator_count(int_digits)
    } else {
        0
    };
    let decimal_len = if precision > 0 {
        locale.decimal_point.len() + precision
    } else {
        0
    };
    let body_len = int_digits + separators * locale.thousands_sep.len() + decimal_len;

    padded(out, sign, body_len, style.minimum_width, style.fill, style.left_justify, |out| {
        let mut digits = LocalizedDigits {
            out: &mut *out,
            locale,
            group: style.group_thousands,
            int_remaining: int_digits,
            error: None,
        };
        let _ = write!(digits, "{:.*}", exact, magnitude);
        if let Some(error) = digits.error {
            return Err(error);
        }
        out.pad(b'0', precision - exact)
    })
}
