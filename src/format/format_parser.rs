//! Option Parser: the grammar between `%` and the conversion letter.
//!
//! ```text
//! spec   := (position | flag)* width? ('.' count?)? length? letter
//! position := digit '$'
//! flag   := '-' | '+' | ' ' | '#' | '0' | '\''
//! width  := count
//! count  := '*' | digit+
//! length := "ll" | 'l' | 'z' | 'L'
//! ```

use core::ffi::c_int;

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1, satisfy},
    combinator::{map, opt, value},
    sequence::{preceded, terminated},
};

use crate::args::ArgCursor;
use crate::error::malformed_template;
use crate::options::{FormatOptions, SizeModifier};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    Position(u8),
    LeftJustify,
    AlwaysSign,
    PlusBecomesSpace,
    AltConversion,
    FillZeros,
    GroupThousands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Count {
    FromArg,
    Literal(usize),
}

/// A parsed specifier, stopped in front of its conversion letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Specifier<'t> {
    pub options: FormatOptions,
    pub size: SizeModifier,
    /// Template text starting at the conversion letter.
    pub rest: &'t str,
}

fn parse_decimal(digits: &str) -> usize {
    digits.bytes().fold(0usize, |acc, d| {
        acc.saturating_mul(10).saturating_add(usize::from(d - b'0'))
    })
}

// The positional prefix is tried before the flags so `0$` is an index,
// not the zero flag. Only one digit is accepted.
fn position(input: &str) -> IResult<&str, Flag> {
    map(
        terminated(satisfy(|c| c.is_ascii_digit()), char('$')),
        |digit| Flag::Position(digit as u8 - b'0'),
    )
    .parse(input)
}

fn flag(input: &str) -> IResult<&str, Flag> {
    alt((
        position,
        value(Flag::LeftJustify, char('-')),
        value(Flag::AlwaysSign, char('+')),
        value(Flag::PlusBecomesSpace, char(' ')),
        value(Flag::AltConversion, char('#')),
        value(Flag::FillZeros, char('0')),
        value(Flag::GroupThousands, char('\'')),
    ))
    .parse(input)
}

fn count(input: &str) -> IResult<&str, Count> {
    alt((
        value(Count::FromArg, char('*')),
        map(digit1, |digits: &str| Count::Literal(parse_decimal(digits))),
    ))
    .parse(input)
}

// A '.' with nothing after it means precision zero.
fn dot_precision(input: &str) -> IResult<&str, Option<Count>> {
    map(opt(preceded(char('.'), opt(count))), |precision| {
        precision.map(|count| count.unwrap_or(Count::Literal(0)))
    })
    .parse(input)
}

fn size_modifier(input: &str) -> IResult<&str, SizeModifier> {
    map(
        opt(alt((
            value(SizeModifier::LongLong, tag("ll")),
            value(SizeModifier::Long, char('l')),
            value(SizeModifier::Native, char('z')),
            value(SizeModifier::LongDouble, char('L')),
        ))),
        Option::unwrap_or_default,
    )
    .parse(input)
}

/// Parses the specifier that starts at `input`, the byte after `%`.
///
/// `*` counts are read from `args` as they are met, so width is read
/// before precision. `template` is only used in panic messages.
///
/// # Panics
///
/// If the template ends before the conversion letter or names
/// positional argument 0.
pub(super) fn parse_specifier<'t>(
    input: &'t str,
    template: &str,
    args: &mut ArgCursor<'_, '_>,
) -> Specifier<'t> {
    let mut options = FormatOptions::default();
    let mut rest = input;

    while let Ok((next, parsed)) = flag(rest) {
        match parsed {
            Flag::Position(0) => malformed_template("positional arguments start at 1", template),
            Flag::Position(n) => options.arg_position = Some(usize::from(n)),
            Flag::LeftJustify => options.left_justify = true,
            Flag::AlwaysSign => options.always_sign = true,
            Flag::PlusBecomesSpace => options.plus_becomes_space = true,
            Flag::AltConversion => options.alt_conversion = true,
            Flag::FillZeros => options.fill_zeros = true,
            Flag::GroupThousands => options.group_thousands = true,
        }
        rest = next;
    }

    if let Ok((next, width)) = count(rest) {
        options.minimum_width = match width {
            Count::Literal(width) => width,
            Count::FromArg => {
                let width: c_int = args.pop(&options);
                // A negative width from the argument list means '-'.
                if width < 0 {
                    options.left_justify = true;
                }
                width.unsigned_abs() as usize
            }
        };
        rest = next;
    }

    if let Ok((next, Some(precision))) = dot_precision(rest) {
        options.precision = match precision {
            Count::Literal(precision) => Some(precision),
            Count::FromArg => {
                let precision: c_int = args.pop(&options);
                usize::try_from(precision).ok()
            }
        };
        rest = next;
    }

    let (rest, size) = size_modifier(rest).unwrap_or((rest, SizeModifier::Default));

    if rest.is_empty() {
        malformed_template("conversion specifier runs off the end", template);
    }

    Specifier {
        options,
        size,
        rest,
    }
}
