//! Compile-time checks of conversions and argument usage.
//!
//! Everything the runtime dispatchers and the argument cursor would
//! panic on is rejected here instead.

use crate::constants::MAX_POSITIONAL_ARGS;
use crate::types::{Conversion, Count, FormatToken, Size};
use syn::LitStr;

/// Which dispatcher handles a conversion letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Text,
    Int,
    Float,
}

pub fn family(letter: char) -> Option<Family> {
    match letter {
        'c' | 'p' | 's' => Some(Family::Text),
        'd' | 'i' | 'o' | 'x' | 'X' | 'u' => Some(Family::Int),
        'f' | 'F' | 'g' | 'G' | 'e' | 'E' => Some(Family::Float),
        _ => None,
    }
}

/// Returns the reason `conversion` would be rejected at run time.
fn precondition_violation(conversion: &Conversion) -> Option<String> {
    let Conversion {
        flags,
        width,
        precision,
        size,
        letter,
        ..
    } = *conversion;
    let spelled = format!("%{}{letter}", size.as_str());

    let Some(family) = family(letter) else {
        return Some(format!("Unknown conversion '%{letter}'."));
    };

    match (family, letter) {
        (Family::Text, 'p') => {
            if flags.fill_zeros || flags.left_justify || flags.alt_conversion {
                return Some("'%p' takes none of the '0', '-' or '#' flags.".into());
            }
            if width.is_some_and(|width| width != Count::Literal(0)) {
                return Some("'%p' does not take a width.".into());
            }
            if size != Size::Default {
                return Some(format!("'{spelled}' is not a valid conversion."));
            }
        }
        (Family::Text, 'c') => {
            if flags.fill_zeros || flags.alt_conversion {
                return Some("'%c' takes neither the '0' nor the '#' flag.".into());
            }
            if size != Size::Default {
                return Some(format!("'{spelled}' is not a valid conversion."));
            }
            if precision.is_some_and(|precision| precision != Count::Literal(0)) {
                return Some("'%c' does not take a precision.".into());
            }
        }
        (Family::Text, _) => {
            if flags.fill_zeros || flags.alt_conversion {
                return Some("'%s' takes neither the '0' nor the '#' flag.".into());
            }
            if !matches!(size, Size::Default | Size::Long) {
                return Some(format!("'{spelled}' is not a valid conversion."));
            }
        }
        (Family::Int, _) => {
            if flags.alt_conversion && matches!(letter, 'd' | 'i' | 'u') {
                return Some(format!("'%{letter}' does not take the '#' flag."));
            }
            if size == Size::LongDouble {
                return Some(format!("'{spelled}' is not a valid conversion."));
            }
        }
        (Family::Float, _) => {
            if !matches!(size, Size::Default | Size::LongDouble) {
                return Some(format!("'{spelled}' is not a valid conversion."));
            }
        }
    }
    None
}

/// Mirror of the runtime argument cursor that only counts.
#[derive(Debug, Default)]
struct ReadCounter {
    native_reads: usize,
    materialized: usize,
}

impl ReadCounter {
    fn read(&mut self, position: Option<usize>) -> Result<(), String> {
        let Some(position) = position else {
            self.native_reads += 1;
            return Ok(());
        };
        if position <= self.materialized {
            return Ok(());
        }
        if position != self.materialized + 1 {
            return Err(format!(
                "Positional argument {position} is referenced before argument {}. \
                 Positional arguments must first appear in order.",
                self.materialized + 1
            ));
        }
        if position > MAX_POSITIONAL_ARGS {
            return Err(format!(
                "Positional argument {position} exceeds the limit of {MAX_POSITIONAL_ARGS}."
            ));
        }
        self.native_reads += 1;
        self.materialized += 1;
        Ok(())
    }
}

/// Checks every conversion and returns how many arguments the template
/// reads from the call site.
///
/// Counts `*` widths and precisions, and counts a positional argument
/// only the first time it is referenced.
pub fn count_native_reads(tokens: &[FormatToken], format_lit: &LitStr) -> syn::Result<usize> {
    let mut counter = ReadCounter::default();

    for token in tokens {
        let FormatToken::Conversion(conversion) = token else {
            continue;
        };
        if let Some(reason) = precondition_violation(conversion) {
            return Err(syn::Error::new(format_lit.span(), reason));
        }

        let reads = [
            conversion.width == Some(Count::FromArg),
            conversion.precision == Some(Count::FromArg),
            true,
        ];
        for _ in reads.iter().filter(|&&read| read) {
            counter
                .read(conversion.position)
                .map_err(|reason| syn::Error::new(format_lit.span(), reason))?;
        }
    }

    Ok(counter.native_reads)
}
