//! Engine limits and fixed texts.
//!
//! Everything here is a compile-time constant: the engine never allocates,
//! so every bound it relies on is spelled out in one place.

// ============================================================================
// Argument Cache
// ============================================================================

/// Number of positional slots a cursor built by [`crate::format_to`] can hold.
///
/// The template grammar only accepts single-digit positional indices
/// (`%1$` .. `%9$`), so nine slots cover every template.
pub const MAX_POSITIONAL_ARGS: usize = 9;

// ============================================================================
// Conversion Defaults
// ============================================================================

/// Precision used by `%f`/`%F` when the template gives none.
pub const DEFAULT_FLOAT_PRECISION: usize = 6;

/// Text printed by `%s` for a null string.
pub const NULL_STRING: &[u8] = b"(null)";

/// Wide counterpart of [`NULL_STRING`] for `%ls`.
pub const NULL_WIDE_STRING: &[u32] = &[
    b'(' as u32,
    b'n' as u32,
    b'u' as u32,
    b'l' as u32,
    b'l' as u32,
    b')' as u32,
];

/// Emitted in place of the scientific and general float conversions.
pub const FLOAT_STUB: &str = "%f";

/// Most fraction digits `print_float` asks `core::fmt` for. An `f64` has
/// at most 1074 nonzero fraction digits; the rest are zeros.
pub const MAX_FLOAT_FRACTION_DIGITS: usize = 1100;

/// Widest digit run `print_int` ever produces (a 64-bit value in base 8).
pub const MAX_INT_DIGITS: usize = 64;
