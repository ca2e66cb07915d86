//! Compile-time limits for the kprintf macros.
//!
//! The runtime engine keeps its own limits; the values here that mirror
//! them must stay in step.

// ============================================================================
// Security Limits (Compile-Time DoS Protection)
// ============================================================================

/// Maximum length of a template in bytes.
pub const MAX_FORMAT_STRING_LEN: usize = 10_000;

/// Maximum number of tokens (literal runs, `%%` escapes and conversions)
/// in one template.
pub const MAX_TOKENS: usize = 256;

// ============================================================================
// Runtime Mirrors
// ============================================================================

/// Positional slots the runtime cursor can hold. Matches
/// `kprintf::MAX_POSITIONAL_ARGS`.
pub const MAX_POSITIONAL_ARGS: usize = 9;

// ============================================================================
// Memory Pre-Allocation Hints
// ============================================================================

/// Initial capacity hint for the token vector.
pub const TOKENS_INITIAL_CAPACITY: usize = 8;

/// Initial capacity hint for a literal run between conversions.
pub const TEXT_SEGMENT_CAPACITY: usize = 16;
