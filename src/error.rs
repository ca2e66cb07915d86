use thiserror::Error;

/// Failure reported by one of the bundled [`Formatter`](crate::Formatter)s.
///
/// This is the recoverable class: the destination refused more output. A
/// malformed template never turns into a `FormatError`; it panics through
/// [`malformed_template`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FormatError {
    /// The destination buffer has no room left.
    #[error("destination buffer full after {capacity} bytes")]
    BufferFull { capacity: usize },

    /// A `core::fmt::Write` target rejected the output.
    #[error("formatting target rejected the output")]
    Write,
}

impl From<core::fmt::Error> for FormatError {
    fn from(_: core::fmt::Error) -> Self {
        Self::Write
    }
}

/// Aborts on a template that cannot be interpreted.
///
/// Templates are trusted program text, so a defect in one is a programming
/// error, not input to recover from.
#[cold]
#[track_caller]
pub(crate) fn malformed_template(reason: &str, template: &str) -> ! {
    panic!("malformed format template {template:?}: {reason}")
}
