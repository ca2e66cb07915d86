//! Core types for template tokenization and checking.
//!
//! These only exist while the macro expands; nothing here reaches the
//! generated code.

/// A `*` or a literal decimal count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    FromArg,
    Literal(usize),
}

/// Length modifier written in front of the conversion letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Size {
    #[default]
    Default,
    Long,
    LongLong,
    LongDouble,
    Native,
}

impl Size {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Long => "l",
            Self::LongLong => "ll",
            Self::LongDouble => "L",
            Self::Native => "z",
        }
    }
}

/// The flags some conversions forbid. `+`, space and `'` are accepted
/// by every conversion and are not recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flags {
    pub left_justify: bool,
    pub alt_conversion: bool,
    pub fill_zeros: bool,
}

/// One conversion specifier as written in the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conversion {
    /// 1-based `N$` index.
    pub position: Option<usize>,
    pub flags: Flags,
    pub width: Option<Count>,
    pub precision: Option<Count>,
    pub size: Size,
    pub letter: char,
}

/// Token produced by compile-time tokenization of a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatToken {
    /// Literal text copied to the output unchanged.
    Text(Box<str>),

    /// A `%%` escape.
    Percent,

    Conversion(Conversion),
}
