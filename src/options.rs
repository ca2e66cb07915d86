//! Per-conversion options, length modifiers and locale settings.

/// Everything the Option Parser learned about one conversion specifier.
///
/// Built fresh for every `%` directive and handed to the agent by value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FormatOptions {
    /// 1-based index from a `N$` prefix; `None` reads the next argument.
    pub arg_position: Option<usize>,
    pub left_justify: bool,      // '-'
    pub always_sign: bool,       // '+'
    pub plus_becomes_space: bool, // ' '
    pub alt_conversion: bool,    // '#'
    pub fill_zeros: bool,        // '0'
    pub group_thousands: bool,   // '\''
    pub minimum_width: usize,
    /// `Some(0)` for a bare `.` is distinct from `None` (no `.` at all).
    pub precision: Option<usize>,
}

impl FormatOptions {
    /// Fill byte selected by the `0` flag.
    pub(crate) fn fill(&self) -> u8 {
        if self.fill_zeros { b'0' } else { b' ' }
    }
}

/// Storage width selected by a length modifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SizeModifier {
    #[default]
    Default,
    /// `l`
    Long,
    /// `ll`
    LongLong,
    /// `L`
    LongDouble,
    /// `z`
    Native,
}

/// Locale data passed through to the numeric renderers.
///
/// `grouping` follows the C `localeconv` layout: each entry is the size of
/// a digit group counted from the right, `0` repeats the previous size and
/// `u8::MAX` ends grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleOptions<'l> {
    pub decimal_point: &'l str,
    pub thousands_sep: &'l str,
    pub grouping: &'l [u8],
}

impl LocaleOptions<'static> {
    /// The "C" locale: `.` decimal point and no digit grouping.
    pub const C: Self = Self {
        decimal_point: ".",
        thousands_sep: "",
        grouping: &[u8::MAX],
    };
}

impl Default for LocaleOptions<'static> {
    fn default() -> Self {
        Self::C
    }
}

impl LocaleOptions<'_> {
    /// Whether a separator belongs right after the digit that has
    /// `digits_right` digits to its right.
    pub(crate) fn is_group_boundary(&self, digits_right: usize) -> bool {
        if digits_right == 0 || self.thousands_sep.is_empty() {
            return false;
        }
        let mut boundary = 0usize;
        let mut size = 0usize;
        let mut groups = self.grouping.iter();
        loop {
            match groups.next() {
                Some(&u8::MAX) => return false,
                Some(&0) | None => {
                    // Repeat the last size for the rest of the number.
                    if size == 0 {
                        return false;
                    }
                    return digits_right > boundary && (digits_right - boundary) % size == 0;
                }
                Some(&next) => {
                    size = usize::from(next);
                    boundary += size;
                    if digits_right == boundary {
                        return true;
                    }
                    if digits_right < boundary {
                        return false;
                    }
                }
            }
        }
    }

    /// Number of separators inserted into a run of `digits` digits.
    pub(crate) fn separator_count(&self, digits: usize) -> usize {
        (1..digits).filter(|&right| self.is_group_boundary(right)).count()
    }
}
