use kprintf::{
    Arg, FormatError, Formatter, LocaleOptions, format_to, format_to_with_locale, kprintf,
    ksnprintf,
};

macro_rules! render {
    ($($tt:tt)*) => {{
        let mut out: heapless::Vec<u8, 256> = heapless::Vec::new();
        kprintf!(&mut out, $($tt)*).unwrap();
        String::from_utf8(out.to_vec()).unwrap()
    }};
}

#[test]
fn test_literal_only_template() {
    assert_eq!(render!("hello, world"), "hello, world");
    assert_eq!(render!(""), "");
}

#[test]
fn test_percent_escape() {
    assert_eq!(render!("100%%"), "100%");
    assert_eq!(render!("%%d"), "%d");
}

#[test]
fn test_integer_width_and_justification() {
    assert_eq!(render!("[%5d]", 42), "[   42]");
    assert_eq!(render!("[%-5d]", 42), "[42   ]");
    assert_eq!(render!("[%05d]", 42), "[00042]");
    assert_eq!(render!("[%05d]", -42), "[-0042]");
    assert_eq!(render!("[%+d %+d]", 5, -5), "[+5 -5]");
    assert_eq!(render!("[% d]", 5), "[ 5]");
}

#[test]
fn test_integer_precision() {
    assert_eq!(render!("[%.0d]", 0), "[]");
    assert_eq!(render!("[%.d]", 0), "[]");
    assert_eq!(render!("[%.3d]", 5), "[005]");
    assert_eq!(render!("[%6.3d]", -5), "[  -005]");
    assert_eq!(render!("[%.0x]", 0u32), "[]");
    assert_eq!(render!("[%.0u]", 0u32), "[0]");
}

#[test]
fn test_alternate_forms() {
    assert_eq!(render!("%#x", 0u32), "0");
    assert_eq!(render!("%#x", 255u32), "0xff");
    assert_eq!(render!("%#X", 255u32), "0XFF");
    assert_eq!(render!("%#o", 8u32), "010");
    assert_eq!(render!("%x %X %o", 3054u32, 3054u32, 8u32), "bee BEE 10");
}

#[test]
fn test_length_modifiers() {
    assert_eq!(render!("%ld", -1234567890123i64), "-1234567890123");
    assert_eq!(render!("%lld", i64::MIN), "-9223372036854775808");
    assert_eq!(render!("%llu", u64::MAX), "18446744073709551615");
    assert_eq!(render!("%zu", usize::MAX), usize::MAX.to_string());
    assert_eq!(render!("%lx", 0xdead_beef_cafeu64), "deadbeefcafe");
    // Without a modifier the value is read as a 32-bit int.
    assert_eq!(render!("%u", -1), "4294967295");
}

#[test]
fn test_strings() {
    assert_eq!(render!("%s!", "hi"), "hi!");
    assert_eq!(render!("[%6s]", "abc"), "[   abc]");
    assert_eq!(render!("[%-6s]", "abc"), "[abc   ]");
    assert_eq!(render!("[%.2s]", "abc"), "[ab]");
    assert_eq!(render!("%s", Option::<&str>::None), "(null)");
    assert_eq!(render!("%s", c"from C"), "from C");
}

#[test]
fn test_wide_strings() {
    let wide: Vec<u32> = "grüße".chars().map(u32::from).chain([0]).collect();
    assert_eq!(render!("%ls", &wide[..]), "grüße");
    assert_eq!(render!("[%.3ls]", &wide[..]), "[grü]");
}

#[test]
fn test_characters_and_pointers() {
    assert_eq!(render!("%c%c", 'o', 'k'), "ok");
    assert_eq!(render!("[%3c]", 'x'), "[  x]");
    assert_eq!(render!("%p", core::ptr::null::<u8>()), "0x0");
    assert_eq!(render!("%p", 0x1000 as *const u8), "0x1000");
}

#[test]
fn test_floats() {
    assert_eq!(render!("%f", 1.5), "1.500000");
    assert_eq!(render!("%.2f", 3.14159), "3.14");
    assert_eq!(render!("[%8.3f]", -2.5), "[  -2.500]");
    assert_eq!(render!("[%-8.1f]", 2.3f32), "[2.3     ]");
    assert_eq!(render!("[%08.2f]", -1.5), "[-0001.50]");
    assert_eq!(render!("%+.1f", 1.0), "+1.0");
    assert_eq!(render!("%f %F", f64::INFINITY, f64::NAN), "inf NAN");
    assert_eq!(render!("%Lf", 0.25), "0.250000");
}

#[test]
fn test_scientific_conversions_print_placeholder() {
    // The value is consumed so the next conversion still lines up.
    assert_eq!(render!("%e|%g|%d", 1.0, 2.0, 3), "%f|%f|3");
}

#[test]
fn test_star_width_and_precision() {
    assert_eq!(render!("[%*d]", 4, 7), "[   7]");
    assert_eq!(render!("[%*d]", -4, 7), "[7   ]");
    assert_eq!(render!("[%.*f]", 1, 2.76), "[2.8]");
    assert_eq!(render!("[%.*s]", -1, "all"), "[all]");
}

#[test]
fn test_grouping_needs_a_locale() {
    assert_eq!(render!("%'d", 1234567), "1234567");

    let locale = LocaleOptions {
        decimal_point: ".",
        thousands_sep: ",",
        grouping: &[3],
    };
    let mut out: heapless::Vec<u8, 64> = heapless::Vec::new();
    format_to_with_locale(
        &mut out,
        "%'d %'u %'.2f",
        &[Arg::from(-1234567), Arg::from(1000u32), Arg::from(1234.5)],
        locale,
    )
    .unwrap();
    assert_eq!(out.as_slice(), b"-1,234,567 1,000 1,234.50");
}

#[test]
fn test_indian_grouping() {
    let locale = LocaleOptions {
        decimal_point: ".",
        thousands_sep: ",",
        grouping: &[3, 2, 0],
    };
    let mut out: heapless::Vec<u8, 64> = heapless::Vec::new();
    format_to_with_locale(&mut out, "%'d", &[Arg::from(123456789)], locale).unwrap();
    assert_eq!(out.as_slice(), b"12,34,56,789");
}

#[test]
fn test_ksnprintf_returns_length() {
    let mut buf = [0u8; 32];
    let len = ksnprintf!(&mut buf, "%s=%d", "x", 10).unwrap();
    assert_eq!(&buf[..len], b"x=10");
}

#[test]
fn test_ksnprintf_overflow_keeps_prefix() {
    let mut buf = [0u8; 6];
    let result = ksnprintf!(&mut buf, "%s and more", "prefix!");
    assert_eq!(result, Err(FormatError::BufferFull { capacity: 6 }));
    assert_eq!(&buf, b"prefix");
}

/// Accepts a fixed number of bytes, then reports a console failure.
struct FlakyConsole {
    written: Vec<u8>,
    budget: usize,
}

#[derive(Debug, PartialEq)]
struct ConsoleGone;

impl Formatter for FlakyConsole {
    type Error = ConsoleGone;

    fn append(&mut self, byte: u8) -> Result<(), ConsoleGone> {
        if self.written.len() == self.budget {
            return Err(ConsoleGone);
        }
        self.written.push(byte);
        Ok(())
    }
}

#[test]
fn test_sink_failure_stops_output() {
    let mut console = FlakyConsole {
        written: Vec::new(),
        budget: 7,
    };
    let result = kprintf!(&mut console, "a=%d b=%d c=%d", 1, 22, 333);
    assert_eq!(result, Err(ConsoleGone));
    assert_eq!(console.written, b"a=1 b=2");
}

#[test]
fn test_fmt_write_bridge() {
    let mut out = kprintf::FmtWriteFormatter::new(String::new());
    kprintf!(&mut out, "%-3s|%3s", "ab", "cd").unwrap();
    assert_eq!(out.into_inner(), "ab |  cd");
}

#[test]
#[should_panic(expected = "kind mismatch")]
fn test_function_api_panics_on_kind_mismatch() {
    let mut out: heapless::Vec<u8, 16> = heapless::Vec::new();
    let _ = format_to(&mut out, "%f", &[Arg::from(1)]);
}

#[test]
#[should_panic(expected = "unknown printf conversion")]
fn test_function_api_panics_on_unknown_conversion() {
    let mut out: heapless::Vec<u8, 16> = heapless::Vec::new();
    let _ = format_to(&mut out, "%q", &[]);
}

#[test]
#[should_panic(expected = "exhausted")]
fn test_function_api_panics_on_missing_argument() {
    let mut out: heapless::Vec<u8, 16> = heapless::Vec::new();
    let _ = format_to(&mut out, "%d %d", &[Arg::from(1)]);
}

#[cfg(feature = "alloc")]
#[test]
fn test_alloc_vec_sink() {
    let mut out: Vec<u8> = Vec::new();
    kprintf!(&mut out, "%s=%#x", "mask", 0xf0u32).unwrap();
    assert_eq!(out, b"mask=0xf0");
}
