//! Format Scanner: splits a template into literal runs and conversions.

use crate::args::ArgCursor;
use crate::error::malformed_template;
use crate::options::{FormatOptions, SizeModifier};

mod format_parser;

/// Receiver of everything the scanner finds in a template.
///
/// Any `Err` stops the scan at once and is returned to the caller of
/// [`printf_format`] unchanged.
pub trait FormatAgent {
    type Error;

    /// A run of template text containing no `%`.
    fn literal(&mut self, text: &str) -> Result<(), Self::Error>;

    /// A `%%` escape.
    fn literal_percent(&mut self) -> Result<(), Self::Error>;

    /// A complete conversion specifier. The agent pops the argument it
    /// needs from `args`.
    fn conversion(
        &mut self,
        conversion: char,
        options: FormatOptions,
        size: SizeModifier,
        args: &mut ArgCursor<'_, '_>,
    ) -> Result<(), Self::Error>;
}

/// Walks `template` once, feeding literal runs and conversions to `agent`.
///
/// Scanning stops at the end of the string or at an embedded NUL.
///
/// # Panics
///
/// On a `%` with nothing after it, on a specifier that runs off the end of
/// the template, and on positional index 0.
pub fn printf_format<A>(
    agent: &mut A,
    template: &str,
    args: &mut ArgCursor<'_, '_>,
) -> Result<(), A::Error>
where
    A: FormatAgent + ?Sized,
{
    let template = match template.find('\0') {
        Some(end) => &template[..end],
        None => template,
    };
    let mut rest = template;

    while !rest.is_empty() {
        let Some(directive) = rest.strip_prefix('%') else {
            let run = rest.find('%').unwrap_or(rest.len());
            agent.literal(&rest[..run])?;
            rest = &rest[run..];
            continue;
        };

        if directive.is_empty() {
            malformed_template("dangling '%' at the end", template);
        }
        if let Some(after) = directive.strip_prefix('%') {
            agent.literal_percent()?;
            rest = after;
            continue;
        }

        let spec = format_parser::parse_specifier(directive, template, args);
        let mut letter = spec.rest.chars();
        let Some(conversion) = letter.next() else {
            malformed_template("conversion specifier runs off the end", template);
        };
        agent.conversion(conversion, spec.options, spec.size, args)?;
        rest = letter.as_str();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{Arg, ArgSlot};

    #[derive(Debug, PartialEq)]
    enum Event {
        Literal(String),
        Percent,
        Conversion(char, FormatOptions, SizeModifier),
    }

    /// Records events and pops one `i32` per conversion.
    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
        values: Vec<i32>,
        fail_after: Option<usize>,
    }

    impl Recorder {
        fn record(&mut self, event: Event) -> Result<(), &'static str> {
            if self.fail_after == Some(self.events.len()) {
                return Err("sink full");
            }
            self.events.push(event);
            Ok(())
        }
    }

    impl FormatAgent for Recorder {
        type Error = &'static str;

        fn literal(&mut self, text: &str) -> Result<(), Self::Error> {
            self.record(Event::Literal(text.to_string()))
        }

        fn literal_percent(&mut self) -> Result<(), Self::Error> {
            self.record(Event::Percent)
        }

        fn conversion(
            &mut self,
            conversion: char,
            options: FormatOptions,
            size: SizeModifier,
            args: &mut ArgCursor<'_, '_>,
        ) -> Result<(), Self::Error> {
            self.record(Event::Conversion(conversion, options, size))?;
            self.values.push(args.pop(&options));
            Ok(())
        }
    }

    fn scan(template: &str, args: &[Arg<'_>]) -> Recorder {
        let mut recorder = Recorder::default();
        let mut cache = [ArgSlot::default(); 9];
        let mut cursor = ArgCursor::new(args, &mut cache);
        printf_format(&mut recorder, template, &mut cursor).unwrap();
        recorder
    }

    #[test]
    fn test_literal_only_template() {
        let recorder = scan("no conversions here", &[]);
        assert_eq!(
            recorder.events,
            vec![Event::Literal("no conversions here".into())]
        );
    }

    #[test]
    fn test_percent_escape() {
        let recorder = scan("100%%!", &[]);
        assert_eq!(
            recorder.events,
            vec![
                Event::Literal("100".into()),
                Event::Percent,
                Event::Literal("!".into()),
            ]
        );
    }

    #[test]
    fn test_conversions_between_literals() {
        let recorder = scan("a=%d, b=%5ld.", &[Arg::from(1), Arg::from(2i64)]);
        let width = FormatOptions {
            minimum_width: 5,
            ..Default::default()
        };
        assert_eq!(
            recorder.events,
            vec![
                Event::Literal("a=".into()),
                Event::Conversion('d', FormatOptions::default(), SizeModifier::Default),
                Event::Literal(", b=".into()),
                Event::Conversion('d', width, SizeModifier::Long),
                Event::Literal(".".into()),
            ]
        );
        assert_eq!(recorder.values, vec![1, 2]);
    }

    #[test]
    fn test_adjacent_conversions() {
        let recorder = scan("%d%d", &[Arg::from(4), Arg::from(5)]);
        assert_eq!(recorder.events.len(), 2);
        assert_eq!(recorder.values, vec![4, 5]);
    }

    #[test]
    fn test_stops_at_embedded_nul() {
        let recorder = scan("shown\0%d hidden", &[]);
        assert_eq!(recorder.events, vec![Event::Literal("shown".into())]);
    }

    #[test]
    fn test_agent_failure_stops_scan() {
        let args = [Arg::from(1), Arg::from(2)];
        let mut recorder = Recorder {
            fail_after: Some(1),
            ..Default::default()
        };
        let mut cache = [ArgSlot::default(); 9];
        let mut cursor = ArgCursor::new(&args, &mut cache);

        let result = printf_format(&mut recorder, "x%d y%d", &mut cursor);
        assert_eq!(result, Err("sink full"));
        assert_eq!(recorder.events, vec![Event::Literal("x".into())]);
        assert_eq!(cursor.native_reads(), 0);
    }

    #[test]
    #[should_panic(expected = "dangling '%'")]
    fn test_dangling_percent_panics() {
        scan("50%", &[]);
    }
}
