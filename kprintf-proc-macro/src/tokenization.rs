//! Template tokenization at compile-time.
//!
//! Accepts exactly the grammar the runtime scanner accepts, so a template
//! that tokenizes here never hits a scanner panic at run time.

use crate::constants::{
    MAX_FORMAT_STRING_LEN, MAX_TOKENS, TEXT_SEGMENT_CAPACITY, TOKENS_INITIAL_CAPACITY,
};
use crate::types::{Conversion, Count, Flags, FormatToken, Size};
use syn::LitStr;

/// Tokenize a template into literal runs, `%%` escapes and conversions.
///
/// Text after an embedded NUL is ignored, as the runtime does. Enforces
/// `MAX_FORMAT_STRING_LEN` and `MAX_TOKENS`.
pub fn tokenize_format_string(
    format_str: &str,
    format_lit: &LitStr,
) -> syn::Result<Vec<FormatToken>> {
    if format_str.len() > MAX_FORMAT_STRING_LEN {
        return Err(syn::Error::new(
            format_lit.span(),
            format!(
                "Template too long ({} bytes). Maximum allowed: {} bytes. \
                 This limit prevents compile-time DoS attacks.",
                format_str.len(),
                MAX_FORMAT_STRING_LEN
            ),
        ));
    }

    let format_str = format_str.split('\0').next().unwrap_or_default();
    let mut tokens: Vec<FormatToken> = Vec::with_capacity(TOKENS_INITIAL_CAPACITY);
    let mut current_text = String::with_capacity(TEXT_SEGMENT_CAPACITY);
    let mut rest = format_str;

    let push_token = |tokens: &mut Vec<FormatToken>, token: FormatToken| -> syn::Result<()> {
        if tokens.len() >= MAX_TOKENS {
            return Err(syn::Error::new(
                format_lit.span(),
                format!(
                    "Too many tokens in template (would exceed {}). Maximum allowed: {}. \
                     This limit prevents compile-time resource exhaustion.",
                    tokens.len() + 1,
                    MAX_TOKENS
                ),
            ));
        }
        tokens.push(token);
        Ok(())
    };

    while let Some(pos) = rest.find('%') {
        current_text.push_str(&rest[..pos]);
        let directive = &rest[pos + 1..];

        if !current_text.is_empty() {
            push_token(
                &mut tokens,
                FormatToken::Text(std::mem::take(&mut current_text).into_boxed_str()),
            )?;
        }

        if directive.is_empty() {
            return Err(syn::Error::new(
                format_lit.span(),
                "Dangling '%' at the end of the template. Use '%%' for a literal percent sign.",
            ));
        }
        if let Some(after) = directive.strip_prefix('%') {
            push_token(&mut tokens, FormatToken::Percent)?;
            rest = after;
            continue;
        }

        let (conversion, after) = parse_conversion(directive, format_lit)?;
        push_token(&mut tokens, FormatToken::Conversion(conversion))?;
        rest = after;
    }

    current_text.push_str(rest);
    if !current_text.is_empty() {
        push_token(&mut tokens, FormatToken::Text(current_text.into_boxed_str()))?;
    }

    Ok(tokens)
}

fn apply_flag(flags: &mut Flags, c: char) -> bool {
    match c {
        '-' => flags.left_justify = true,
        '#' => flags.alt_conversion = true,
        '0' => flags.fill_zeros = true,
        '+' | ' ' | '\'' => {}
        _ => return false,
    }
    true
}

fn parse_count(input: &str) -> Option<(Count, &str)> {
    if let Some(rest) = input.strip_prefix('*') {
        return Some((Count::FromArg, rest));
    }
    let digits = input.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value = input[..digits].bytes().fold(0usize, |acc, d| {
        acc.saturating_mul(10).saturating_add(usize::from(d - b'0'))
    });
    Some((Count::Literal(value), &input[digits..]))
}

/// Parses one specifier starting right after its `%`.
///
/// Returns the conversion and the template text after its letter.
fn parse_conversion<'t>(
    directive: &'t str,
    format_lit: &LitStr,
) -> syn::Result<(Conversion, &'t str)> {
    let mut flags = Flags::default();
    let mut position = None;
    let mut rest = directive;

    loop {
        let mut chars = rest.chars();
        match (chars.next(), chars.next()) {
            (Some('0'), Some('$')) => {
                return Err(syn::Error::new(
                    format_lit.span(),
                    "Positional arguments start at 1; '%0$' is not valid.",
                ));
            }
            (Some(digit @ '1'..='9'), Some('$')) => {
                position = Some(digit as usize - '0' as usize);
                rest = &rest[2..];
            }
            (Some(c), _) if apply_flag(&mut flags, c) => rest = &rest[1..],
            _ => break,
        }
    }

    let mut width = None;
    if let Some((count, after)) = parse_count(rest) {
        width = Some(count);
        rest = after;
    }

    // A '.' with no count after it means precision zero.
    let mut precision = None;
    if let Some(after) = rest.strip_prefix('.') {
        rest = after;
        precision = Some(Count::Literal(0));
        if let Some((count, after)) = parse_count(rest) {
            precision = Some(count);
            rest = after;
        }
    }

    let size = if let Some(after) = rest.strip_prefix("ll") {
        rest = after;
        Size::LongLong
    } else {
        let size = match rest.chars().next() {
            Some('l') => Size::Long,
            Some('z') => Size::Native,
            Some('L') => Size::LongDouble,
            _ => Size::Default,
        };
        if size != Size::Default {
            rest = &rest[1..];
        }
        size
    };

    let mut chars = rest.chars();
    let Some(letter) = chars.next() else {
        return Err(syn::Error::new(
            format_lit.span(),
            format!("Conversion specifier '%{directive}' runs off the end of the template."),
        ));
    };

    Ok((
        Conversion {
            position,
            flags,
            width,
            precision,
            size,
            letter,
        },
        chars.as_str(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::LitStr;

    fn tokenize(format: &str) -> syn::Result<Vec<FormatToken>> {
        let format_lit: LitStr = syn::parse_quote!("template");
        tokenize_format_string(format, &format_lit)
    }

    fn single(format: &str) -> Conversion {
        match tokenize(format).unwrap().as_slice() {
            [FormatToken::Conversion(conversion)] => *conversion,
            other => panic!("expected one conversion, got {other:?}"),
        }
    }

    #[test]
    fn test_tokenization_basic() {
        let tokens = tokenize("a=%d, 100%% of %s").unwrap();
        assert_eq!(tokens.len(), 6);
        assert_eq!(tokens[0], FormatToken::Text("a=".into()));
        assert!(matches!(tokens[1], FormatToken::Conversion(Conversion { letter: 'd', .. })));
        assert_eq!(tokens[2], FormatToken::Text(", 100".into()));
        assert_eq!(tokens[3], FormatToken::Percent);
    }

    #[test]
    fn test_full_specifier() {
        let conversion = single("%2$-+ #0'*.*lld");
        assert_eq!(conversion.position, Some(2));
        assert!(conversion.flags.left_justify);
        assert!(conversion.flags.alt_conversion);
        assert!(conversion.flags.fill_zeros);
        assert_eq!(conversion.width, Some(Count::FromArg));
        assert_eq!(conversion.precision, Some(Count::FromArg));
        assert_eq!(conversion.size, Size::LongLong);
        assert_eq!(conversion.letter, 'd');
    }

    #[test]
    fn test_bare_dot_and_literal_counts() {
        let conversion = single("%12.f");
        assert_eq!(conversion.width, Some(Count::Literal(12)));
        assert_eq!(conversion.precision, Some(Count::Literal(0)));
        assert_eq!(single("%x").precision, None);
    }

    #[test]
    fn test_stops_at_embedded_nul() {
        let tokens = tokenize("shown\0%").unwrap();
        assert_eq!(tokens, vec![FormatToken::Text("shown".into())]);
    }

    #[test]
    fn test_malformed_templates_rejected() {
        assert!(tokenize("50%").is_err());
        assert!(tokenize("%5l").is_err());
        assert!(tokenize("%0$d").is_err());
    }

    #[test]
    fn test_max_tokens_at_boundary() {
        // 128 conversions + 128 separators = 256 tokens.
        let format = "%d ".repeat(128);
        let tokens = tokenize(&format).unwrap();
        assert_eq!(tokens.len(), MAX_TOKENS);

        let format = format!("{format}%d");
        assert!(tokenize(&format).is_err());
    }

    #[test]
    fn test_max_length() {
        let format = "x".repeat(MAX_FORMAT_STRING_LEN + 1);
        assert!(tokenize(&format).is_err());
    }
}
