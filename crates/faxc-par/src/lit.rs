//! String-escape decoding and integer-literal range checking (§4.1,
//! §4.2). The scanner carries both as raw lexemes; the parser does the
//! final interpretation since it is the first stage allowed to report a
//! span-carrying diagnostic for a malformed literal without complicating
//! the scanner's single-pass loop.

use faxc_util::diagnostic::{DiagnosticCode, Handler};
use faxc_util::span::Span;

/// Decodes the escape sequences in a quoted string lexeme (including its
/// surrounding quotes, exactly as the scanner hands it over) into its raw
/// byte content. Escape set: `\a \b \f \n \r \t \v \" \\`. An unrecognized
/// escape is reported and the character following the backslash is kept
/// verbatim so the rest of the literal still decodes.
pub fn unescape(lexeme: &str, span: Span, handler: &dyn Handler) -> String {
    let inner = lexeme
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(lexeme);

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('a') => out.push('\u{07}'),
            Some('b') => out.push('\u{08}'),
            Some('f') => out.push('\u{0C}'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('v') => out.push('\u{0B}'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                handler
                    .build_error(span, format!("unknown escape sequence '\\{other}'"))
                    .code(DiagnosticCode::E_LEXER_UNEXPECTED_CHAR)
                    .emit(handler);
                out.push(other);
            }
            None => break,
        }
    }
    out
}

/// Parses a decimal integer lexeme (already carrying its sign, per the
/// scanner's minus-folding rule) into an `i64`. Out-of-range literals are
/// reported at `span` and replaced with `0` so parsing can continue.
pub fn parse_int(lexeme: &str, span: Span, handler: &dyn Handler) -> i64 {
    lexeme.parse::<i64>().unwrap_or_else(|_| {
        handler
            .build_error(
                span,
                format!("integer literal '{lexeme}' does not fit in a signed 64-bit integer"),
            )
            .code(DiagnosticCode::E_LEXER_INVALID_NUMBER)
            .emit(handler);
        0
    })
}
