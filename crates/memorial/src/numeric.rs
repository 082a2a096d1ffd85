//! Repair of OCR-garbled numeric substrings.
//!
//! Survey memorials come out of OCR with letters in place of digits and with
//! Brazilian separator conventions (`.` thousands, `,` decimal) mixed with
//! anglophone ones. [`normalize_decimal`] turns such a substring into a
//! canonical `1234.56` form; [`parse_decimal`] takes it the rest of the way
//! to a finite `f64`. Both are deterministic and locale-independent.

/// Regex fragment matching a raw numeric token as found in document text,
/// including the characters OCR commonly substitutes for digits.
pub(crate) const NUMBER_PATTERN: &str = r"[-+]?[0-9OoIl][0-9OoIl.,]*";

/// Normalize a raw numeric substring into a `str::parse::<f64>`-compatible form.
///
/// Rules, applied in order:
/// 1. strip non-breaking spaces and interior whitespace/tabs;
/// 2. map letters OCR confuses with digits (`O`/`o` → `0`, `l`/`I` → `1`);
/// 3. resolve separators: with both `,` and `.` present, whichever kind
///    occurs later is the decimal mark and every other separator is a
///    thousands mark to drop; with only commas, the last comma is the
///    decimal mark; with only periods, the last period is.
///
/// Input that no rule applies to is returned unchanged.
pub fn normalize_decimal(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            'O' | 'o' => '0',
            'l' | 'I' => '1',
            other => other,
        })
        .collect();

    let last_dot = cleaned.rfind('.');
    let last_comma = cleaned.rfind(',');
    let decimal = match (last_dot, last_comma) {
        (Some(dot), Some(comma)) => {
            if comma > dot {
                ','
            } else {
                '.'
            }
        }
        (None, Some(_)) => ',',
        (Some(_), None) => '.',
        (None, None) => return cleaned,
    };

    let decimal_pos = cleaned.rfind(decimal);
    let mut out = String::with_capacity(cleaned.len());
    for (i, c) in cleaned.char_indices() {
        match c {
            '.' | ',' => {
                if Some(i) == decimal_pos {
                    out.push('.');
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Normalize and parse, yielding `None` for anything that does not come out
/// as a finite number. Malformed tokens are dropped by callers, never
/// substituted with zero.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let normalized = normalize_decimal(raw);
    let trimmed = normalized.trim_matches(|c| c == '.' || c == ',');
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}
