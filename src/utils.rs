//! Useful functions shared by the parser and the exporters.

use crate::{Decimal, Error, ErrorLevel, ErrorType, Location};

/// Parses a [`Decimal`](crate::Decimal) from an amount field and pushes the
/// error into `errors`. Thousands separators are stripped; the decimal
/// separator is `.` per the OFX specification regardless of locale;
/// scientific notation is rejected.
pub fn parse_amount(num_str: &str, src: Location, errors: &mut Vec<Error>) -> Option<Decimal> {
    match parse_amount_opt(num_str) {
        Some(num) => Some(num),
        None => {
            errors.push(Error {
                msg: format!("Invalid amount: {:?}.", num_str),
                src,
                r#type: ErrorType::Amount,
                level: ErrorLevel::Warning,
            });
            None
        }
    }
}

pub(crate) fn parse_amount_opt(num_str: &str) -> Option<Decimal> {
    let cleaned: String = num_str
        .trim()
        .chars()
        .filter(|&c| c != ',')
        .collect();
    if cleaned.is_empty() || cleaned.contains(|c: char| c == 'e' || c == 'E') {
        return None;
    }
    cleaned.parse::<Decimal>().ok()
}

/// Renders an amount with exactly two decimal digits and a `.` decimal point.
pub(crate) fn format_amount_2dp(amount: Decimal) -> String {
    let mut rounded = amount.round_dp(2);
    rounded.rescale(2);
    rounded.to_string()
}

/// Decodes the five standard SGML/XML character entities in leaf text.
/// Anything else (including numeric references) is left as-is.
pub(crate) fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Escapes text for embedding as a leaf value in a re-exported document.
pub(crate) fn encode_entities(text: &str) -> String {
    if !text.contains(|c| c == '&' || c == '<' || c == '>') {
        return text.to_string();
    }
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_with_thousands_separator() {
        assert_eq!(
            parse_amount_opt("1,234.56"),
            Some("1234.56".parse().unwrap())
        );
    }

    #[test]
    fn amount_with_leading_sign() {
        assert_eq!(parse_amount_opt("-42.50"), Some("-42.50".parse().unwrap()));
        assert_eq!(parse_amount_opt("+7"), Some("7".parse().unwrap()));
    }

    #[test]
    fn amount_rejects_scientific_notation() {
        assert_eq!(parse_amount_opt("1e5"), None);
        assert_eq!(parse_amount_opt("2.5E2"), None);
    }

    #[test]
    fn amount_rejects_garbage() {
        assert_eq!(parse_amount_opt(""), None);
        assert_eq!(parse_amount_opt("12.3.4"), None);
        assert_eq!(parse_amount_opt("abc"), None);
    }

    #[test]
    fn two_decimal_rendering() {
        assert_eq!(format_amount_2dp("5".parse().unwrap()), "5.00");
        assert_eq!(format_amount_2dp("-42.5".parse().unwrap()), "-42.50");
        assert_eq!(format_amount_2dp("3.14159".parse().unwrap()), "3.14");
    }

    #[test]
    fn entity_round_trip() {
        let raw = "AT&T <HOME>";
        assert_eq!(decode_entities(&encode_entities(raw)), raw);
        assert_eq!(decode_entities("M&amp;M"), "M&M");
    }
}
