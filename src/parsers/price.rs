use crate::error::PriceParseError;

/// Locale rules for turning displayed price text into a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceFormat {
    pub currency_markers: &'static [&'static str],
    pub thousands_separator: Option<char>,
    pub decimal_separator: char,
}

impl PriceFormat {
    /// `1.299,90 TL`
    pub const TURKISH_LIRA: PriceFormat = PriceFormat {
        currency_markers: &["TL"],
        thousands_separator: Some('.'),
        decimal_separator: ',',
    };
}

/// Parse a price such as `"1.299,90 TL"` into `1299.9`.
///
/// Strips the currency marker and all whitespace, drops the thousands
/// separator and normalises the decimal separator before parsing. Only
/// non-negative finite values are accepted.
pub fn parse_price(text: &str, format: &PriceFormat) -> Result<f64, PriceParseError> {
    let mut cleaned: &str = text.trim();
    for marker in format.currency_markers {
        cleaned = cleaned.strip_suffix(marker).unwrap_or(cleaned).trim_end();
        cleaned = cleaned.strip_prefix(marker).unwrap_or(cleaned).trim_start();
    }

    let mut number = String::with_capacity(cleaned.len());
    for c in cleaned.chars() {
        if c.is_whitespace() || Some(c) == format.thousands_separator {
            continue;
        }
        if c == format.decimal_separator {
            number.push('.');
        } else {
            number.push(c);
        }
    }

    if number.is_empty() {
        return Err(PriceParseError::Empty);
    }

    let well_formed = number.chars().all(|c| c.is_ascii_digit() || c == '.')
        && number.matches('.').count() <= 1
        && number.chars().any(|c| c.is_ascii_digit());
    if !well_formed {
        return Err(PriceParseError::Invalid(text.trim().to_string()));
    }

    match number.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(PriceParseError::Invalid(text.trim().to_string())),
    }
}
