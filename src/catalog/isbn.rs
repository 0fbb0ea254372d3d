//! Numeric-looking ISBN check.
//!
//! An ISBN is accepted when its text would convert to a number under the
//! usual JavaScript `Number()` string rules: surrounding whitespace is
//! ignored, decimals may carry a sign, a fraction and an exponent,
//! `Infinity` is a number, and unsigned `0x`/`0o`/`0b` literals are allowed.
//! Blank text is rejected. The value itself is never converted.

/// True if `raw` reads as a number
pub fn is_numeric_like(raw: &str) -> bool {
    let text = raw.trim();
    if text.is_empty() {
        return false;
    }

    if let Some(valid) = radix_literal(text) {
        return valid;
    }

    let unsigned = text
        .strip_prefix('+')
        .or_else(|| text.strip_prefix('-'))
        .unwrap_or(text);

    unsigned == "Infinity" || is_decimal(unsigned)
}

/// `Some(valid)` when `text` starts with a radix prefix, `None` otherwise.
fn radix_literal(text: &str) -> Option<bool> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'0' {
        return None;
    }
    let radix = match bytes[1] {
        b'x' | b'X' => 16,
        b'o' | b'O' => 8,
        b'b' | b'B' => 2,
        _ => return None,
    };
    let digits = &text[2..];
    Some(!digits.is_empty() && digits.chars().all(|c| c.is_digit(radix)))
}

fn is_decimal(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut pos = 0;

    let int_digits = count_digits(&bytes[pos..]);
    pos += int_digits;

    let mut frac_digits = 0;
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        frac_digits = count_digits(&bytes[pos..]);
        pos += frac_digits;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if matches!(bytes.get(pos), Some(b'e') | Some(b'E')) {
        pos += 1;
        if matches!(bytes.get(pos), Some(b'+') | Some(b'-')) {
            pos += 1;
        }
        let exp_digits = count_digits(&bytes[pos..]);
        if exp_digits == 0 {
            return false;
        }
        pos += exp_digits;
    }

    pos == bytes.len()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_digits() {
        assert!(is_numeric_like("9780441013593"));
        assert!(is_numeric_like("0"));
        assert!(is_numeric_like("0012"));
    }

    #[test]
    fn test_decimal_forms() {
        for text in ["1.5", ".5", "5.", "-3", "+3", "1e10", "1E-3", "2.5e+7", " 42 ", "\t7\n"] {
            assert!(is_numeric_like(text), "{:?} should be numeric", text);
        }
    }

    #[test]
    fn test_special_forms() {
        for text in ["Infinity", "-Infinity", "0x1F", "0o17", "0b101"] {
            assert!(is_numeric_like(text), "{:?} should be numeric", text);
        }
    }

    #[test]
    fn test_rejected() {
        for text in [
            "", "   ", "abc", "978-0441013593", "12abc", "1e", "e5", ".", "+", "-0x1F", "0x",
            "0b102", "infinity", "NaN", "1 2", "1..2",
        ] {
            assert!(!is_numeric_like(text), "{:?} should not be numeric", text);
        }
    }
}
