//! Typed value detection for rendered cell text
//!
//! Report cells arrive as display strings such as `"1,204"`, `"$3.50"` or
//! `"12.5 MB"`. A cell counts as numeric when, after dropping everything but
//! ASCII digits, `.` and `-`, a leading decimal number can still be read.

/// Detected interpretation of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferredType {
    Number,
    Text,
}

/// Type inference utilities
pub struct TypeInference;

impl TypeInference {
    /// Infer the type of a single trimmed cell value
    pub fn infer_from_string(value: &str) -> InferredType {
        if Self::parse_number(value).is_some() {
            InferredType::Number
        } else {
            InferredType::Text
        }
    }

    /// Parse the numeric interpretation of a cell, if it has one
    ///
    /// Non numeric characters are stripped first, then the longest leading
    /// `-?digits[.digits]` prefix is read. Trailing garbage left over after
    /// stripping (`"5-3"`, `"1.2.3"`) is ignored. Non finite results are
    /// rejected.
    pub fn parse_number(value: &str) -> Option<f64> {
        let stripped: String = value
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();

        let prefix = Self::leading_decimal(&stripped)?;
        prefix.parse::<f64>().ok().filter(|n| n.is_finite())
    }

    /// Longest prefix of `s` that reads as a plain decimal literal
    fn leading_decimal(s: &str) -> Option<&str> {
        let bytes = s.as_bytes();
        let mut end = 0;

        if bytes.first() == Some(&b'-') {
            end += 1;
        }

        let int_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        let int_digits = end - int_start;

        let mut frac_digits = 0;
        if end < bytes.len() && bytes[end] == b'.' {
            let mut frac_end = end + 1;
            while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
                frac_end += 1;
            }
            frac_digits = frac_end - end - 1;
            // "12." is accepted, a lone "." is not
            if frac_digits > 0 || int_digits > 0 {
                end = frac_end;
            }
        }

        if int_digits == 0 && frac_digits == 0 {
            return None;
        }

        Some(&s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers() {
        assert_eq!(TypeInference::parse_number("42"), Some(42.0));
        assert_eq!(TypeInference::parse_number("-7"), Some(-7.0));
        assert_eq!(TypeInference::parse_number("0.25"), Some(0.25));
        assert_eq!(TypeInference::parse_number(".5"), Some(0.5));
        assert_eq!(TypeInference::parse_number("-.5"), Some(-0.5));
        assert_eq!(TypeInference::parse_number("12."), Some(12.0));
    }

    #[test]
    fn test_decorated_numbers() {
        assert_eq!(TypeInference::parse_number("$1,204.50"), Some(1204.5));
        assert_eq!(TypeInference::parse_number("12.5 MB"), Some(12.5));
        assert_eq!(TypeInference::parse_number("85%"), Some(85.0));
        assert_eq!(TypeInference::parse_number("+3"), Some(3.0));
    }

    #[test]
    fn test_leading_prefix_only() {
        assert_eq!(TypeInference::parse_number("1.2.3"), Some(1.2));
        assert_eq!(TypeInference::parse_number("5-3"), Some(5.0));
        // Dates keep only the year
        assert_eq!(TypeInference::parse_number("2024-01-15"), Some(2024.0));
    }

    #[test]
    fn test_not_numbers() {
        assert_eq!(TypeInference::parse_number(""), None);
        assert_eq!(TypeInference::parse_number("TCP_MISS"), None);
        assert_eq!(TypeInference::parse_number("-"), None);
        assert_eq!(TypeInference::parse_number("."), None);
        assert_eq!(TypeInference::parse_number("--5"), None);
        assert_eq!(TypeInference::parse_number("-.-"), None);
    }

    #[test]
    fn test_rejects_overflow() {
        let huge = "9".repeat(400);
        assert_eq!(TypeInference::parse_number(&huge), None);
    }

    #[test]
    fn test_infer_from_string() {
        assert_eq!(TypeInference::infer_from_string("10"), InferredType::Number);
        assert_eq!(
            TypeInference::infer_from_string("example.com"),
            InferredType::Text
        );
    }
}
