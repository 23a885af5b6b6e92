// Brazilian number formatting shared by the engine and any presentation layer.
// Values arrive as "1.234,56": '.' groups thousands and ',' marks decimals.

pub mod brazilian_format {
    use std::str::FromStr;

    fn normalize(s: &str) -> String {
        s.replace('.', "") // Remove thousand separators
            .replace(',', ".") // Replace decimal separator
            .trim()
            .to_string()
    }

    /// Lenient parse used for data cells: anything that is not a number becomes 0.
    ///
    /// Aggregations rely on malformed cells contributing zero instead of dropping
    /// the row, so this never fails.
    pub fn to_number(s: &str) -> f64 {
        let normalized = normalize(s);
        if normalized.is_empty() {
            return 0.0;
        }
        match f64::from_str(&normalized) {
            Ok(v) if v.is_finite() => v,
            _ => 0.0,
        }
    }

    /// `to_number` truncated toward zero, for count-like columns.
    pub fn to_integer(s: &str) -> i64 {
        to_number(s).trunc() as i64
    }

    /// 3500 -> "3.500"
    pub fn format_thousands(value: i64) -> String {
        let digits = value.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(ch);
        }
        if value < 0 {
            grouped.insert(0, '-');
        }
        grouped
    }

    pub fn format_decimal(value: f64, decimals: usize) -> String {
        let formatted = format!("{:.decimals$}", value, decimals = decimals);
        formatted.replace('.', ",")
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_to_number_examples() {
            assert_eq!(to_number("1.234,56"), 1234.56);
            assert_eq!(to_number(""), 0.0);
            assert_eq!(to_number("abc"), 0.0);
            assert_eq!(to_number("   "), 0.0);
            assert_eq!(to_number(" 2.500 "), 2500.0);
            assert_eq!(to_number("-3,5"), -3.5);
        }

        #[test]
        fn test_to_number_is_total_and_finite() {
            for input in ["NaN", "inf", "-infinity", "1,2,3", ",", ".", "1e999", "12abc", "\u{a0}"] {
                let v = to_number(input);
                assert!(v.is_finite(), "{input:?} produced {v}");
            }
            assert_eq!(to_number("1e999"), 0.0);
        }

        #[test]
        fn test_to_number_matches_plain_decimal_for_grouped_input() {
            for (input, plain) in [
                ("1,5", "1.5"),
                ("12.345,678", "12345.678"),
                ("999.999.999,01", "999999999.01"),
                ("7,0", "7.0"),
            ] {
                assert_eq!(to_number(input), plain.parse::<f64>().unwrap());
            }
        }

        #[test]
        fn test_to_integer_truncates() {
            assert_eq!(to_integer("1.234,99"), 1234);
            assert_eq!(to_integer("-2,7"), -2);
            assert_eq!(to_integer("x"), 0);
        }

        #[test]
        fn test_format_thousands() {
            assert_eq!(format_thousands(0), "0");
            assert_eq!(format_thousands(999), "999");
            assert_eq!(format_thousands(3500), "3.500");
            assert_eq!(format_thousands(1_000_000), "1.000.000");
            assert_eq!(format_thousands(-1_234_567), "-1.234.567");
        }

        #[test]
        fn test_format_decimal() {
            assert_eq!(format_decimal(1234.5, 2), "1234,50");
            assert_eq!(format_decimal(0.0, 0), "0");
        }
    }
}
