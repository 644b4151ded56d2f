//! Форматирование чисел в таблице логов

/// Целое с пробелом между тысячами: `-1234567` -> `"-1 234 567"`
pub fn format_int(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// Длительность запроса: до секунды в миллисекундах, дальше в секундах
pub fn format_elapsed(ms: i64) -> String {
    if ms < 1000 {
        format!("{} ms", ms.max(0))
    } else {
        format!("{:.1} s", ms as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_int() {
        assert_eq!(format_int(0), "0");
        assert_eq!(format_int(999), "999");
        assert_eq!(format_int(1000), "1 000");
        assert_eq!(format_int(1234567), "1 234 567");
        assert_eq!(format_int(-45678), "-45 678");
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(350), "350 ms");
        assert_eq!(format_elapsed(1500), "1.5 s");
        assert_eq!(format_elapsed(-3), "0 ms");
    }
}
