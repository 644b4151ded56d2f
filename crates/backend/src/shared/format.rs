/// Число с точками между триадами: `1234567` -> `"1.234.567"`
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let head = digits.len() % 3;
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - head) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Размер тела ответа для журнала запросов
pub fn format_size(bytes: usize) -> String {
    const KB: usize = 1024;
    if bytes < 10 * KB {
        format!("{} B", format_number(bytes as u64))
    } else {
        format!("{} KB", format_number((bytes / KB) as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(42), "42");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(12345), "12.345");
        assert_eq!(format_number(1234567), "1.234.567");
        assert_eq!(format_number(123456789), "123.456.789");
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.048 B");
        assert_eq!(format_size(20 * 1024), "20 KB");
        assert_eq!(format_size(2_000 * 1024), "2.000 KB");
    }
}
