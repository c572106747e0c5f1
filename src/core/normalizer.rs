/// Removes every whitespace character and changes nothing else.
///
/// Both equations and candidate solutions go through this before any
/// comparison, so `y' + y = 0` and `y'+y=0` are the same equation.
pub fn normalize(input: &str) -> String {
    input.chars().filter(|&c| !is_form_whitespace(c)).collect()
}

/// The ECMAScript `\s` class: Unicode `White_Space` without NEL (U+0085),
/// plus the byte order mark.
fn is_form_whitespace(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_all_whitespace() {
        assert_eq!(normalize("y' + y = 0"), "y'+y=0");
        assert_eq!(normalize(" y = C * e^(-x)\t\n"), "y=C*e^(-x)");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_leaves_other_characters_alone() {
        // unicode primes and case are preserved
        assert_eq!(normalize("Y′ = y"), "Y′=y");
    }

    #[test]
    fn test_strips_byte_order_mark() {
        assert_eq!(normalize("\u{FEFF}y' + y = 0"), "y'+y=0");
        assert_eq!(normalize("x = y\u{FEFF}^2"), "x=y^2");
    }

    #[test]
    fn test_keeps_next_line_character() {
        assert_eq!(normalize("y\u{85}=0"), "y\u{85}=0");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "",
            "y'' - 4y' + 4y = 0",
            "y = (1/3)e^x + Ce^(-2x)",
            "\u{00a0}y\u{2003}=\u{3000}sin(x)",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }
}
