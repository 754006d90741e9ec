//! OCR text cleanup
//!
//! Repairs the encoding noise OCR engines leave behind (typographic dashes
//! in place of minus signs, curly quotes, exotic spaces), strips characters
//! that carry no slip content, and collapses whitespace. Case is preserved.
//!
//! Both entry points are total and idempotent.

/// Normalize a raw OCR blob into a single line of text.
pub fn normalize(raw: &str) -> String {
    let repaired: String = raw.chars().filter_map(repair).collect();
    repaired.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize each line independently, dropping lines left empty.
///
/// `normalize(&normalize_lines(x).join("\n")) == normalize(x)`.
pub fn normalize_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(normalize)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Map one character to its repaired form, or drop it.
fn repair(c: char) -> Option<char> {
    if c.is_whitespace() {
        return Some(' ');
    }
    match c {
        // typographic minus and dashes
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' | '\u{FE63}'
        | '\u{FF0D}' => Some('-'),
        '\u{FF0B}' | '\u{FE62}' => Some('+'),
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => Some('\''),
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => Some('"'),
        '\u{FF08}' => Some('('),
        '\u{FF09}' => Some(')'),
        // bullets, bars and marks that OCR picks up from slip chrome
        '•' | '·' | '|' | '¦' | '®' | '™' | '©' | '■' | '□' | '▪' | '►' | '▶' | '◆' => {
            Some(' ')
        }
        _ if is_garbage(c) => None,
        _ => Some(c),
    }
}

fn is_garbage(c: char) -> bool {
    c.is_control()
        || matches!(c,
            '\u{00AD}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{FEFF}'
            | '\u{FFFD}'
            | '\u{E000}'..='\u{F8FF}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_collapses_whitespace_and_trims() {
        assert_eq!(normalize("  Yankees \t at\n\nRed   Sox  +150 "), "Yankees at Red Sox +150");
    }

    #[test]
    fn test_preserves_case() {
        assert_eq!(normalize("aaron JUDGE Over"), "aaron JUDGE Over");
    }

    #[test]
    fn test_repairs_typographic_minus() {
        assert_eq!(normalize("Aaron Judge Over 1.5 Hits \u{2212}120"), "Aaron Judge Over 1.5 Hits -120");
        assert_eq!(normalize("NYY \u{2013} ML (\u{FF0B}150)"), "NYY - ML (+150)");
    }

    #[test]
    fn test_strips_garbage() {
        assert_eq!(normalize("Red\u{200B} Sox\u{FFFD} \u{FEFF}+150\u{0007}"), "Red Sox +150");
        assert_eq!(normalize("• Yankees | Red Sox ™"), "Yankees Red Sox");
    }

    #[test]
    fn test_keeps_accented_names() {
        assert_eq!(normalize("José  Ramírez"), "José Ramírez");
    }

    #[test]
    fn test_empty_and_blank_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
        assert!(normalize_lines("\n \n").is_empty());
    }

    #[test]
    fn test_normalize_lines_keeps_line_structure() {
        let lines = normalize_lines("Yankees - ML  -150\n\n  Red Sox - Over 8.5 -110 \r\n");
        assert_eq!(lines, vec!["Yankees - ML -150", "Red Sox - Over 8.5 -110"]);
    }

    proptest! {
        #[test]
        fn prop_normalize_idempotent(s in "\\PC*") {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once);
        }

        #[test]
        fn prop_normalize_idempotent_any_chars(s in any::<String>()) {
            let once = normalize(&s);
            prop_assert_eq!(normalize(&once), once.clone());
            prop_assert_eq!(once.trim(), once.as_str());
        }

        #[test]
        fn prop_lines_agree_with_flat(s in any::<String>()) {
            let joined = normalize_lines(&s).join("\n");
            prop_assert_eq!(normalize(&joined), normalize(&s));
        }
    }
}
