use once_cell::sync::Lazy;
use regex::Regex;

static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("punctuation pattern should compile"));

/// Comparison key for politician names: punctuation removed, lowercased, trimmed.
pub fn clean_name(name: &str) -> String {
    NON_WORD.replace_all(name, "").to_lowercase().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_lowercases() {
        assert_eq!(clean_name("Nancy P. Pelosi!"), "nancy p pelosi");
        assert_eq!(clean_name("  O'Rourke, Beto  "), "orourke beto");
        assert_eq!(clean_name("Sen. Tommy Tuberville (R)"), "sen tommy tuberville r");
    }

    #[test]
    fn keeps_non_ascii_letters() {
        assert_eq!(clean_name("Nydia M. Velázquez"), "nydia m velázquez");
    }

    #[test]
    fn idempotent() {
        for s in [
            "",
            "   ",
            "Nancy P. Pelosi!",
            "J. Doe-Smith, Jr.",
            "\tMarjorie  Taylor Greene\n",
            "ÉMILE Zola...",
            "snake_case_name",
            "!!!",
        ] {
            let once = clean_name(s);
            assert_eq!(clean_name(&once), once, "input {s:?}");
        }
    }
}
