use once_cell::sync::Lazy;
use regex::Regex;

static FORBIDDEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("forbidden filename characters"));

/// Strip `< > : " / \ | ? *` so the name is safe as a single path component.
pub fn sanitize_filename(name: &str) -> String {
    FORBIDDEN.replace_all(name, "").into_owned()
}

/// True if the sanitized name can be joined onto a directory without escaping it.
pub fn is_usable(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_every_forbidden_char() {
        assert_eq!(sanitize_filename(r#"a<b>c:d"e/f\g|h?i*j.png"#), "abcdefghij.png");
    }

    #[test]
    fn keeps_ordinary_names() {
        assert_eq!(sanitize_filename("Eagle Airstrike Icon.png"), "Eagle Airstrike Icon.png");
    }

    #[test]
    fn idempotent() {
        for name in ["Orbital: 380mm HE?.png", "x/y\\z", "***", "plain.png", ""] {
            let once = sanitize_filename(name);
            assert_eq!(sanitize_filename(&once), once);
            assert!(!once.contains(|c| "<>:\"/\\|?*".contains(c)));
        }
    }

    #[test]
    fn usable_names() {
        assert!(is_usable("a.png"));
        assert!(!is_usable(""));
        assert!(!is_usable("."));
        assert!(!is_usable(".."));
        assert!(!is_usable(&sanitize_filename("???")));
    }
}
