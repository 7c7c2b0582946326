// src/core/sanitize.rs

/// Company name → URL path segment.
/// `" & "` collapses to `"&"` first, then remaining spaces become `-`.
///
/// `"AT & T Services"` → `"AT&T-Services"`
pub fn company_slug(name: &str) -> String {
    name.replace(" & ", "&").replace(' ', "-")
}

/// Text content as the page shows it: surrounding whitespace dropped,
/// inner whitespace left alone.
pub fn clean_text<'a, I: IntoIterator<Item = &'a str>>(parts: I) -> String {
    let joined: String = parts.into_iter().collect();
    s!(joined.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ampersand_is_collapsed_before_spaces() {
        assert_eq!(company_slug("AT & T Services"), "AT&T-Services");
        assert_eq!(company_slug("Johnson & Johnson"), "Johnson&Johnson");
        assert_eq!(company_slug("Riot Games"), "Riot-Games");
        assert_eq!(company_slug("Google"), "Google");
    }

    #[test]
    fn lone_ampersand_without_spaces_is_kept() {
        assert_eq!(company_slug("H&M Group"), "H&M-Group");
        assert_eq!(company_slug("A &B"), "A-&B");
    }

    #[test]
    fn clean_text_trims_outer_whitespace_only() {
        assert_eq!(clean_text(["\n  10,001+ ", "employees  \n"]), "10,001+ employees");
        assert_eq!(clean_text(["  a  b "]), "a  b");
        assert_eq!(clean_text(Vec::<&str>::new()), "");
    }
}
