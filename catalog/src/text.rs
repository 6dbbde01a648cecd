use lazy_static::lazy_static;
use regex::{Captures, Regex, RegexBuilder};
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^\S+@\S+\.\S+$").expect("valid regex");
    static ref SLUG: Regex = Regex::new(r"^[A-Za-z0-9._~-]+$").expect("valid regex");
}

/// Fold text for case-insensitive matching: NFKC normalization, then lowercase.
pub fn fold(text: &str) -> String {
    text.nfkc().collect::<String>().to_lowercase()
}

/// Fold a user-entered search term. Surrounding whitespace is ignored.
pub fn fold_term(term: &str) -> String {
    fold(term.trim())
}

/// Substring containment of an already folded needle. An empty needle matches everything.
pub fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    folded_needle.is_empty() || fold(haystack).contains(folded_needle)
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email.trim())
}

pub fn is_url_safe_slug(slug: &str) -> bool {
    SLUG.is_match(slug)
}

/// Wrap case-insensitive occurrences of `term` in `<em>` tags.
pub fn highlight_term(text: &str, term: &str) -> String {
    let term = term.trim();
    if term.is_empty() {
        return text.to_string();
    }
    let pat = match RegexBuilder::new(&regex::escape(term)).case_insensitive(true).build() {
        Ok(pat) => pat,
        Err(_) => return text.to_string(),
    };
    pat.replace_all(text, |caps: &Captures| format!("<em>{}</em>", &caps[0])).to_string()
}
