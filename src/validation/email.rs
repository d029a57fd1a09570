use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// local-part@domain.tld with a top-level segment of two or more letters
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email pattern must compile");
}

pub fn is_valid_email(raw: &str) -> bool {
    EMAIL_PATTERN.is_match(raw)
}
