//! String utilities for author-facing names and sentinel fields.

/// Converts an empty string to `None`, otherwise returns `Some(value)`.
///
/// Dialogue conditions store "unconstrained" as an empty string; this is the
/// single place that sentinel is interpreted.
///
/// # Examples
///
/// ```
/// use loreforge_domain::common::none_if_empty;
///
/// assert_eq!(none_if_empty("Q1"), Some("Q1"));
/// assert_eq!(none_if_empty(""), None);
/// assert_eq!(none_if_empty(" "), Some(" ")); // Whitespace is not empty
/// ```
pub fn none_if_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Returns `base` if it is not taken, otherwise the first of `"base 2"`,
/// `"base 3"`, … that is not taken.
///
/// # Examples
///
/// ```
/// use loreforge_domain::common::unique_name;
///
/// let taken = ["Greeting", "Greeting 2"];
/// assert_eq!(unique_name("Greeting", taken), "Greeting 3");
/// assert_eq!(unique_name("Farewell", taken), "Farewell");
/// ```
pub fn unique_name<'a, I>(base: &str, taken: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let taken: Vec<&str> = taken.into_iter().collect();
    if !taken.contains(&base) {
        return base.to_string();
    }

    let mut counter = 2u32;
    loop {
        let candidate = format!("{} {}", base, counter);
        if !taken.contains(&candidate.as_str()) {
            return candidate;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_if_empty_with_content() {
        assert_eq!(none_if_empty("active"), Some("active"));
    }

    #[test]
    fn test_none_if_empty_empty_string() {
        assert_eq!(none_if_empty(""), None);
    }

    #[test]
    fn test_none_if_empty_whitespace_is_not_empty() {
        assert_eq!(none_if_empty("\t"), Some("\t"));
    }

    #[test]
    fn test_unique_name_free_base() {
        assert_eq!(unique_name("Greeting", Vec::new()), "Greeting");
    }

    #[test]
    fn test_unique_name_first_collision() {
        assert_eq!(unique_name("Greeting", ["Greeting"]), "Greeting 2");
    }

    #[test]
    fn test_unique_name_skips_taken_suffixes() {
        let taken = ["New Entry", "New Entry 2", "New Entry 3", "New Entry 5"];
        assert_eq!(unique_name("New Entry", taken), "New Entry 4");
    }

    #[test]
    fn test_unique_name_suffix_only_taken() {
        // A free base wins even if suffixed variants exist.
        assert_eq!(unique_name("Greeting", ["Greeting 2"]), "Greeting");
    }
}
