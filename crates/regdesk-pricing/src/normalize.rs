//! Service name normalization

/// Canonical form of a service name
///
/// Trims, collapses every run of whitespace to one space and lower-cases.
/// `normalize(normalize(s)) == normalize(s)` for every `s`.
///
/// # Examples
///
/// ```
/// use regdesk_pricing::normalize;
///
/// assert_eq!(normalize("  GST   Registration "), "gst registration");
/// ```
pub fn normalize(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_and_space_insensitive() {
        assert_eq!(
            normalize("  GST   Registration "),
            normalize("gst registration")
        );
        assert_eq!(normalize("GST\tFiling\n"), "gst filing");
    }

    #[test]
    fn test_idempotent() {
        for input in [
            "",
            "   ",
            "GST",
            "  Private   Limited\tCompany  Registration ",
            "ÉTUDE  Fiscale",
        ] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \t\n "), "");
    }
}
