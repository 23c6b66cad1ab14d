//! Display labels for package tiers

/// Tier label as shown to customers
///
/// The known misspelling `standrad` reads as "Standard". Anything else gets
/// its first letter capitalized and the remainder lower-cased.
///
/// # Examples
///
/// ```
/// use regdesk_pricing::format_package_label;
///
/// assert_eq!(format_package_label("standrad"), "Standard");
/// assert_eq!(format_package_label("PREMIUM"), "Premium");
/// ```
pub fn format_package_label(label: &str) -> String {
    if label.eq_ignore_ascii_case("standrad") {
        return "Standard".to_string();
    }

    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
