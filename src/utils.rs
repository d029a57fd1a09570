//! Utility functions for the customer registry

use crate::models::PersonType;

/// Formats a normalized identifier for display
///
/// Individuals are shown as `NNN.NNN.NNN-NN` and organizations as
/// `NN.NNN.NNN/NNNN-NN`. An identifier whose length does not match its
/// person type (or that contains non-digits) is returned unchanged.
///
/// # Examples
/// ```
/// use customer_registry::models::PersonType;
/// use customer_registry::utils::format_identifier;
///
/// assert_eq!(format_identifier("52998224725", PersonType::Individual), "529.982.247-25");
/// assert_eq!(format_identifier("11444777000161", PersonType::Organization), "11.444.777/0001-61");
/// ```
pub fn format_identifier(identifier: &str, person_type: PersonType) -> String {
    if !identifier.chars().all(|c| c.is_ascii_digit()) {
        return identifier.to_string();
    }

    match (person_type, identifier.len()) {
        (PersonType::Individual, 11) => format!(
            "{}.{}.{}-{}",
            &identifier[..3],
            &identifier[3..6],
            &identifier[6..9],
            &identifier[9..]
        ),
        (PersonType::Organization, 14) => format!(
            "{}.{}.{}/{}-{}",
            &identifier[..2],
            &identifier[2..5],
            &identifier[5..8],
            &identifier[8..12],
            &identifier[12..]
        ),
        _ => identifier.to_string(),
    }
}

/// Trims a text field, treating blank values as absent
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
