//! National tax-identifier validation
//!
//! Individual (11 digits) and organization (14 digits) identifiers share the
//! same structure: the last two digits are check digits computed from a
//! weighted sum of the preceding digits modulo 11. The two formats differ
//! only in length and weight tables, so both are described by a
//! [`ChecksumScheme`] and validated by the same routine.

/// Weights for the first individual check digit (positions 0..9)
const INDIVIDUAL_FIRST_WEIGHTS: [u32; 9] = [10, 9, 8, 7, 6, 5, 4, 3, 2];
/// Weights for the second individual check digit (positions 0..10)
const INDIVIDUAL_SECOND_WEIGHTS: [u32; 10] = [11, 10, 9, 8, 7, 6, 5, 4, 3, 2];

const ORGANIZATION_FIRST_WEIGHTS: [u32; 12] = [5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];
const ORGANIZATION_SECOND_WEIGHTS: [u32; 13] = [6, 5, 4, 3, 2, 9, 8, 7, 6, 5, 4, 3, 2];

/// Parameters of a two-check-digit mod-11 identifier format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumScheme {
    /// Total number of digits, check digits included
    pub length: usize,
    /// Weights applied to the leading `length - 2` digits
    pub first_weights: &'static [u32],
    /// Weights applied to the leading `length - 1` digits
    pub second_weights: &'static [u32],
    /// Reject identifiers made of a single repeated digit
    pub reject_repeated: bool,
}

/// 11-digit identifier of a natural person
pub const INDIVIDUAL: ChecksumScheme = ChecksumScheme {
    length: 11,
    first_weights: &INDIVIDUAL_FIRST_WEIGHTS,
    second_weights: &INDIVIDUAL_SECOND_WEIGHTS,
    reject_repeated: true,
};

/// 14-digit identifier of a legal entity
pub const ORGANIZATION: ChecksumScheme = ChecksumScheme {
    length: 14,
    first_weights: &ORGANIZATION_FIRST_WEIGHTS,
    second_weights: &ORGANIZATION_SECOND_WEIGHTS,
    reject_repeated: true,
};

/// Strip every character that is not an ASCII decimal digit
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Map a weighted-sum remainder to a check digit: 0 when the remainder is
/// below 2, otherwise `11 - remainder`.
pub fn check_digit(digits: &[u32], weights: &[u32]) -> u32 {
    let sum: u32 = digits.iter().zip(weights).map(|(d, w)| d * w).sum();
    match sum % 11 {
        remainder if remainder < 2 => 0,
        remainder => 11 - remainder,
    }
}

impl ChecksumScheme {
    /// Compute both check digits for the leading `length - 2` digits.
    ///
    /// Returns `None` when fewer digits than the scheme needs are given.
    pub fn check_digits(&self, body: &[u32]) -> Option<(u32, u32)> {
        let body_len = self.length.checked_sub(2)?;
        if body.len() < body_len {
            return None;
        }

        let mut digits = body[..body_len].to_vec();
        let first = check_digit(&digits, self.first_weights);
        digits.push(first);
        let second = check_digit(&digits, self.second_weights);

        Some((first, second))
    }

    /// Normalize `raw` and check its length, repeated-digit guard and both
    /// check digits.
    pub fn is_valid(&self, raw: &str) -> bool {
        let digits: Vec<u32> = normalize(raw)
            .chars()
            .filter_map(|c| c.to_digit(10))
            .collect();

        if digits.len() != self.length {
            return false;
        }

        if self.reject_repeated && digits.iter().all(|d| *d == digits[0]) {
            return false;
        }

        match self.check_digits(&digits) {
            Some((first, second)) => {
                digits[self.length - 2] == first && digits[self.length - 1] == second
            }
            None => false,
        }
    }
}

/// Validate an 11-digit individual identifier, formatting ignored
pub fn is_valid_individual_id(raw: &str) -> bool {
    INDIVIDUAL.is_valid(raw)
}

/// Validate a 14-digit organization identifier, formatting ignored
pub fn is_valid_organization_id(raw: &str) -> bool {
    ORGANIZATION.is_valid(raw)
}
