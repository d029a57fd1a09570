//! Listing and searching stored customers

use crate::backend::CustomerBackend;
use crate::error::{AppError, AppResult};
use crate::models::Customer;
use crate::validation::normalize;

/// All customers, oldest first
pub async fn list_customers(backend: &dyn CustomerBackend) -> AppResult<Vec<Customer>> {
    backend.find_all_customers().await
}

/// Look up one customer by identifier in any formatting
pub async fn find_customer(backend: &dyn CustomerBackend, identifier: &str) -> AppResult<Customer> {
    let normalized = normalize(identifier);
    if normalized.is_empty() {
        return Err(AppError::BadRequest(format!(
            "Invalid identifier: {}",
            identifier
        )));
    }

    backend
        .find_customer_by_identifier(&normalized)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No customer with identifier {}", normalized)))
}

/// Customers whose name, email or identifier contain `term`
pub async fn search_customers(
    backend: &dyn CustomerBackend,
    term: &str,
) -> AppResult<Vec<Customer>> {
    let query = SearchQuery::parse(term)
        .ok_or_else(|| AppError::BadRequest("Enter a search term".to_string()))?;

    let customers = backend.find_all_customers().await?;
    Ok(customers.into_iter().filter(|c| query.matches(c)).collect())
}

/// A parsed search term
///
/// Text is matched case-insensitively. A term made only of digits and
/// identifier punctuation (`.`, `-`, `/`, spaces) is also matched against
/// the stored identifier digits, so `529.982` finds `52998224725`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    digits: Option<String>,
}

impl SearchQuery {
    /// `None` for a blank term
    pub fn parse(term: &str) -> Option<Self> {
        let term = term.trim();
        if term.is_empty() {
            return None;
        }

        let looks_like_identifier = term
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '/' | ' '));
        let digits = Some(normalize(term)).filter(|d| looks_like_identifier && !d.is_empty());

        Some(Self {
            text: term.to_lowercase(),
            digits,
        })
    }

    pub fn matches(&self, customer: &Customer) -> bool {
        customer.name.to_lowercase().contains(&self.text)
            || customer.email.to_lowercase().contains(&self.text)
            || customer.identifier.contains(&self.text)
            || self
                .digits
                .as_ref()
                .is_some_and(|digits| customer.identifier.contains(digits.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PersonType;
    use chrono::Utc;

    fn customer(name: &str, email: &str, identifier: &str) -> Customer {
        Customer {
            id: format!("id-{}", identifier),
            name: name.to_string(),
            contact: "1234".to_string(),
            representative: None,
            email: email.to_string(),
            identifier: identifier.to_string(),
            person_type: PersonType::Individual,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_blank_term_rejected() {
        assert!(SearchQuery::parse("").is_none());
        assert!(SearchQuery::parse("   ").is_none());
    }

    #[test]
    fn test_name_match_is_case_insensitive() {
        let query = SearchQuery::parse("SILVA").unwrap();
        assert!(query.matches(&customer("Maria Silva", "m@x.com", "52998224725")));
        assert!(!query.matches(&customer("Ana Souza", "a@x.com", "11144477735")));
    }

    #[test]
    fn test_email_match() {
        let query = SearchQuery::parse("@acme.").unwrap();
        assert!(query.matches(&customer("Acme", "contato@acme.com", "11444777000161")));
    }

    #[test]
    fn test_identifier_match_with_and_without_punctuation() {
        let stored = customer("Maria", "m@x.com", "52998224725");

        assert!(SearchQuery::parse("9982").unwrap().matches(&stored));
        assert!(SearchQuery::parse("529.982.247").unwrap().matches(&stored));
        assert!(!SearchQuery::parse("529.983").unwrap().matches(&stored));
    }

    #[test]
    fn test_mixed_text_does_not_use_digit_matching() {
        let query = SearchQuery::parse("a1").unwrap();
        assert!(!query.matches(&customer("Maria", "m@x.com", "11144477735")));
    }
}
