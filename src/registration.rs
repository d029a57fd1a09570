//! Customer registration workflow
//!
//! A registration is validated in full before the store is touched: every
//! missing field and format problem is reported in one pass. Only a fully
//! valid form reaches the duplicate pre-check, and only a form that passes
//! the pre-check is inserted, exactly once. The store's unique constraint on
//! the identifier remains the source of truth; a violation at insert time is
//! reported exactly like a duplicate found by the pre-check.

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::backend::CustomerBackend;
use crate::error::AppError;
use crate::models::{Customer, CustomerResource, NewCustomer, PersonType, RegistrationForm};
use crate::utils::non_blank;
use crate::validation::{is_valid_email, normalize};

pub const SUCCESS_MESSAGE: &str = "Customer registered successfully";

/// Required registration fields, in reporting order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Contact,
    Email,
    Identifier,
    PersonType,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Name => "Name",
            Field::Contact => "Contact",
            Field::Email => "Email",
            Field::Identifier => "Identifier",
            Field::PersonType => "Person type",
        };
        f.write_str(label)
    }
}

/// The record that already holds an identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExistingCustomer {
    pub name: String,
    pub email: String,
}

impl From<Customer> for ExistingCustomer {
    fn from(customer: Customer) -> Self {
        Self {
            name: customer.name,
            email: customer.email,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error("{0} is required")]
    MissingField(Field),

    #[error("Email is invalid")]
    InvalidEmail,

    #[error("Invalid {0} identifier")]
    InvalidIdentifier(PersonType),

    /// `None` when the conflicting record could not be read back
    #[error("{}", duplicate_message(.0))]
    DuplicateIdentifier(Option<ExistingCustomer>),

    #[error("Failed to register customer: {0}")]
    StoreFailure(String),
}

fn duplicate_message(existing: &Option<ExistingCustomer>) -> String {
    match existing {
        Some(existing) => format!(
            "Identifier already registered for: {} ({})",
            existing.name, existing.email
        ),
        None => "Identifier is already registered".to_string(),
    }
}

impl RegistrationError {
    pub fn kind(&self) -> &'static str {
        match self {
            RegistrationError::MissingField(_) => "missingField",
            RegistrationError::InvalidEmail => "invalidEmail",
            RegistrationError::InvalidIdentifier(_) => "invalidIdentifier",
            RegistrationError::DuplicateIdentifier(_) => "duplicateIdentifier",
            RegistrationError::StoreFailure(_) => "storeFailure",
        }
    }
}

/// Result of a registration attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Registered(Customer),
    /// Ordered list of every problem found; never empty
    Rejected(Vec<RegistrationError>),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Registered(_))
    }

    pub fn errors(&self) -> &[RegistrationError] {
        match self {
            Outcome::Registered(_) => &[],
            Outcome::Rejected(errors) => errors,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors().iter().map(ToString::to_string).collect()
    }
}

#[derive(Serialize)]
struct ErrorEntry {
    kind: &'static str,
    message: String,
}

#[derive(Serialize)]
struct OutcomeBody {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer: Option<CustomerResource>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<ErrorEntry>,
}

impl Serialize for Outcome {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let body = match self {
            Outcome::Registered(customer) => OutcomeBody {
                success: true,
                message: Some(SUCCESS_MESSAGE),
                customer: Some(CustomerResource::from(customer.clone())),
                errors: Vec::new(),
            },
            Outcome::Rejected(errors) => OutcomeBody {
                success: false,
                message: None,
                customer: None,
                errors: errors
                    .iter()
                    .map(|e| ErrorEntry {
                        kind: e.kind(),
                        message: e.to_string(),
                    })
                    .collect(),
            },
        };
        body.serialize(serializer)
    }
}

/// Check presence and format of every field
///
/// Returns the normalized customer, or every problem found in field order:
/// missing fields first, then an invalid email, then an invalid identifier.
/// Text fields are trimmed; a blank value counts as missing and a blank
/// representative is dropped.
pub fn validate(form: &RegistrationForm) -> Result<NewCustomer, Vec<RegistrationError>> {
    let name = non_blank(form.name.as_deref());
    let contact = non_blank(form.contact.as_deref());
    let email = non_blank(form.email.as_deref());
    let identifier = non_blank(form.identifier.as_deref());
    let person_type = form.person_type;

    let mut errors: Vec<RegistrationError> = [
        (Field::Name, name.is_some()),
        (Field::Contact, contact.is_some()),
        (Field::Email, email.is_some()),
        (Field::Identifier, identifier.is_some()),
        (Field::PersonType, person_type.is_some()),
    ]
    .into_iter()
    .filter(|(_, present)| !present)
    .map(|(field, _)| RegistrationError::MissingField(field))
    .collect();

    if let Some(email) = &email {
        if !is_valid_email(email) {
            errors.push(RegistrationError::InvalidEmail);
        }
    }

    if let (Some(identifier), Some(person_type)) = (&identifier, person_type) {
        if !person_type.scheme().is_valid(identifier) {
            errors.push(RegistrationError::InvalidIdentifier(person_type));
        }
    }

    match (name, contact, email, identifier, person_type) {
        (Some(name), Some(contact), Some(email), Some(identifier), Some(person_type))
            if errors.is_empty() =>
        {
            Ok(NewCustomer {
                name,
                contact,
                representative: non_blank(form.representative.as_deref()),
                email,
                identifier: normalize(&identifier),
                person_type,
            })
        }
        _ => Err(errors),
    }
}

/// Validate a registration form and insert it when everything checks out
///
/// At most one insert is attempted, and only when validation and the
/// duplicate pre-check both pass. Store failures are reported, not retried.
pub async fn register(backend: &dyn CustomerBackend, form: &RegistrationForm) -> Outcome {
    let customer = match validate(form) {
        Ok(customer) => customer,
        Err(errors) => {
            let kinds: Vec<&str> = errors.iter().map(RegistrationError::kind).collect();
            warn!(errors = ?kinds, "registration rejected");
            return Outcome::Rejected(errors);
        }
    };

    match backend.find_customer_by_identifier(&customer.identifier).await {
        Ok(Some(existing)) => {
            warn!(
                person_type = %customer.person_type,
                "registration rejected: identifier already registered"
            );
            return Outcome::Rejected(vec![RegistrationError::DuplicateIdentifier(Some(
                existing.into(),
            ))]);
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "duplicate check failed");
            return Outcome::Rejected(vec![RegistrationError::StoreFailure(e.to_string())]);
        }
    }

    match backend.create_customer(&customer).await {
        Ok(created) => {
            info!(id = %created.id, person_type = %created.person_type, "customer registered");
            Outcome::Registered(created)
        }
        Err(AppError::UniqueViolation(constraint)) => {
            warn!(%constraint, "identifier registered concurrently");
            // Still a duplicate when the holder cannot be read back; only
            // the message loses the holder's name and email.
            let existing = match backend.find_customer_by_identifier(&customer.identifier).await {
                Ok(Some(holder)) => Some(ExistingCustomer::from(holder)),
                Ok(None) => {
                    warn!("identifier holder not visible after unique violation");
                    None
                }
                Err(e) => {
                    warn!(error = %e, "failed to read identifier holder after unique violation");
                    None
                }
            };
            Outcome::Rejected(vec![RegistrationError::DuplicateIdentifier(existing)])
        }
        Err(e) => {
            error!(error = %e, "customer insert failed");
            Outcome::Rejected(vec![RegistrationError::StoreFailure(e.to_string())])
        }
    }
}
