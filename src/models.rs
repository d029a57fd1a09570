use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validation::{ChecksumScheme, INDIVIDUAL, ORGANIZATION};

/// Kind of registrant; selects the identifier format
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PersonType {
    Individual,
    Organization,
}

impl PersonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonType::Individual => "individual",
            PersonType::Organization => "organization",
        }
    }

    /// Checksum scheme the identifier must satisfy
    pub fn scheme(&self) -> &'static ChecksumScheme {
        match self {
            PersonType::Individual => &INDIVIDUAL,
            PersonType::Organization => &ORGANIZATION,
        }
    }
}

impl fmt::Display for PersonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(PersonType::Individual),
            "organization" => Ok(PersonType::Organization),
            other => Err(format!("Unknown person type: {}", other)),
        }
    }
}

/// Raw registration input as submitted by a client.
///
/// Every field is optional here so that missing fields can be reported
/// together instead of failing deserialization on the first one.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub representative: Option<String>,
    pub email: Option<String>,
    pub identifier: Option<String>,
    pub person_type: Option<PersonType>,
}

/// A validated customer ready to be inserted, identifier already normalized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub name: String,
    pub contact: String,
    pub representative: Option<String>,
    pub email: String,
    pub identifier: String,
    pub person_type: PersonType,
}

/// A stored customer record
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub contact: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub representative: Option<String>,
    pub email: String,
    pub identifier: String,
    pub person_type: PersonType,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Identifier in the conventional punctuation for its person type
    pub fn formatted_identifier(&self) -> String {
        crate::utils::format_identifier(&self.identifier, self.person_type)
    }
}

/// Customer as returned over HTTP, with display-only fields added
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResource {
    #[serde(flatten)]
    pub customer: Customer,
    pub formatted_identifier: String,
}

impl From<Customer> for CustomerResource {
    fn from(customer: Customer) -> Self {
        let formatted_identifier = customer.formatted_identifier();
        Self {
            customer,
            formatted_identifier,
        }
    }
}

/// Listing and search response
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CustomerListResponse {
    pub total_results: usize,
    pub resources: Vec<CustomerResource>,
}

impl CustomerListResponse {
    pub fn from_customers(customers: Vec<Customer>) -> Self {
        let resources: Vec<CustomerResource> =
            customers.into_iter().map(CustomerResource::from).collect();
        Self {
            total_results: resources.len(),
            resources,
        }
    }
}
