pub mod email;
pub mod identifier;

pub use email::is_valid_email;
pub use identifier::{
    is_valid_individual_id, is_valid_organization_id, normalize, ChecksumScheme, INDIVIDUAL,
    ORGANIZATION,
};
