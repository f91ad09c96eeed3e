pub mod certificate;
pub mod pass_type;
