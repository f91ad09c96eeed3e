mod certificate_id;
mod macros;
mod pass_type_id;

pub use certificate_id::CertificateId;
pub use pass_type_id::{PassTypeId, PassTypeIdentifier};

#[cfg(test)]
mod test;
