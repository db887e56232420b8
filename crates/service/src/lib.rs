//! Service layer: the only code in the workspace that issues storage
//! operations. Route handlers consume these APIs and never see a raw
//! driver error.

pub mod agents;
pub mod errors;
pub mod users;
#[cfg(test)]
pub mod test_support;
