//! Domain layer: value objects, referral records, and error taxonomy.

pub mod foundation;
pub mod signup;
