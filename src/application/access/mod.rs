//! Ownership and role checks

pub mod policy;

pub use policy::AccessPolicy;
