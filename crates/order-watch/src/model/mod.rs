//! Order data as the admin backend returns it.

pub mod envelope;
pub mod order;

pub use envelope::*;
pub use order::*;
