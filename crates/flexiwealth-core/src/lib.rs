pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "investment")]
pub mod investment;

#[cfg(feature = "loans")]
pub mod loans;

#[cfg(feature = "goals")]
pub mod goals;

#[cfg(feature = "retirement")]
pub mod retirement;

#[cfg(feature = "statutory")]
pub mod statutory;

#[cfg(feature = "wealth")]
pub mod wealth;

pub use error::CalcError;
pub use types::*;

/// Standard result type for all calculator operations
pub type CalcResult<T> = Result<T, CalcError>;
