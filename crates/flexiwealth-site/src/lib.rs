//! Site-side collaborators of the FlexiWealth calculators: the contact form
//! and the stats/testimonials display data.
//!
//! Nothing here is needed to run a calculation. Failures in this crate are
//! either reported to the form caller or absorbed by falling back to the
//! built-in display data.

pub mod config;
pub mod contact;
pub mod content;
pub mod error;

pub use config::{RemoteContentConfig, SiteConfig};
pub use contact::{
    submit_contact, validate_submission, ContactDelivery, ContactOutcome, ContactSubmission,
    FieldError, LogDelivery,
};
pub use content::{
    DisplayDataSource, FallbackDisplayData, RemoteDisplayData, Stat, StaticDisplayData,
    Testimonial,
};
pub use error::{ContactError, ContentError, SiteConfigError};
