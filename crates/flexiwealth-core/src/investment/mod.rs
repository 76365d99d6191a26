pub mod comparison;
pub mod compounding;
pub mod sip;
