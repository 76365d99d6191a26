pub mod goals;
pub mod investment;
pub mod loans;
pub mod retirement;
pub mod site;
pub mod statutory;
pub mod wealth;

/// Error for a flag that must be given when no structured input is supplied.
pub(crate) fn required(flag: &str) -> String {
    format!("--{flag} is required (or provide --input / stdin)")
}
