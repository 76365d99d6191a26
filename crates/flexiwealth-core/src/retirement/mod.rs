pub mod nps;
pub mod planning;
