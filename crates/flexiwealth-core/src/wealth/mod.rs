pub mod human_life_value;
pub mod net_worth;
