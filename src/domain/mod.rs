pub mod id;
pub mod reservation;
pub mod tiers;
pub mod topology;
pub mod validate;
