mod distribution;
mod non_stationary;
mod source;
mod stationary;

pub use distribution::ArmDistribution;
pub use non_stationary::NonStationaryBandit;
pub use source::RewardSource;
pub use stationary::StationaryBandit;
