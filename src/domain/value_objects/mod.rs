pub mod entitlements;
pub mod enums;
pub mod favorites;
pub mod plans;
pub mod subscriptions;
pub mod usage;
