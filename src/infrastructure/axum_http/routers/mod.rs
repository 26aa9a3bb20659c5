pub mod entitlements;
pub mod favorites;
pub mod subscriptions;
