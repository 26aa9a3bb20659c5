pub mod accounts;
pub mod favorites;
pub mod subscriptions;
pub mod usage_counters;
