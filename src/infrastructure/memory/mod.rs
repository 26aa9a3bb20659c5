pub mod accounts;
pub mod favorites;
pub mod plan_catalog;
pub mod seed;
pub mod subscriptions;
pub mod usage_counters;
