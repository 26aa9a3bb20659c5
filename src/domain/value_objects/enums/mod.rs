pub mod account_types;
pub mod billing_periods;
pub mod features;
pub mod subscription_statuses;
pub mod usage_states;
