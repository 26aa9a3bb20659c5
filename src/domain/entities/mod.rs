pub mod accounts;
pub mod favorites;
pub mod plans;
pub mod subscriptions;
