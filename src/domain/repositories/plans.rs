use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;

use crate::domain::entities::plans::PlanEntity;

#[automock]
#[async_trait]
pub trait PlanRepository {
    /// `None` is a legitimate "no such plan" outcome.
    async fn find_by_id(&self, plan_id: &str) -> Result<Option<PlanEntity>>;
    /// Plans in catalog order, cheapest first.
    async fn list_plans(&self) -> Result<Vec<PlanEntity>>;
}
