use std::collections::HashSet;

use anyhow::{Result, bail};
use async_trait::async_trait;

use crate::domain::{
    entities::plans::PlanEntity,
    repositories::plans::PlanRepository,
    value_objects::{
        enums::billing_periods::BillingPeriod,
        plans::{FREE_PLAN_ID, PROFESSIONAL_PLAN_ID, UNLIMITED, VIP_PLAN_ID, is_valid_cap},
    },
};

/// Static tier table, fixed at process start.
#[derive(Debug, Clone)]
pub struct PlanCatalog {
    plans: Vec<PlanEntity>,
}

impl PlanCatalog {
    /// Validates caps, id uniqueness and the presence of the free plan.
    pub fn new(plans: Vec<PlanEntity>) -> Result<Self> {
        let mut seen = HashSet::new();
        for plan in &plans {
            if !seen.insert(plan.id.as_str()) {
                bail!("plan catalog: duplicate plan id {}", plan.id);
            }
            if plan.price_minor < 0 {
                bail!("plan catalog: plan {} has a negative price", plan.id);
            }
            if !is_valid_cap(plan.max_curriculum_views) || !is_valid_cap(plan.max_contacts) {
                bail!("plan catalog: plan {} has a cap below -1", plan.id);
            }
        }
        if !seen.contains(FREE_PLAN_ID) {
            bail!("plan catalog: the {FREE_PLAN_ID} plan is required");
        }

        Ok(Self { plans })
    }

    pub fn default_catalog() -> Self {
        Self {
            plans: default_plans(),
        }
    }

    pub fn get(&self, plan_id: &str) -> Option<&PlanEntity> {
        self.plans.iter().find(|plan| plan.id == plan_id)
    }

    pub fn plans(&self) -> &[PlanEntity] {
        &self.plans
    }
}

#[async_trait]
impl PlanRepository for PlanCatalog {
    async fn find_by_id(&self, plan_id: &str) -> Result<Option<PlanEntity>> {
        Ok(self.get(plan_id).cloned())
    }

    async fn list_plans(&self) -> Result<Vec<PlanEntity>> {
        Ok(self.plans.clone())
    }
}

fn features(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn default_plans() -> Vec<PlanEntity> {
    vec![
        PlanEntity {
            id: FREE_PLAN_ID.to_string(),
            name: "Gratuito".to_string(),
            description: "Para empresas que querem conhecer a plataforma".to_string(),
            price_minor: 0,
            billing_period: BillingPeriod::Month,
            features: features(&[
                "Visualizar previews de currículos",
                "Busca básica por profissionais",
                "Até 5 visualizações por mês",
                "Suporte por email",
            ]),
            popular: false,
            max_curriculum_views: 5,
            max_contacts: 0,
        },
        PlanEntity {
            id: PROFESSIONAL_PLAN_ID.to_string(),
            name: "Professional".to_string(),
            description: "Para empresas em crescimento".to_string(),
            price_minor: 5_000,
            billing_period: BillingPeriod::Month,
            features: features(&[
                "Visualizações ilimitadas",
                "Até 50 contatos por mês",
                "Relatórios de atividade",
                "Salvar candidatos favoritos",
                "Busca avançada",
                "Suporte por telefone",
            ]),
            popular: true,
            max_curriculum_views: UNLIMITED,
            max_contacts: 50,
        },
        PlanEntity {
            id: VIP_PLAN_ID.to_string(),
            name: "VIP".to_string(),
            description: "Para empresas desenvolvidas".to_string(),
            price_minor: 10_000,
            billing_period: BillingPeriod::Month,
            features: features(&[
                "Tudo do plano Professional",
                "Assistência pessoal profissionalizada",
                "Prioridade de contato",
            ]),
            popular: false,
            max_curriculum_views: UNLIMITED,
            max_contacts: 50,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_passes_validation() {
        let catalog = PlanCatalog::new(default_plans()).unwrap();

        let ids: Vec<&str> = catalog.plans().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec![FREE_PLAN_ID, PROFESSIONAL_PLAN_ID, VIP_PLAN_ID]);
    }

    #[test]
    fn rejects_catalog_without_free_plan() {
        let plans = default_plans()
            .into_iter()
            .filter(|plan| plan.id != FREE_PLAN_ID)
            .collect();

        assert!(PlanCatalog::new(plans).is_err());
    }

    #[test]
    fn rejects_caps_below_unlimited_sentinel() {
        let mut plans = default_plans();
        plans[1].max_contacts = -2;

        assert!(PlanCatalog::new(plans).is_err());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut plans = default_plans();
        plans[2].id = PROFESSIONAL_PLAN_ID.to_string();

        assert!(PlanCatalog::new(plans).is_err());
    }

    #[tokio::test]
    async fn unknown_plan_is_none_not_error() {
        let catalog = PlanCatalog::default_catalog();

        assert!(catalog.find_by_id("enterprise").await.unwrap().is_none());
        assert_eq!(
            catalog.find_by_id(VIP_PLAN_ID).await.unwrap().unwrap().max_contacts,
            50
        );
    }
}
