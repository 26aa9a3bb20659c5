use anyhow::{Result, anyhow};
use diesel::prelude::*;

use crate::{
    domain::value_objects::enums::account_types::AccountType,
    infrastructure::postgres::schema::accounts,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountEntity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub account_type: AccountType,
}

impl AccountEntity {
    pub fn is_company(&self) -> bool {
        self.account_type == AccountType::Company
    }
}

/// Raw row used for Diesel queries. The account type stays as text and is parsed.
#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = accounts)]
pub struct AccountRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub account_type: String,
}

impl TryFrom<AccountRow> for AccountEntity {
    type Error = anyhow::Error;

    fn try_from(value: AccountRow) -> Result<Self> {
        let account_type = AccountType::from_str(&value.account_type).ok_or_else(|| {
            anyhow!(
                "account {} has unknown account_type {}",
                value.id,
                value.account_type
            )
        })?;

        Ok(Self {
            id: value.id,
            name: value.name,
            email: value.email,
            account_type,
        })
    }
}
