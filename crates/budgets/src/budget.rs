use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use farber_core::{Entity, EntityId, Money, WorkflowError, WorkflowResult, impl_entity_id};

/// Budget identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetId(pub EntityId);

impl_entity_id!(BudgetId);

/// Budget status lifecycle: Pending → Approved, exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Pending,
    Approved,
}

/// Input for creating a budget.
///
/// `date` and `total` are optional the way the intake form leaves them
/// optional; defaults are applied during [`Budget::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBudget {
    pub number: String,
    pub client_name: String,
    pub date: Option<NaiveDate>,
    pub total: Option<Money>,
}

/// Entity: Budget (a quote).
///
/// Constructed only through [`Budget::create`]; mutated only through
/// [`Budget::approve`]. Everything else is immutable-by-replacement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    id: BudgetId,
    number: String,
    client_name: String,
    date: NaiveDate,
    total: Money,
    status: BudgetStatus,
}

impl Budget {
    /// Validated factory.
    ///
    /// `number` and `client_name` must be non-blank after trimming; `date`
    /// defaults to `today`, `total` defaults to zero. Rejection mutates
    /// nothing: no `Budget` exists until validation passes.
    pub fn create(id: BudgetId, input: NewBudget, today: NaiveDate) -> WorkflowResult<Self> {
        let number = input.number.trim();
        if number.is_empty() {
            return Err(WorkflowError::validation("budget number must not be blank"));
        }

        let client_name = input.client_name.trim();
        if client_name.is_empty() {
            return Err(WorkflowError::validation("client name must not be blank"));
        }

        Ok(Self {
            id,
            number: number.to_string(),
            client_name: client_name.to_string(),
            date: input.date.unwrap_or(today),
            total: input.total.unwrap_or(Money::ZERO),
            status: BudgetStatus::Pending,
        })
    }

    pub fn id_typed(&self) -> BudgetId {
        self.id
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn client_name(&self) -> &str {
        &self.client_name
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn status(&self) -> BudgetStatus {
        self.status
    }

    pub fn is_approved(&self) -> bool {
        self.status == BudgetStatus::Approved
    }

    /// Flip Pending → Approved.
    ///
    /// Returns `true` when this call performed the transition, `false` when
    /// the budget was already approved (idempotent no-op).
    pub fn approve(&mut self) -> bool {
        if self.is_approved() {
            return false;
        }
        self.status = BudgetStatus::Approved;
        true
    }
}

impl Entity for Budget {
    type Id = BudgetId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
