//! The module contains the `Expense` record and its categories.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, Money, ResultEngine,
    store::{ForeignKey, Record},
    util::normalize_required_text,
};

/// Budget category of an expense.
///
/// The declaration order is the order categories are reported in.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    #[default]
    Food,
    Transport,
    Accommodation,
    Activities,
    Shopping,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 5] = [
        ExpenseCategory::Food,
        ExpenseCategory::Transport,
        ExpenseCategory::Accommodation,
        ExpenseCategory::Activities,
        ExpenseCategory::Shopping,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Accommodation => "accommodation",
            Self::Activities => "activities",
            Self::Shopping => "shopping",
        }
    }
}

impl TryFrom<&str> for ExpenseCategory {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "transport" => Ok(Self::Transport),
            "accommodation" => Ok(Self::Accommodation),
            "activities" => Ok(Self::Activities),
            "shopping" => Ok(Self::Shopping),
            other => Err(EngineError::Validation(format!(
                "invalid expense category: {other}"
            ))),
        }
    }
}

/// Money spent during a trip, in the trip currency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub trip_id: Uuid,
    pub category: ExpenseCategory,
    pub amount: Money,
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewExpense {
    pub trip_id: Uuid,
    pub category: ExpenseCategory,
    pub amount: Money,
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpensePatch {
    pub category: Option<ExpenseCategory>,
    pub amount: Option<Money>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

impl Expense {
    pub fn new(new: NewExpense) -> ResultEngine<Self> {
        Ok(Self {
            id: Uuid::new_v4(),
            trip_id: new.trip_id,
            category: new.category,
            amount: new.amount.ensure_non_negative("expense amount")?,
            description: normalize_required_text(&new.description, "expense description")?,
            date: new.date,
        })
    }
}

impl Record for Expense {
    const KIND: &'static str = "expense";
    type Patch = ExpensePatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn belongs_to(&self, key: ForeignKey) -> bool {
        matches!(key, ForeignKey::Trip(trip_id) if self.trip_id == trip_id)
    }

    /// Most recent first.
    fn order_under(_key: ForeignKey, a: &Self, b: &Self) -> Ordering {
        b.date.cmp(&a.date)
    }

    fn apply(&mut self, patch: ExpensePatch) -> ResultEngine<()> {
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount.ensure_non_negative("expense amount")?;
        }
        if let Some(description) = patch.description {
            self.description = normalize_required_text(&description, "expense description")?;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        Ok(())
    }
}
