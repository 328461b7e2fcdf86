//! Budget aggregation over a trip's expenses.
//!
//! Everything here is a pure function of the budget, the currency and the
//! expense list: nothing is read from or written to the store.
//!
//! ## Progress
//!
//! `progress_percent = total_spent / budget * 100` when `budget > 0`, else
//! `0`. The raw value is unclamped and drives [`BudgetStatus`]:
//!
//! - `> 100` → [`BudgetStatus::OverBudget`]
//! - `> 80` → [`BudgetStatus::Warning`]
//! - otherwise → [`BudgetStatus::Nominal`]
//!
//! [`BudgetSummary::display_percent`] clamps to `[0, 100]` for progress bars.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Currency, Expense, ExpenseCategory, Money, ResultEngine};

/// Above this percentage the budget is in warning.
pub const WARNING_PERCENT: f64 = 80.0;
/// Above this percentage the budget is exceeded.
pub const OVER_BUDGET_PERCENT: f64 = 100.0;

/// How many expenses the "recent expenses" view shows.
pub const RECENT_EXPENSES: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    Nominal,
    Warning,
    OverBudget,
}

impl BudgetStatus {
    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        if percent > OVER_BUDGET_PERCENT {
            Self::OverBudget
        } else if percent > WARNING_PERCENT {
            Self::Warning
        } else {
            Self::Nominal
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub currency: Currency,
    pub budget: Money,
    /// Every category is present, zero when nothing was spent on it.
    pub spend_by_category: BTreeMap<ExpenseCategory, Money>,
    pub total_spent: Money,
    /// `budget - total_spent`, negative when over budget.
    pub remaining: Money,
    pub progress_percent: f64,
    pub status: BudgetStatus,
}

impl BudgetSummary {
    /// Progress clamped to `[0, 100]`.
    #[must_use]
    pub fn display_percent(&self) -> f64 {
        self.progress_percent.clamp(0.0, 100.0)
    }

    #[must_use]
    pub fn spent_on(&self, category: ExpenseCategory) -> Money {
        self.spend_by_category
            .get(&category)
            .copied()
            .unwrap_or(Money::ZERO)
    }
}

/// Aggregate `expenses` against `budget`.
///
/// Fails with `InvalidAmount` when the totals do not fit in [`Money`].
pub fn summarize(
    budget: Money,
    currency: Currency,
    expenses: &[Expense],
) -> ResultEngine<BudgetSummary> {
    let mut spend_by_category: BTreeMap<ExpenseCategory, Money> = ExpenseCategory::ALL
        .iter()
        .map(|category| (*category, Money::ZERO))
        .collect();
    for expense in expenses {
        let spent = spend_by_category.entry(expense.category).or_default();
        *spent = spent.try_add(expense.amount)?;
    }

    let total_spent = Money::try_sum(spend_by_category.values().copied())?;
    let progress_percent = progress_percent(total_spent, budget);

    Ok(BudgetSummary {
        currency,
        budget,
        spend_by_category,
        total_spent,
        remaining: budget.try_sub(total_spent)?,
        progress_percent,
        status: BudgetStatus::from_percent(progress_percent),
    })
}

/// `spent / budget * 100`, or `0` for an empty budget.
#[must_use]
pub fn progress_percent(spent: Money, budget: Money) -> f64 {
    if !budget.is_positive() {
        return 0.0;
    }
    // Scale before dividing: whole percentages come out exact.
    (spent.minor() as f64 * 100.0) / budget.minor() as f64
}

/// The first `limit` expenses of a list already ordered most recent first.
#[must_use]
pub fn recent(expenses: &[Expense], limit: usize) -> &[Expense] {
    &expenses[..expenses.len().min(limit)]
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;
    use crate::{EngineError, NewExpense};

    fn expense(category: ExpenseCategory, minor: i64) -> Expense {
        Expense::new(NewExpense {
            trip_id: Uuid::nil(),
            category,
            amount: Money::new(minor),
            description: category.as_str().to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        })
        .unwrap()
    }

    #[test]
    fn empty_expenses() {
        let summary = summarize(Money::new(100_000), Currency::Usd, &[]).unwrap();
        assert_eq!(summary.total_spent, Money::ZERO);
        assert_eq!(summary.remaining, Money::new(100_000));
        assert_eq!(summary.progress_percent, 0.0);
        assert_eq!(summary.status, BudgetStatus::Nominal);
        assert_eq!(summary.spend_by_category.len(), 5);
        assert!(summary.spend_by_category.values().all(|m| m.is_zero()));
    }

    #[test]
    fn warning_at_85_percent() {
        let expenses = [
            expense(ExpenseCategory::Food, 30_000),
            expense(ExpenseCategory::Accommodation, 50_000),
            expense(ExpenseCategory::Food, 5_000),
        ];
        let summary = summarize(Money::new(100_000), Currency::Usd, &expenses).unwrap();

        assert_eq!(summary.spent_on(ExpenseCategory::Food), Money::new(35_000));
        assert_eq!(
            summary.spent_on(ExpenseCategory::Accommodation),
            Money::new(50_000)
        );
        assert_eq!(summary.spent_on(ExpenseCategory::Shopping), Money::ZERO);
        assert_eq!(summary.total_spent, Money::new(85_000));
        assert_eq!(summary.progress_percent, 85.0);
        assert_eq!(summary.status, BudgetStatus::Warning);
    }

    #[test]
    fn over_budget_at_120_percent() {
        let expenses = [expense(ExpenseCategory::Transport, 120_000)];
        let summary = summarize(Money::new(100_000), Currency::Usd, &expenses).unwrap();

        assert_eq!(summary.progress_percent, 120.0);
        assert_eq!(summary.display_percent(), 100.0);
        assert_eq!(summary.status, BudgetStatus::OverBudget);
        assert_eq!(summary.remaining, Money::new(-20_000));
    }

    #[test]
    fn zero_budget_has_zero_progress() {
        let expenses = [expense(ExpenseCategory::Shopping, 999)];
        let summary = summarize(Money::ZERO, Currency::Eur, &expenses).unwrap();

        assert_eq!(summary.progress_percent, 0.0);
        assert_eq!(summary.status, BudgetStatus::Nominal);
        assert_eq!(summary.remaining, Money::new(-999));
    }

    #[test]
    fn thresholds_are_exclusive() {
        assert_eq!(BudgetStatus::from_percent(80.0), BudgetStatus::Nominal);
        assert_eq!(BudgetStatus::from_percent(80.01), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::from_percent(100.0), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::from_percent(100.01), BudgetStatus::OverBudget);
    }

    #[test]
    fn categories_sum_to_total_and_remaining_is_exact() {
        // Cent amounts that drift when added as binary floats.
        let amounts = [10, 20, 30, 1, 2, 3, 333, 667, 1_999, 7];
        let expenses: Vec<Expense> = amounts
            .iter()
            .zip(ExpenseCategory::ALL.iter().cycle())
            .map(|(minor, category)| expense(*category, *minor))
            .collect();
        let budget = Money::new(12_345);
        let summary = summarize(budget, Currency::Gbp, &expenses).unwrap();

        let by_category: Money = summary.spend_by_category.values().sum();
        assert_eq!(by_category, summary.total_spent);
        assert_eq!(summary.total_spent, Money::new(amounts.iter().sum()));
        assert_eq!(summary.remaining + summary.total_spent, budget);
    }

    #[test]
    fn totals_past_the_money_range_are_an_error() {
        let largest = Money::new(i64::MAX);
        let expenses = [
            expense(ExpenseCategory::Food, largest.minor()),
            expense(ExpenseCategory::Transport, largest.minor()),
        ];
        assert_eq!(
            summarize(Money::new(1_000), Currency::Usd, &expenses).unwrap_err(),
            EngineError::InvalidAmount("amount too large".to_string())
        );

        let same_category = [
            expense(ExpenseCategory::Food, largest.minor()),
            expense(ExpenseCategory::Food, 1),
        ];
        assert!(summarize(Money::new(1_000), Currency::Usd, &same_category).is_err());
    }

    #[test]
    fn recent_takes_prefix() {
        let expenses: Vec<Expense> = (0..7)
            .map(|i| expense(ExpenseCategory::Food, i))
            .collect();
        assert_eq!(recent(&expenses, RECENT_EXPENSES).len(), 5);
        assert_eq!(recent(&expenses[..2], RECENT_EXPENSES).len(), 2);
    }

    #[test]
    fn serializes_categories_as_keys() {
        let summary = summarize(
            Money::new(1_000),
            Currency::Usd,
            &[expense(ExpenseCategory::Activities, 250)],
        )
        .unwrap();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["spendByCategory"]["activities"], 250);
        assert_eq!(json["status"], "nominal");
        assert_eq!(json["progressPercent"], 25.0);
    }
}
