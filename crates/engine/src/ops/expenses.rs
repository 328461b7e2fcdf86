use uuid::Uuid;

use crate::{Expense, ExpensePatch, NewExpense, ResultEngine, store::ForeignKey};

use super::Engine;

impl Engine {
    /// Return every expense, in creation order.
    pub async fn expenses(&self) -> ResultEngine<Vec<Expense>> {
        self.store.expenses.list().await
    }

    /// Return an expense, or `None` if absent.
    pub async fn expense(&self, expense_id: Uuid) -> ResultEngine<Option<Expense>> {
        self.store.expenses.get(expense_id).await
    }

    /// Expenses of a trip, most recent first.
    pub async fn expenses_by_trip(&self, trip_id: Uuid) -> ResultEngine<Vec<Expense>> {
        self.store.expenses.list_by(ForeignKey::Trip(trip_id)).await
    }

    /// Record an expense against an existing trip.
    pub async fn create_expense(&self, new: NewExpense) -> ResultEngine<Expense> {
        let expense = Expense::new(new)?;
        self.require_trip(expense.trip_id).await?;
        self.store.expenses.insert(expense).await
    }

    pub async fn update_expense(
        &self,
        expense_id: Uuid,
        patch: ExpensePatch,
    ) -> ResultEngine<Expense> {
        self.store.expenses.update(expense_id, patch).await
    }

    pub async fn delete_expense(&self, expense_id: Uuid) -> ResultEngine<Expense> {
        self.store.expenses.delete(expense_id).await
    }
}
