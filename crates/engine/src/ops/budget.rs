use uuid::Uuid;

use crate::{BudgetSummary, ResultEngine, budget::summarize, store::ForeignKey};

use super::Engine;

impl Engine {
    /// Budget summary of a trip, computed from its current expenses.
    pub async fn budget_summary(&self, trip_id: Uuid) -> ResultEngine<BudgetSummary> {
        let trip = self.require_trip(trip_id).await?;
        let expenses = self
            .store
            .expenses
            .list_by(ForeignKey::Trip(trip_id))
            .await?;
        summarize(trip.budget, trip.currency, &expenses)
    }
}
