//! Order financial rollups: expenses, payments, profit, and balance.
//!
//! The budget of an order is its final budget, falling back to the estimated
//! budget, falling back to zero. Profit may go negative; balance is clamped at
//! zero so overpayment never shows as money owed.

use serde::Serialize;

use crate::money::round_paise;
use crate::types::Money;

/// Budget used for billing: `final ?? estimated ?? 0`.
pub fn effective_budget(final_budget: Option<Money>, estimated_budget: Option<Money>) -> Money {
    final_budget.or(estimated_budget).unwrap_or(Money::ZERO)
}

/// Sum a sequence of ledger amounts.
pub fn sum_amounts<I>(amounts: I) -> Money
where
    I: IntoIterator<Item = Money>,
{
    amounts.into_iter().sum()
}

/// `budget - total_expenses`. Not clamped.
pub fn profit(budget: Money, total_expenses: Money) -> Money {
    budget - total_expenses
}

/// `max(0, budget - total_payments)`.
pub fn balance(budget: Money, total_payments: Money) -> Money {
    (budget - total_payments).max(Money::ZERO)
}

/// Profit as a percentage of budget, rounded to 2 places. Zero budget yields 0.
pub fn profit_margin(budget: Money, total_expenses: Money) -> Money {
    percentage(profit(budget, total_expenses), budget)
}

/// Payments as a percentage of budget, rounded to 2 places. Zero budget yields 0.
pub fn payment_percentage(total_payments: Money, budget: Money) -> Money {
    percentage(total_payments, budget)
}

fn percentage(part: Money, whole: Money) -> Money {
    if whole.is_zero() {
        return Money::ZERO;
    }
    (part * Money::ONE_HUNDRED)
        .checked_div(whole)
        .map(round_paise)
        .unwrap_or(Money::ZERO)
}

/// Derived financial view of one order. Recomputed on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderFinancials {
    pub budget: Money,
    pub total_expenses: Money,
    pub total_payments: Money,
    pub profit: Money,
    pub balance: Money,
    pub profit_margin: Money,
    pub payment_percentage: Money,
}

impl OrderFinancials {
    pub fn compute(
        final_budget: Option<Money>,
        estimated_budget: Option<Money>,
        total_expenses: Money,
        total_payments: Money,
    ) -> Self {
        let budget = effective_budget(final_budget, estimated_budget);
        Self {
            budget,
            total_expenses,
            total_payments,
            profit: profit(budget, total_expenses),
            balance: balance(budget, total_payments),
            profit_margin: profit_margin(budget, total_expenses),
            payment_percentage: payment_percentage(total_payments, budget),
        }
    }
}
