//! Dashboard statistics across all orders and payments.

use chrono::NaiveDate;
use serde::Serialize;

use crate::finance::{self, OrderFinancials};
use crate::report::ReportPeriod;
use crate::types::Money;
use crate::workflow::WorkflowStatus;

/// One order's checklist and rollup.
#[derive(Debug, Clone, Copy)]
pub struct DashboardOrder {
    pub workflow: WorkflowStatus,
    pub financials: OrderFinancials,
}

/// A payment reduced to what revenue figures need.
#[derive(Debug, Clone, Copy)]
pub struct DatedAmount {
    pub date: NaiveDate,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_orders: usize,
    pub pending_orders: usize,
    pub completed_orders: usize,
    /// Payments dated in the current month.
    pub monthly_revenue: Money,
    /// Payments dated in the current year.
    pub yearly_revenue: Money,
    pub total_expenses: Money,
    /// Sum of per-order profit (may be negative).
    pub total_profit: Money,
    /// Sum of per-order balances, each already clamped at zero.
    pub total_balance: Money,
}

pub fn compute_dashboard(
    orders: &[DashboardOrder],
    payments: &[DatedAmount],
    today: NaiveDate,
) -> DashboardStats {
    let pending_orders = orders.iter().filter(|o| o.workflow.is_pending()).count();

    let revenue_in = |period: ReportPeriod| {
        finance::sum_amounts(
            payments
                .iter()
                .filter(|p| period.contains(p.date, today))
                .map(|p| p.amount),
        )
    };

    DashboardStats {
        total_orders: orders.len(),
        pending_orders,
        completed_orders: orders.len() - pending_orders,
        monthly_revenue: revenue_in(ReportPeriod::Monthly),
        yearly_revenue: revenue_in(ReportPeriod::Yearly),
        total_expenses: finance::sum_amounts(orders.iter().map(|o| o.financials.total_expenses)),
        total_profit: finance::sum_amounts(orders.iter().map(|o| o.financials.profit)),
        total_balance: finance::sum_amounts(orders.iter().map(|o| o.financials.balance)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::StepState;

    fn m(v: i64) -> Money {
        Money::from(v)
    }

    fn order(done: bool, budget: i64, expenses: i64, paid: i64) -> DashboardOrder {
        let mut workflow = WorkflowStatus::initial();
        if done {
            workflow = WorkflowStatus {
                photo_selection: StepState::Yes,
                album_design: StepState::Yes,
                album_printing: StepState::Yes,
                video_editing: StepState::NotNeeded,
                outdoor_shoot: StepState::NotNeeded,
                album_delivery: StepState::Yes,
            };
        }
        DashboardOrder {
            workflow,
            financials: OrderFinancials::compute(Some(m(budget)), None, m(expenses), m(paid)),
        }
    }

    fn paid_on(y: i32, mo: u32, amount: i64) -> DatedAmount {
        DatedAmount {
            date: NaiveDate::from_ymd_opt(y, mo, 1).unwrap(),
            amount: m(amount),
        }
    }

    #[test]
    fn empty_dashboard() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let stats = compute_dashboard(&[], &[], today);
        assert_eq!(stats.total_orders, 0);
        assert_eq!(stats.total_balance, Money::ZERO);
    }

    #[test]
    fn counts_and_totals() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let orders = [
            order(false, 100_000, 30_000, 40_000),
            order(true, 50_000, 60_000, 70_000),
        ];
        let payments = [
            paid_on(2026, 10, 40_000),
            paid_on(2026, 3, 70_000),
            paid_on(2025, 10, 5_000),
        ];
        let stats = compute_dashboard(&orders, &payments, today);

        assert_eq!(stats.total_orders, 2);
        assert_eq!(stats.pending_orders, 1);
        assert_eq!(stats.completed_orders, 1);
        assert_eq!(stats.monthly_revenue, m(40_000));
        assert_eq!(stats.yearly_revenue, m(110_000));
        assert_eq!(stats.total_expenses, m(90_000));
        // 70_000 + (-10_000)
        assert_eq!(stats.total_profit, m(60_000));
        // 60_000 + 0 (overpaid order clamps)
        assert_eq!(stats.total_balance, m(60_000));
    }
}
