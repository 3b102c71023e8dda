//! Financial report: per-order revenue, expenses, and profit for a period.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::error::CoreError;
use crate::finance;
use crate::types::{Money, Timestamp};

/// Column headers shared by the PDF and spreadsheet exports.
pub const REPORT_HEADERS: [&str; 7] = [
    "Order ID",
    "Customer",
    "Event Type",
    "Amount",
    "Expenses",
    "Profit",
    "Date",
];

/// Placeholder for a missing customer name or event type.
pub const UNKNOWN: &str = "Unknown";

/// Keyword selecting every event type.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    #[default]
    Monthly,
    Yearly,
}

impl ReportPeriod {
    /// Whether `date` falls in the current month (or year) relative to `today`.
    pub fn contains(self, date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            Self::Monthly => date.year() == today.year() && date.month() == today.month(),
            Self::Yearly => date.year() == today.year(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }
}

/// Event-type filter for a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportCategory {
    All,
    EventType(String),
}

impl ReportCategory {
    /// Parse `all`, an event type from the catalog, or nothing (= all).
    pub fn parse(value: Option<&str>) -> Result<Self, CoreError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::All),
            Some(v) if v.eq_ignore_ascii_case(ALL_CATEGORIES) => Ok(Self::All),
            Some(v) => {
                catalog::validate_event_type(v)?;
                Ok(Self::EventType(v.to_string()))
            }
        }
    }

    pub fn matches(&self, event_type: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::EventType(wanted) => event_type == Some(wanted.as_str()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::EventType(t) => t,
        }
    }
}

/// One order as loaded for reporting.
#[derive(Debug, Clone)]
pub struct ReportSource {
    pub order_number: String,
    pub customer_name: Option<String>,
    pub event_type: Option<String>,
    pub budget: Money,
    pub total_expenses: Money,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub order_number: String,
    pub customer_name: String,
    pub event_type: String,
    pub amount: Money,
    pub expenses: Money,
    pub profit: Money,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub record_count: usize,
    pub total_revenue: Money,
    pub total_expenses: Money,
    pub net_profit: Money,
}

#[derive(Debug, Clone, Serialize)]
pub struct FinancialReport {
    pub period: ReportPeriod,
    pub category: String,
    pub generated_on: NaiveDate,
    pub rows: Vec<ReportRow>,
    pub summary: ReportSummary,
}

fn non_blank(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

/// Filter orders by period and category, then roll them up.
pub fn build_report(
    sources: Vec<ReportSource>,
    period: ReportPeriod,
    category: &ReportCategory,
    today: NaiveDate,
) -> FinancialReport {
    let rows: Vec<ReportRow> = sources
        .into_iter()
        .filter(|s| period.contains(s.created_at.date_naive(), today))
        .filter(|s| category.matches(s.event_type.as_deref()))
        .map(|s| ReportRow {
            profit: finance::profit(s.budget, s.total_expenses),
            order_number: s.order_number,
            customer_name: non_blank(s.customer_name),
            event_type: non_blank(s.event_type),
            amount: s.budget,
            expenses: s.total_expenses,
            created_at: s.created_at,
        })
        .collect();

    let summary = summarize(&rows);

    FinancialReport {
        period,
        category: category.label().to_string(),
        generated_on: today,
        rows,
        summary,
    }
}

pub fn summarize(rows: &[ReportRow]) -> ReportSummary {
    ReportSummary {
        record_count: rows.len(),
        total_revenue: finance::sum_amounts(rows.iter().map(|r| r.amount)),
        total_expenses: finance::sum_amounts(rows.iter().map(|r| r.expenses)),
        net_profit: finance::sum_amounts(rows.iter().map(|r| r.profit)),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn source(number: &str, event: Option<&str>, y: i32, m: u32, budget: i64, exp: i64) -> ReportSource {
        ReportSource {
            order_number: number.to_string(),
            customer_name: Some("Meera".to_string()),
            event_type: event.map(str::to_string),
            budget: Money::from(budget),
            total_expenses: Money::from(exp),
            created_at: Utc.with_ymd_and_hms(y, m, 5, 10, 0, 0).unwrap(),
        }
    }

    #[test]
    fn monthly_keeps_current_month_only() {
        let sources = vec![
            source("ORD-AKP-26-0001", Some("Wedding"), 2026, 10, 100_000, 30_000),
            source("ORD-AKP-26-0002", Some("Wedding"), 2026, 9, 50_000, 10_000),
            source("ORD-AKP-25-0007", Some("Wedding"), 2025, 10, 70_000, 0),
        ];
        let report = build_report(sources, ReportPeriod::Monthly, &ReportCategory::All, today());
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].profit, Money::from(70_000));
    }

    #[test]
    fn yearly_keeps_current_year() {
        let sources = vec![
            source("A", Some("Wedding"), 2026, 1, 10, 0),
            source("B", Some("Reception"), 2026, 10, 20, 0),
            source("C", Some("Wedding"), 2025, 12, 40, 0),
        ];
        let report = build_report(sources, ReportPeriod::Yearly, &ReportCategory::All, today());
        assert_eq!(report.summary.record_count, 2);
        assert_eq!(report.summary.total_revenue, Money::from(30));
    }

    #[test]
    fn category_filters_by_event_type() {
        let sources = vec![
            source("A", Some("Wedding"), 2026, 10, 10, 0),
            source("B", Some("Reception"), 2026, 10, 20, 0),
            source("C", None, 2026, 10, 40, 0),
        ];
        let category = ReportCategory::parse(Some("Reception")).unwrap();
        let report = build_report(sources, ReportPeriod::Monthly, &category, today());
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].order_number, "B");
        assert_eq!(report.category, "Reception");
    }

    #[test]
    fn summary_totals_include_losses() {
        let sources = vec![
            source("A", Some("Wedding"), 2026, 10, 100, 30),
            source("B", Some("Wedding"), 2026, 10, 50, 80),
        ];
        let report = build_report(sources, ReportPeriod::Monthly, &ReportCategory::All, today());
        assert_eq!(
            report.summary,
            ReportSummary {
                record_count: 2,
                total_revenue: Money::from(150),
                total_expenses: Money::from(110),
                net_profit: Money::from(40),
            }
        );
    }

    #[test]
    fn missing_labels_become_unknown() {
        let mut s = source("A", None, 2026, 10, 1, 0);
        s.customer_name = Some("  ".into());
        let report = build_report(vec![s], ReportPeriod::Monthly, &ReportCategory::All, today());
        assert_eq!(report.rows[0].customer_name, UNKNOWN);
        assert_eq!(report.rows[0].event_type, UNKNOWN);
    }

    #[test]
    fn labels_are_trimmed_not_rewritten() {
        let mut s = source("A", Some(" Wedding "), 2026, 10, 0, 0);
        s.customer_name = Some(" undefined ".into());
        let report = build_report(vec![s], ReportPeriod::Monthly, &ReportCategory::All, today());
        assert_eq!(report.rows[0].customer_name, "undefined");
        assert_eq!(report.rows[0].event_type, "Wedding");
    }

    #[test]
    fn category_parse() {
        assert_eq!(ReportCategory::parse(None).unwrap(), ReportCategory::All);
        assert_eq!(ReportCategory::parse(Some("ALL")).unwrap(), ReportCategory::All);
        assert!(ReportCategory::parse(Some("Birthday")).is_err());
    }
}
