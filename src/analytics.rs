// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Derived views over a transaction log.
//!
//! Every function here is pure: it reads only its arguments and never touches
//! the store or the clock. Callers pass `today` explicitly where a reference
//! date is needed.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap, hash_map::Entry};

use crate::models::{
    CategoryTotal, DailyPoint, MonthlyPoint, Summary, Transaction, TransactionFilter,
};

/// Days covered by the weekly series, `today` included.
pub const WEEK_DAYS: usize = 7;

pub fn compute_summary(transactions: &[Transaction]) -> Summary {
    let (total_income, total_expenses) = transactions.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(income, expenses), t| {
            if t.is_income() {
                (income + t.amount, expenses)
            } else {
                (income, expenses + t.amount)
            }
        },
    );
    Summary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
    }
}

/// Per-category expense totals in first-seen order.
///
/// Income transactions are skipped here, so callers may pass the full log or
/// an expense-only slice and get the same answer.
pub fn compute_category_breakdown(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut out: Vec<CategoryTotal> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for t in transactions.iter().filter(|t| t.is_expense()) {
        match index.entry(t.category.as_str()) {
            Entry::Occupied(entry) => out[*entry.get()].value += t.amount,
            Entry::Vacant(entry) => {
                entry.insert(out.len());
                out.push(CategoryTotal {
                    name: t.category.clone(),
                    value: t.amount,
                });
            }
        }
    }
    out
}

/// `YYYY-MM` bucket for a date; the first seven characters of its ISO form.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Income and expenses per month, ascending, only for months that have data.
pub fn compute_monthly_series(transactions: &[Transaction]) -> Vec<MonthlyPoint> {
    let mut map: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for t in transactions {
        let entry = map
            .entry(month_key(t.date))
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        if t.is_income() {
            entry.0 += t.amount;
        } else {
            entry.1 += t.amount;
        }
    }
    map.into_iter()
        .map(|(month, (income, expenses))| MonthlyPoint {
            month,
            income,
            expenses,
        })
        .collect()
}

/// Short English weekday name, e.g. "Mon".
pub fn day_label(date: NaiveDate) -> String {
    date.format("%a").to_string()
}

/// First day of the week window ending at `today`. Near the start of the
/// calendar the window is pinned to `NaiveDate::MIN` and still spans seven days.
pub fn week_start(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_days(Days::new(WEEK_DAYS as u64 - 1))
        .unwrap_or(NaiveDate::MIN)
}

/// The seven days ending at `today`, oldest first, zero-filled.
pub fn compute_weekly_series(transactions: &[Transaction], today: NaiveDate) -> Vec<DailyPoint> {
    let start = week_start(today);
    (0..WEEK_DAYS as u64)
        .filter_map(|offset| start.checked_add_days(Days::new(offset)))
        .map(|date| {
            let (income, expenses) = transactions
                .iter()
                .filter(|t| t.date == date)
                .fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), t| {
                    if t.is_income() {
                        (inc + t.amount, exp)
                    } else {
                        (inc, exp + t.amount)
                    }
                });
            DailyPoint {
                date,
                day_label: day_label(date),
                income,
                expenses,
            }
        })
        .collect()
}

/// Matching transactions, newest date first. Equal dates keep log order.
pub fn filter_transactions(
    transactions: &[Transaction],
    filter: &TransactionFilter,
) -> Vec<Transaction> {
    let mut out: Vec<Transaction> = transactions
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

/// The `limit` newest transactions. Later entries win ties on the same date.
pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
    let mut out: Vec<Transaction> = transactions.iter().rev().cloned().collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out.truncate(limit);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;
    use std::str::FromStr;

    fn tx(id: &str, t: TransactionType, amount: &str, category: &str, date: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            amount: Decimal::from_str(amount).unwrap(),
            category: category.to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            r#type: t,
            note: None,
        }
    }

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn scenario() -> Vec<Transaction> {
        vec![
            tx("1", TransactionType::Income, "100", "Salary", "2024-01-05"),
            tx("2", TransactionType::Expense, "40", "Food", "2024-01-10"),
            tx("3", TransactionType::Expense, "25", "Food", "2024-02-01"),
        ]
    }

    #[test]
    fn summary_of_scenario() {
        let s = compute_summary(&scenario());
        assert_eq!(s.total_income, d("100"));
        assert_eq!(s.total_expenses, d("65"));
        assert_eq!(s.balance, d("35"));
    }

    #[test]
    fn summary_of_empty_log_is_zero() {
        let s = compute_summary(&[]);
        assert_eq!(
            s,
            Summary {
                total_income: Decimal::ZERO,
                total_expenses: Decimal::ZERO,
                balance: Decimal::ZERO,
            }
        );
    }

    #[test]
    fn summary_balance_may_go_negative() {
        let txs = vec![
            tx("1", TransactionType::Income, "10.10", "Salary", "2024-03-01"),
            tx("2", TransactionType::Expense, "20.20", "Rent", "2024-03-02"),
        ];
        let s = compute_summary(&txs);
        assert_eq!(s.balance, d("-10.10"));
        assert_eq!(s.balance, s.total_income - s.total_expenses);
    }

    #[test]
    fn summary_sums_zero_amounts_without_complaint() {
        let txs = vec![tx("1", TransactionType::Expense, "0", "Food", "2024-03-01")];
        assert_eq!(compute_summary(&txs).total_expenses, Decimal::ZERO);
    }

    #[test]
    fn breakdown_of_scenario() {
        let b = compute_category_breakdown(&scenario());
        assert_eq!(
            b,
            vec![CategoryTotal {
                name: "Food".into(),
                value: d("65"),
            }]
        );
    }

    #[test]
    fn breakdown_keeps_first_seen_order() {
        let txs = vec![
            tx("1", TransactionType::Expense, "5", "Travel", "2024-03-01"),
            tx("2", TransactionType::Expense, "50", "Rent", "2024-03-02"),
            tx("3", TransactionType::Expense, "1", "Travel", "2024-03-03"),
            tx("4", TransactionType::Expense, "2", "Food", "2024-03-04"),
        ];
        let names: Vec<_> = compute_category_breakdown(&txs)
            .into_iter()
            .map(|c| (c.name, c.value))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Travel".to_string(), d("6")),
                ("Rent".to_string(), d("50")),
                ("Food".to_string(), d("2")),
            ]
        );
    }

    #[test]
    fn breakdown_total_matches_expense_total() {
        let mut txs = scenario();
        txs.push(tx("4", TransactionType::Expense, "12.34", "Rent", "2024-02-03"));
        txs.push(tx("5", TransactionType::Income, "7", "Rent", "2024-02-03"));
        let total: Decimal = compute_category_breakdown(&txs)
            .iter()
            .map(|c| c.value)
            .sum();
        assert_eq!(total, compute_summary(&txs).total_expenses);
    }

    #[test]
    fn monthly_series_of_scenario() {
        let m = compute_monthly_series(&scenario());
        assert_eq!(
            m,
            vec![
                MonthlyPoint {
                    month: "2024-01".into(),
                    income: d("100"),
                    expenses: d("40"),
                },
                MonthlyPoint {
                    month: "2024-02".into(),
                    income: Decimal::ZERO,
                    expenses: d("25"),
                },
            ]
        );
    }

    #[test]
    fn monthly_series_sorted_without_gaps_or_duplicates() {
        let txs = vec![
            tx("1", TransactionType::Expense, "1", "Food", "2025-03-09"),
            tx("2", TransactionType::Expense, "1", "Food", "2023-11-30"),
            tx("3", TransactionType::Income, "1", "Salary", "2025-03-01"),
            tx("4", TransactionType::Expense, "1", "Food", "2024-12-31"),
        ];
        let months: Vec<_> = compute_monthly_series(&txs)
            .into_iter()
            .map(|p| p.month)
            .collect();
        assert_eq!(months, vec!["2023-11", "2024-12", "2025-03"]);
    }

    #[test]
    fn same_category_opposite_types_partition_cleanly() {
        let txs = vec![
            tx("1", TransactionType::Income, "30", "Others", "2024-05-02"),
            tx("2", TransactionType::Expense, "10", "Others", "2024-05-20"),
        ];
        let m = compute_monthly_series(&txs);
        assert_eq!(m.len(), 1);
        assert_eq!(m[0].income, d("30"));
        assert_eq!(m[0].expenses, d("10"));
        let b = compute_category_breakdown(&txs);
        assert_eq!(b.len(), 1);
        assert_eq!(b[0].value, d("10"));
    }

    #[test]
    fn weekly_series_always_has_seven_days() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let week = compute_weekly_series(&[], today);
        assert_eq!(week.len(), WEEK_DAYS);
        assert!(week
            .iter()
            .all(|p| p.income.is_zero() && p.expenses.is_zero()));
        assert_eq!(week[0].date, NaiveDate::from_ymd_opt(2024, 2, 24).unwrap());
        assert_eq!(week[6].date, today);
    }

    #[test]
    fn weekly_series_labels_and_buckets() {
        // 2024-01-10 is a Wednesday
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let txs = vec![
            tx("1", TransactionType::Income, "100", "Salary", "2024-01-05"),
            tx("2", TransactionType::Expense, "40", "Food", "2024-01-10"),
            tx("3", TransactionType::Expense, "2.5", "Food", "2024-01-10"),
            tx("4", TransactionType::Expense, "99", "Food", "2024-01-03"),
            tx("5", TransactionType::Expense, "99", "Food", "2024-01-11"),
        ];
        let week = compute_weekly_series(&txs, today);
        let labels: Vec<_> = week.iter().map(|p| p.day_label.as_str()).collect();
        assert_eq!(labels, vec!["Thu", "Fri", "Sat", "Sun", "Mon", "Tue", "Wed"]);
        assert_eq!(week[1].income, d("100"));
        assert_eq!(week[6].expenses, d("42.5"));
        let total: Decimal = week.iter().map(|p| p.expenses).sum();
        assert_eq!(total, d("42.5"));
    }

    #[test]
    fn weekly_series_crosses_month_and_year_boundaries() {
        let today = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        let txs = vec![tx("1", TransactionType::Expense, "8", "Food", "2024-12-28")];
        let week = compute_weekly_series(&txs, today);
        assert_eq!(week[0].date, NaiveDate::from_ymd_opt(2024, 12, 27).unwrap());
        assert_eq!(week[1].expenses, d("8"));
    }

    #[test]
    fn weekly_series_is_total_at_calendar_edges() {
        let week = compute_weekly_series(&[], NaiveDate::MIN);
        assert_eq!(week.len(), WEEK_DAYS);
        assert_eq!(week[0].date, NaiveDate::MIN);
        assert!(week.iter().any(|p| p.date == NaiveDate::MIN));
        assert!(week.windows(2).all(|w| w[0].date < w[1].date));

        let week = compute_weekly_series(&[], NaiveDate::MAX);
        assert_eq!(week.len(), WEEK_DAYS);
        assert_eq!(week[6].date, NaiveDate::MAX);
    }

    #[test]
    fn filter_by_type_and_range_sorted_newest_first() {
        let txs = vec![
            tx("1", TransactionType::Expense, "1", "Food", "2024-01-01"),
            tx("2", TransactionType::Expense, "2", "Rent", "2024-01-15"),
            tx("3", TransactionType::Income, "3", "Salary", "2024-01-20"),
            tx("4", TransactionType::Expense, "4", "Food", "2024-02-01"),
        ];
        let filter = TransactionFilter {
            r#type: Some(TransactionType::Expense),
            date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
            date_to: NaiveDate::from_ymd_opt(2024, 1, 31),
            ..Default::default()
        };
        let ids: Vec<_> = filter_transactions(&txs, &filter)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn recent_prefers_later_entries_on_same_date() {
        let txs = vec![
            tx("1", TransactionType::Expense, "1", "Food", "2024-01-01"),
            tx("2", TransactionType::Expense, "1", "Food", "2024-01-05"),
            tx("3", TransactionType::Expense, "1", "Food", "2024-01-05"),
            tx("4", TransactionType::Expense, "1", "Food", "2023-12-31"),
        ];
        let ids: Vec<_> = recent_transactions(&txs, 3)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec!["3", "2", "1"]);
    }
}
