// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use expense_tracker::commands::{doctor, reports};
use expense_tracker::models::{Category, Transaction, TransactionType};
use expense_tracker::{cli, db, store};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde_json::json;

fn tx(id: &str, t: TransactionType, amount: &str, category: &str, date: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        amount: amount.parse().unwrap(),
        category: category.to_string(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        r#type: t,
        note: None,
    }
}

fn setup() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    store::save_transactions(
        &conn,
        &[
            tx("1", TransactionType::Income, "100", "Salary", "2024-01-05"),
            tx("2", TransactionType::Expense, "40", "Food", "2024-01-10"),
            tx("3", TransactionType::Expense, "25", "Food", "2024-02-01"),
        ],
    )
    .unwrap();
    conn
}

#[test]
fn summary_serializes_camel_case() {
    let conn = setup();
    let s = reports::summary_data(&conn);
    assert_eq!(s.balance, Decimal::from(35));
    let v = serde_json::to_value(s).unwrap();
    assert_eq!(v["totalIncome"], json!("100"));
    assert_eq!(v["totalExpenses"], json!("65"));
    assert_eq!(v["balance"], json!("35"));
}

#[test]
fn breakdown_and_monthly_from_store() {
    let conn = setup();
    let b = reports::breakdown_data(&conn);
    assert_eq!(b.len(), 1);
    assert_eq!(b[0].name, "Food");
    assert_eq!(b[0].value, Decimal::from(65));

    let m = reports::monthly_data(&conn);
    let flat: Vec<_> = m
        .iter()
        .map(|p| (p.month.as_str(), p.income, p.expenses))
        .collect();
    assert_eq!(
        flat,
        vec![
            ("2024-01", Decimal::from(100), Decimal::from(40)),
            ("2024-02", Decimal::ZERO, Decimal::from(25)),
        ]
    );
}

#[test]
fn weekly_uses_today_flag() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "expense-tracker",
        "report",
        "weekly",
        "--today",
        "2024-01-10",
    ]);
    let Some(("report", report_m)) = matches.subcommand() else {
        panic!("no report subcommand");
    };
    let Some(("weekly", weekly_m)) = report_m.subcommand() else {
        panic!("no weekly subcommand");
    };
    let today = reports::today_from(weekly_m).unwrap();
    assert_eq!(today, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());

    let week = reports::weekly_data(&conn, today);
    assert_eq!(week.len(), 7);
    assert_eq!(week[6].day_label, "Wed");
    assert_eq!(week[6].expenses, Decimal::from(40));
    assert_eq!(week[1].income, Decimal::from(100));

    let v = serde_json::to_value(&week[6]).unwrap();
    assert_eq!(v["dayLabel"], json!("Wed"));
    assert_eq!(v["date"], json!("2024-01-10"));

    reports::handle(&conn, report_m).unwrap();
}

#[test]
fn recent_honours_limit_newest_first() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "expense-tracker",
        "report",
        "recent",
        "--limit",
        "2",
    ]);
    let Some(("report", report_m)) = matches.subcommand() else {
        panic!("no report subcommand");
    };
    let Some(("recent", recent_m)) = report_m.subcommand() else {
        panic!("no recent subcommand");
    };
    let limit = *recent_m.get_one::<usize>("limit").unwrap();
    let ids: Vec<_> = reports::recent_data(&conn, limit)
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec!["3", "2"]);
    assert_eq!(reports::recent_data(&conn, 10).len(), 3);

    reports::handle(&conn, report_m).unwrap();
}

#[test]
fn empty_store_reports_are_zero() {
    let conn = Connection::open_in_memory().unwrap();
    db::init_schema(&conn).unwrap();
    let s = reports::summary_data(&conn);
    assert!(s.total_income.is_zero() && s.total_expenses.is_zero() && s.balance.is_zero());
    assert!(reports::breakdown_data(&conn).is_empty());
    assert!(reports::monthly_data(&conn).is_empty());
    let week = reports::weekly_data(&conn, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    assert_eq!(week.len(), 7);
    assert!(week.iter().all(|p| p.income.is_zero() && p.expenses.is_zero()));
}

#[test]
fn doctor_flags_orphans_and_duplicate_ids() {
    let cats = vec![Category {
        id: "1".into(),
        name: "Food".into(),
        r#type: TransactionType::Expense,
    }];
    let txs = vec![
        tx("1", TransactionType::Expense, "1", "Food", "2024-01-01"),
        tx("1", TransactionType::Expense, "1", "Gym", "2024-01-02"),
        tx("2", TransactionType::Expense, "1", "Gym", "2024-01-03"),
        tx("3", TransactionType::Income, "1", "Food", "2024-01-04"),
    ];
    let rows = doctor::check(&txs, &cats);
    assert_eq!(
        rows,
        vec![
            vec!["orphan_category".to_string(), "Gym (expense)".to_string()],
            vec!["orphan_category".to_string(), "Food (income)".to_string()],
            vec!["duplicate_id".to_string(), "1 x2".to_string()],
        ]
    );
    assert!(doctor::check(&txs[..1], &cats).is_empty());
}
