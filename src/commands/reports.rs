// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::{
    compute_category_breakdown, compute_monthly_series, compute_summary, compute_weekly_series,
    recent_transactions,
};
use crate::models::{CategoryTotal, DailyPoint, MonthlyPoint, Summary, Transaction};
use crate::store;
use crate::utils::{fmt_amount, maybe_print_json, parse_date, pretty_table};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(conn, sub)?,
        Some(("breakdown", sub)) => breakdown(conn, sub)?,
        Some(("monthly", sub)) => monthly(conn, sub)?,
        Some(("recent", sub)) => recent(conn, sub)?,
        Some(("weekly", sub)) => weekly(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn summary_data(conn: &Connection) -> Summary {
    compute_summary(&store::load_transactions(conn))
}

pub fn breakdown_data(conn: &Connection) -> Vec<CategoryTotal> {
    compute_category_breakdown(&store::load_transactions(conn))
}

pub fn monthly_data(conn: &Connection) -> Vec<MonthlyPoint> {
    compute_monthly_series(&store::load_transactions(conn))
}

pub fn recent_data(conn: &Connection, limit: usize) -> Vec<Transaction> {
    recent_transactions(&store::load_transactions(conn), limit)
}

pub fn weekly_data(conn: &Connection, today: NaiveDate) -> Vec<DailyPoint> {
    compute_weekly_series(&store::load_transactions(conn), today)
}

/// `--today` if given, otherwise the local calendar date.
pub fn today_from(sub: &clap::ArgMatches) -> Result<NaiveDate> {
    match sub.get_one::<String>("today") {
        Some(s) => parse_date(s),
        None => Ok(Local::now().date_naive()),
    }
}

fn summary(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = summary_data(conn);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = vec![
            vec!["Income".to_string(), fmt_amount(&data.total_income)],
            vec!["Expenses".to_string(), fmt_amount(&data.total_expenses)],
            vec!["Balance".to_string(), fmt_amount(&data.balance)],
        ];
        println!("{}", pretty_table(&["", "Total"], rows));
    }
    Ok(())
}

fn breakdown(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = breakdown_data(conn);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|c| vec![c.name.clone(), fmt_amount(&c.value)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], rows));
    }
    Ok(())
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = monthly_data(conn);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|p| {
                vec![
                    p.month.clone(),
                    fmt_amount(&p.income),
                    fmt_amount(&p.expenses),
                    fmt_amount(&(p.income - p.expenses)),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expenses", "Net"], rows)
        );
    }
    Ok(())
}

fn recent(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(5);
    let data = recent_data(conn, limit);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.r#type.to_string(),
                    t.category.clone(),
                    fmt_amount(&t.amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Category", "Amount"], rows)
        );
    }
    Ok(())
}

fn weekly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let today = today_from(sub)?;
    let data = weekly_data(conn, today);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let rows = data
            .iter()
            .map(|p| {
                vec![
                    p.day_label.clone(),
                    p.date.to_string(),
                    fmt_amount(&p.income),
                    fmt_amount(&p.expenses),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Day", "Date", "Income", "Expenses"], rows)
        );
    }
    Ok(())
}
