// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::analytics::filter_transactions;
use crate::models::{NewTransaction, Transaction, TransactionFilter, TransactionPatch};
use crate::store;
use crate::utils::{fmt_amount, maybe_print_json, parse_date, parse_decimal, parse_type, pretty_table};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => rm(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn opt_trimmed<'a>(sub: &'a clap::ArgMatches, name: &str) -> Option<&'a str> {
    sub.get_one::<String>(name).map(|s| s.trim())
}

fn required<'a>(sub: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    opt_trimmed(sub, name).with_context(|| format!("--{} is required", name))
}

pub fn new_transaction_from(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let new = NewTransaction {
        date: parse_date(required(sub, "date")?)?,
        amount: parse_decimal(required(sub, "amount")?)?,
        category: required(sub, "category")?.to_string(),
        r#type: parse_type(required(sub, "type")?)?,
        note: opt_trimmed(sub, "note")
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string()),
    };
    new.validate()?;
    Ok(new)
}

pub fn patch_from(sub: &clap::ArgMatches) -> Result<TransactionPatch> {
    Ok(TransactionPatch {
        amount: opt_trimmed(sub, "amount").map(parse_decimal).transpose()?,
        category: opt_trimmed(sub, "category").map(|s| s.to_string()),
        date: opt_trimmed(sub, "date").map(parse_date).transpose()?,
        r#type: opt_trimmed(sub, "type").map(parse_type).transpose()?,
        note: opt_trimmed(sub, "note").map(|s| s.to_string()),
    })
}

pub fn filter_from(sub: &clap::ArgMatches) -> Result<TransactionFilter> {
    Ok(TransactionFilter {
        category: opt_trimmed(sub, "category")
            .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("all"))
            .map(|s| s.to_string()),
        r#type: opt_trimmed(sub, "type")
            .filter(|s| !s.eq_ignore_ascii_case("all"))
            .map(parse_type)
            .transpose()?,
        date_from: opt_trimmed(sub, "from").map(parse_date).transpose()?,
        date_to: opt_trimmed(sub, "to").map(parse_date).transpose()?,
    })
}

pub fn empty_list_message(filter: &TransactionFilter) -> &'static str {
    if filter.is_active() {
        "No transactions found. Try adjusting your filters"
    } else {
        "No transactions found. Add your first transaction to get started"
    }
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let new = new_transaction_from(sub)?;
    let tx = store::add_transaction(conn, new, Utc::now())?;
    println!(
        "Recorded {} {} on {} in '{}' (id: {})",
        tx.r#type,
        fmt_amount(&tx.amount),
        tx.date,
        tx.category,
        tx.id
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let patch = patch_from(sub)?;
    let tx = store::update_transaction(conn, id, &patch)?;
    println!(
        "Updated {}: {} {} on {} in '{}'",
        tx.id,
        tx.r#type,
        fmt_amount(&tx.amount),
        tx.date,
        tx.category
    );
    Ok(())
}

fn rm(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let id = required(sub, "id")?;
    let tx = store::delete_transaction(conn, id)?;
    println!("Removed transaction {} ({} on {})", tx.id, fmt_amount(&tx.amount), tx.date);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("{}", empty_list_message(&filter_from(sub)?));
            return Ok(());
        }
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.clone(),
                    t.date.to_string(),
                    t.r#type.to_string(),
                    t.category.clone(),
                    fmt_amount(&t.amount),
                    t.note.clone().unwrap_or_default(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Type", "Category", "Amount", "Note"], rows)
        );
    }
    Ok(())
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let filter = filter_from(sub)?;
    let transactions = store::load_transactions(conn);
    let mut data = filter_transactions(&transactions, &filter);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    tracing::debug!(
        matched = data.len(),
        total = transactions.len(),
        "listed transactions"
    );
    Ok(data)
}
