// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Whole-collection snapshots kept in the `kv` table.
//!
//! Two records live here, `transactions` and `categories`, each a JSON array.
//! Every mutation loads the current snapshot, edits it in memory and writes
//! the full array back in one statement. Reads never fail: a missing or
//! unreadable record falls back to an empty list (transactions) or the
//! built-in defaults (categories).

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::LedgerError;
use crate::models::{
    Category, NewTransaction, Transaction, TransactionPatch, TransactionType, default_categories,
};

pub const TRANSACTIONS_KEY: &str = "transactions";
pub const CATEGORIES_KEY: &str = "categories";
/// Highest id ever issued, so deleted ids are not handed out again.
pub const ID_SEQ_KEY: &str = "id_seq";

pub fn get_raw(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM kv WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn put_raw(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO kv(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
        params![key, value],
    )
    .with_context(|| format!("Failed to write '{}'", key))?;
    Ok(())
}

fn load_or<T: DeserializeOwned>(conn: &Connection, key: &str, fallback: fn() -> T) -> T {
    let raw = match get_raw(conn, key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return fallback(),
        Err(err) => {
            tracing::warn!("Error reading {}: {:#}", key, err);
            return fallback();
        }
    };
    match serde_json::from_str::<T>(&raw) {
        Ok(v) => v,
        Err(err) => {
            tracing::warn!("Error parsing {}: {}", key, err);
            fallback()
        }
    }
}

fn save<T: Serialize>(conn: &Connection, key: &str, v: &T) -> Result<()> {
    let json = serde_json::to_string(v).with_context(|| format!("Serialize {}", key))?;
    put_raw(conn, key, &json)
}

pub fn load_transactions(conn: &Connection) -> Vec<Transaction> {
    load_or(conn, TRANSACTIONS_KEY, Vec::new)
}

pub fn save_transactions(conn: &Connection, transactions: &[Transaction]) -> Result<()> {
    save(conn, TRANSACTIONS_KEY, &transactions)
}

pub fn load_categories(conn: &Connection) -> Vec<Category> {
    load_or(conn, CATEGORIES_KEY, default_categories)
}

pub fn save_categories(conn: &Connection, categories: &[Category]) -> Result<()> {
    save(conn, CATEGORIES_KEY, &categories)
}

/// Write the default categories if the store has never held any.
pub fn seed_defaults(conn: &Connection) -> Result<bool> {
    if get_raw(conn, CATEGORIES_KEY)?.is_some() {
        return Ok(false);
    }
    save_categories(conn, &default_categories())?;
    tracing::info!("seeded default categories");
    Ok(true)
}

/// Millisecond timestamp id, bumped past every numeric id already in use.
pub fn next_id<'a>(
    existing: impl IntoIterator<Item = &'a str>,
    now: DateTime<Utc>,
) -> Result<String, LedgerError> {
    let floor = match existing
        .into_iter()
        .filter_map(|id| id.parse::<i64>().ok())
        .max()
    {
        Some(max) => max.checked_add(1).ok_or(LedgerError::IdsExhausted)?,
        None => i64::MIN,
    };
    Ok(now.timestamp_millis().max(floor).to_string())
}

/// Issue an id above both `existing` and the stored high-water mark.
pub fn issue_id<'a>(
    conn: &Connection,
    existing: impl IntoIterator<Item = &'a str>,
    now: DateTime<Utc>,
) -> Result<String> {
    let last = get_raw(conn, ID_SEQ_KEY)?;
    let mut ids: Vec<&str> = existing.into_iter().collect();
    if let Some(ref last) = last {
        ids.push(last.as_str());
    }
    let id = next_id(ids, now)?;
    put_raw(conn, ID_SEQ_KEY, &id)?;
    Ok(id)
}

pub fn add_transaction(
    conn: &Connection,
    new: NewTransaction,
    now: DateTime<Utc>,
) -> Result<Transaction> {
    new.validate()?;
    let mut transactions = load_transactions(conn);
    let id = issue_id(conn, transactions.iter().map(|t| t.id.as_str()), now)?;
    let tx = new.into_transaction(id);
    transactions.push(tx.clone());
    save_transactions(conn, &transactions)?;
    tracing::info!(id = %tx.id, "added {} of {}", tx.r#type, tx.amount);
    Ok(tx)
}

pub fn update_transaction(
    conn: &Connection,
    id: &str,
    patch: &TransactionPatch,
) -> Result<Transaction> {
    if patch.is_empty() {
        return Err(LedgerError::EmptyPatch(id.to_string()).into());
    }
    let mut transactions = load_transactions(conn);
    let slot = transactions
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| LedgerError::TransactionNotFound(id.to_string()))?;
    let updated = patch.apply(slot);
    NewTransaction {
        amount: updated.amount,
        category: updated.category.clone(),
        date: updated.date,
        r#type: updated.r#type,
        note: updated.note.clone(),
    }
    .validate()?;
    *slot = updated.clone();
    save_transactions(conn, &transactions)?;
    tracing::info!(id, "updated transaction");
    Ok(updated)
}

pub fn delete_transaction(conn: &Connection, id: &str) -> Result<Transaction> {
    let mut transactions = load_transactions(conn);
    let pos = transactions
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| LedgerError::TransactionNotFound(id.to_string()))?;
    let removed = transactions.remove(pos);
    save_transactions(conn, &transactions)?;
    tracing::info!(id, "deleted transaction");
    Ok(removed)
}

pub fn add_category(
    conn: &Connection,
    name: &str,
    r#type: TransactionType,
    now: DateTime<Utc>,
) -> Result<Category> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::EmptyCategory.into());
    }
    let mut categories = load_categories(conn);
    if categories
        .iter()
        .any(|c| c.r#type == r#type && c.name.eq_ignore_ascii_case(name))
    {
        return Err(LedgerError::DuplicateCategory(name.to_string()).into());
    }
    let category = Category {
        id: issue_id(conn, categories.iter().map(|c| c.id.as_str()), now)?,
        name: name.to_string(),
        r#type,
    };
    categories.push(category.clone());
    save_categories(conn, &categories)?;
    tracing::info!(id = %category.id, "added {} category '{}'", r#type, category.name);
    Ok(category)
}

/// Remove a user category. Transactions keep their category text.
pub fn delete_category(conn: &Connection, id: &str) -> Result<Category> {
    let mut categories = load_categories(conn);
    let pos = categories
        .iter()
        .position(|c| c.id == id)
        .ok_or_else(|| LedgerError::CategoryNotFound(id.to_string()))?;
    if categories[pos].is_protected() {
        return Err(LedgerError::ProtectedCategory(id.to_string()).into());
    }
    let removed = categories.remove(pos);
    save_categories(conn, &categories)?;
    tracing::info!(id, "deleted category '{}'", removed.name);
    Ok(removed)
}
