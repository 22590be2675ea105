// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by ledger mutations and input parsing.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("Transaction '{0}' not found")]
    TransactionNotFound(String),

    #[error("Category '{0}' not found")]
    CategoryNotFound(String),

    /// Ids "1".."10" belong to the built-in categories.
    #[error("Category '{0}' is a default category and cannot be deleted")]
    ProtectedCategory(String),

    #[error("Category '{0}' already exists")]
    DuplicateCategory(String),

    #[error("Amount must not be negative, got {0}")]
    NegativeAmount(Decimal),

    #[error("Category name cannot be empty")]
    EmptyCategory,

    #[error("Invalid transaction type '{0}', expected income or expense")]
    InvalidType(String),

    /// A stored id already sits at `i64::MAX`.
    #[error("No numeric ids left to assign")]
    IdsExhausted,

    #[error("Nothing to update for transaction '{0}'")]
    EmptyPatch(String),
}
