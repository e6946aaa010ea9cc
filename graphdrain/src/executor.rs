// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Query executor capability consumed by the drain engine

use crate::error::Result;
use crate::query::Statement;
use crate::result::ResultSet;

/// Anything that can submit a statement and wait for its results
///
/// Calls are blocking and strictly sequential: the engine never has more than
/// one statement in flight. Timeouts, if any, belong to the implementation.
pub trait QueryExecutor {
    fn execute(&mut self, statement: &Statement) -> Result<ResultSet>;
}

impl<T: QueryExecutor + ?Sized> QueryExecutor for &mut T {
    fn execute(&mut self, statement: &Statement) -> Result<ResultSet> {
        (**self).execute(statement)
    }
}

impl<T: QueryExecutor + ?Sized> QueryExecutor for Box<T> {
    fn execute(&mut self, statement: &Statement) -> Result<ResultSet> {
        (**self).execute(statement)
    }
}
