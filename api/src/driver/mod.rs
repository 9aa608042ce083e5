// Kennywood
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Business logic for the service.

use kennywood_core::db::{Db, DbError};
use kennywood_core::driver::DriverError;
use kennywood_core::rest::BaseUrls;
use std::fmt;
use std::sync::Arc;

mod attraction;
mod customer;
mod itinerary;
#[cfg(test)]
mod testutils;

/// Converts `e` into a `DriverError`, naming the missing record if `e` is a not found error.
///
/// `what` is the human-readable name of the record type and `id` its identifier.
fn with_record_name<I: fmt::Display>(e: DbError, what: &str, id: I) -> DriverError {
    match e {
        DbError::NotFound => DriverError::NotFound(format!("{} {} does not exist", what, id)),
        e => DriverError::from(e),
    }
}

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they start and commit a
/// transaction, so it's incorrect for the caller to use two separate calls.  For this reason,
/// these operations consume the driver in an attempt to minimize the possibility of executing
/// two operations.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,

    /// Base URLs of the service, used to build links to the records.
    base_urls: Arc<BaseUrls>,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: Arc<dyn Db + Send + Sync>, base_urls: Arc<BaseUrls>) -> Self {
        Self { db, base_urls }
    }

    /// Returns the base URLs of the service.
    ///
    /// Callers should grab these before invoking any operation because operations consume the
    /// driver.
    pub(crate) fn base_urls(&self) -> Arc<BaseUrls> {
        self.base_urls.clone()
    }
}
