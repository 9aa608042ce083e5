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

//! Operations on customers.

use crate::db;
use crate::driver::{Driver, with_record_name};
use crate::model::*;
use kennywood_core::driver::DriverResult;

impl Driver {
    /// Creates a new customer with a party of `family_members` people.
    pub(crate) async fn create_customer(self, family_members: i32) -> DriverResult<Customer> {
        let customer = db::create_customer(&mut self.db.ex().await?, family_members).await?;
        Ok(customer)
    }

    /// Gets the customer identified by `id`.
    pub(crate) async fn get_customer(self, id: CustomerId) -> DriverResult<Customer> {
        db::get_customer(&mut self.db.ex().await?, id)
            .await
            .map_err(|e| with_record_name(e, "Customer", id))
    }

    /// Sets the size of the party of the customer identified by `id` to `family_members`.
    pub(crate) async fn update_customer_family_members(
        self,
        id: CustomerId,
        family_members: i32,
    ) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        let customer = db::get_customer(tx.ex(), id)
            .await
            .map_err(|e| with_record_name(e, "Customer", id))?
            .with_family_members(family_members);
        db::update_customer(tx.ex(), &customer).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Deletes the customer identified by `id`.
    pub(crate) async fn delete_customer(self, id: CustomerId) -> DriverResult<()> {
        db::delete_customer(&mut self.db.ex().await?, id)
            .await
            .map_err(|e| with_record_name(e, "Customer", id))
    }

    /// Gets all customers.
    pub(crate) async fn list_customers(self) -> DriverResult<Vec<Customer>> {
        let customers = db::list_customers(&mut self.db.ex().await?).await?;
        Ok(customers)
    }
}
