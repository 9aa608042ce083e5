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

//! API to update a customer.

use crate::driver::Driver;
use crate::model::CustomerId;
use crate::rest::codecs::IntegerField;
use crate::rest::update_error;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kennywood_core::rest::{JsonObject, RestResult};

/// PUT handler for this API.  The `family` key carries the new size of the customer's party.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<CustomerId>,
    request: JsonObject,
) -> RestResult<StatusCode> {
    let IntegerField(family_members) = request.get_required("family")?;

    driver.update_customer_family_members(id, family_members).await.map_err(update_error)?;
    Ok(StatusCode::NO_CONTENT)
}
