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

//! API to register a new customer.

use crate::driver::Driver;
use crate::rest::codecs::{CustomerResponse, IntegerField};
use axum::Json;
use axum::extract::State;
use kennywood_core::rest::{JsonObject, RestResult};

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    request: JsonObject,
) -> RestResult<Json<CustomerResponse>> {
    let IntegerField(family_members) = request.get_required("family_members")?;

    let customer = driver.create_customer(family_members).await?;
    Ok(Json(CustomerResponse::new(&customer)))
}
