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

//! API to get the details of a customer.

use crate::driver::Driver;
use crate::model::CustomerId;
use crate::rest::codecs::CustomerResponse;
use crate::rest::retrieve_error;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kennywood_core::rest::EmptyBody;

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<CustomerId>,
    _: EmptyBody,
) -> Result<Json<CustomerResponse>, (StatusCode, String)> {
    let customer = driver.get_customer(id).await.map_err(retrieve_error)?;
    Ok(Json(CustomerResponse::new(&customer)))
}
