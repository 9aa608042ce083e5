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

//! API to plan a new itinerary.

use crate::driver::Driver;
use crate::rest::codecs::{ItineraryResponse, TimestampField};
use axum::Json;
use axum::extract::State;
use kennywood_core::rest::{JsonObject, RestResult};

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    request: JsonObject,
) -> RestResult<Json<ItineraryResponse>> {
    let TimestampField(starttime) = request.get_required("starttime")?;

    let base_urls = driver.base_urls();
    let itinerary = driver.create_itinerary(starttime).await?;
    Ok(Json(ItineraryResponse::new(&itinerary, &base_urls)))
}
