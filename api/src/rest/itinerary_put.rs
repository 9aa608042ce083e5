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

//! API to reschedule an itinerary.

use crate::driver::Driver;
use crate::model::ItineraryId;
use crate::rest::codecs::TimestampField;
use crate::rest::update_error;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kennywood_core::rest::{JsonObject, RestResult};

/// PUT handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<ItineraryId>,
    request: JsonObject,
) -> RestResult<StatusCode> {
    let TimestampField(starttime) = request.get_required("starttime")?;

    driver.update_itinerary_starttime(id, starttime).await.map_err(update_error)?;
    Ok(StatusCode::NO_CONTENT)
}
