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

//! API to update an attraction.

use crate::driver::Driver;
use crate::model::AttractionId;
use crate::rest::update_error;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kennywood_core::rest::{JsonObject, RestResult};
use serde_json::Value;

/// PUT handler for this API.
///
/// Clients must send a `family` key.  Attractions have no field to hold it so the value is
/// accepted as is and discarded: the attraction is stored back unchanged.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<AttractionId>,
    request: JsonObject,
) -> RestResult<StatusCode> {
    let _family: Value = request.get_required("family")?;

    driver.update_attraction(id).await.map_err(update_error)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;
    use kennywood_core::rest::testutils::OneShotBuilder;
    use kennywood_core::test_payload_must_be_json;
    use serde_json::json;

    fn route(id: AttractionId) -> (http::Method, String) {
        (http::Method::PUT, format!("/attractions/{}", id))
    }

    #[tokio::test]
    async fn test_ok_writes_nothing() {
        let context = TestContext::setup().await;

        let attraction =
            context.create_attraction_in_area("Exterminator", "Lost Kennywood", "Retro").await;

        OneShotBuilder::new(context.app(), route(*attraction.id()))
            .send_json(json!({"family": 4, "name": "Renamed"}))
            .await
            .expect_status(StatusCode::NO_CONTENT)
            .expect_empty()
            .await;

        assert_eq!(Some(attraction.clone()), context.get_attraction(*attraction.id()).await);
    }

    #[tokio::test]
    async fn test_family_of_any_type() {
        let context = TestContext::setup().await;

        let attraction = context.create_attraction("Pitt Fall").await;

        OneShotBuilder::new(context.app(), route(*attraction.id()))
            .send_json(json!({"family": "not a number"}))
            .await
            .expect_status(StatusCode::NO_CONTENT)
            .expect_empty()
            .await;
    }

    #[tokio::test]
    async fn test_missing_family() {
        let context = TestContext::setup().await;

        let attraction = context.create_attraction("Pitt Fall").await;

        OneShotBuilder::new(context.app(), route(*attraction.id()))
            .send_json(json!({"name": "Other"}))
            .await
            .expect_status(StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("Missing key 'family'")
            .await;
    }

    #[tokio::test]
    async fn test_not_found_is_internal_error() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route(AttractionId::from(8)))
            .send_json(json!({"family": 2}))
            .await
            .expect_status(StatusCode::INTERNAL_SERVER_ERROR)
            .expect_error("Attraction 8 does not exist")
            .await;
    }

    test_payload_must_be_json!(
        TestContext::setup().await.into_app(),
        route(AttractionId::from(1))
    );
}
