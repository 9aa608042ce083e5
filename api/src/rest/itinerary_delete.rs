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

//! API to cancel an itinerary.

use crate::driver::Driver;
use crate::model::ItineraryId;
use crate::rest::destroy_error;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kennywood_core::rest::{EmptyBody, RestResult};

/// DELETE handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<ItineraryId>,
    _: EmptyBody,
) -> RestResult<StatusCode> {
    driver.delete_itinerary(id).await.map_err(destroy_error)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;
    use kennywood_core::rest::testutils::OneShotBuilder;
    use kennywood_core::test_payload_must_be_empty;
    use time::macros::datetime;

    fn route(id: ItineraryId) -> (http::Method, String) {
        (http::Method::DELETE, format!("/itineraries/{}", id))
    }

    #[tokio::test]
    async fn test_ok_keeps_references() {
        let context = TestContext::setup().await;

        let attraction = context.create_attraction("Jack Rabbit").await;
        let customer = context.create_customer(4).await;
        let itinerary = context
            .create_itinerary(
                datetime!(2023-06-10 13:00:00 UTC),
                Some(attraction.clone()),
                Some(*customer.id()),
            )
            .await;

        OneShotBuilder::new(context.app(), route(*itinerary.id()))
            .send_empty()
            .await
            .expect_status(StatusCode::NO_CONTENT)
            .expect_empty()
            .await;

        assert_eq!(None, context.get_itinerary(*itinerary.id()).await);
        assert_eq!(Some(attraction.clone()), context.get_attraction(*attraction.id()).await);
        assert_eq!(Some(customer.clone()), context.get_customer(*customer.id()).await);
    }

    #[tokio::test]
    async fn test_twice() {
        let context = TestContext::setup().await;

        let itinerary =

            context.create_itinerary(datetime!(2023-06-10 13:00:00 UTC), None, None).await;

        OneShotBuilder::new(context.app(), route(*itinerary.id()))
            .send_empty()
            .await
            .expect_status(StatusCode::NO_CONTENT)
            .expect_empty()
            .await;

        OneShotBuilder::new(context.app(), route(*itinerary.id()))
            .send_empty()
            .await
            .expect_status(StatusCode::NOT_FOUND)
            .expect_error("does not exist")
            .await;
    }

    test_payload_must_be_empty!(
        TestContext::setup().await.into_app(),
        route(ItineraryId::from(1))
    );
}
