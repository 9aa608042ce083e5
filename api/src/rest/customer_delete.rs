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

//! API to delete a customer.

use crate::driver::Driver;
use crate::model::CustomerId;
use crate::rest::destroy_error;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kennywood_core::rest::{EmptyBody, RestResult};

/// DELETE handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(id): Path<CustomerId>,
    _: EmptyBody,
) -> RestResult<StatusCode> {
    driver.delete_customer(id).await.map_err(destroy_error)?;
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

    fn route(id: CustomerId) -> (http::Method, String) {
        (http::Method::DELETE, format!("/customers/{}", id))
    }

    #[tokio::test]
    async fn test_ok() {
        let context = TestContext::setup().await;

        let customer1 = context.create_customer(1).await;
        let customer2 = context.create_customer(2).await;
        let itinerary = context
            .create_itinerary(datetime!(2023-08-01 12:30:00 UTC), None, Some(*customer1.id()))
            .await;

        OneShotBuilder::new(context.app(), route(*customer1.id()))
            .send_empty()
            .await
            .expect_status(StatusCode::NO_CONTENT)
            .expect_empty()
            .await;

        assert_eq!(None, context.get_customer(*customer1.id()).await);
        assert_eq!(Some(customer2.clone()), context.get_customer(*customer2.id()).await);
        assert_eq!(None, context.get_itinerary(*itinerary.id()).await);
    }

    #[tokio::test]
    async fn test_not_found() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route(CustomerId::from(1)))
            .send_empty()
            .await
            .expect_status(StatusCode::NOT_FOUND)
            .expect_error("Customer 1 does not exist")
            .await;
    }

    test_payload_must_be_empty!(
        TestContext::setup().await.into_app(),
        route(CustomerId::from(1))
    );
}
