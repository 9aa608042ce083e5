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

//! Entry point to the REST server.
//!
//! Every resource offers the same five APIs, but they do not all report failures in the same way:
//! retrieving a record reports any failure as a plain-text internal error, updating a record
//! reports any failure as an internal error, and only deleting a record tells apart missing
//! records from other failures.  The helpers in this module encode these policies so that the
//! handlers stay explicit about which one they follow.

use crate::driver::Driver;
use axum::Router;
use axum::http::StatusCode;
use kennywood_core::driver::DriverError;
use kennywood_core::rest::RestError;
use log::warn;
use tower_http::cors::CorsLayer;

mod attraction_delete;
mod attraction_get;
mod attraction_put;
mod attractions_get;
mod attractions_post;
mod codecs;
mod customer_delete;
mod customer_get;
mod customer_put;
mod customers_get;
mod customers_post;
mod itineraries_get;
mod itineraries_post;
mod itinerary_delete;
mod itinerary_get;
mod itinerary_put;
#[cfg(test)]
mod testutils;

/// Renders a failure to retrieve a record as a plain-text internal error with the raw message.
fn retrieve_error(e: DriverError) -> (StatusCode, String) {
    warn!("Failed to retrieve record: {}", e);
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}

/// Renders a failure to update a record, which is always an internal error.
fn update_error(e: DriverError) -> RestError {
    RestError::InternalError(e.to_string())
}

/// Renders a failure to delete a record, telling apart missing records from other failures.
fn destroy_error(e: DriverError) -> RestError {
    match e {
        DriverError::NotFound(message) => RestError::NotFound(message),
        e @ (DriverError::BackendError(_) | DriverError::InvalidInput(_)) => {
            RestError::InternalError(e.to_string())
        }
    }
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::get;
    Router::new()
        .route("/attractions", get(attractions_get::handler).post(attractions_post::handler))
        .route(
            "/attractions/:id",
            get(attraction_get::handler)
                .put(attraction_put::handler)
                .delete(attraction_delete::handler),
        )
        .route("/customers", get(customers_get::handler).post(customers_post::handler))
        .route(
            "/customers/:id",
            get(customer_get::handler).put(customer_put::handler).delete(customer_delete::handler),
        )
        .route("/itineraries", get(itineraries_get::handler).post(itineraries_post::handler))
        .route(
            "/itineraries/:id",
            get(itinerary_get::handler)
                .put(itinerary_put::handler)
                .delete(itinerary_delete::handler),
        )
        .layer(CorsLayer::permissive())
        .with_state(driver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destroy_error() {
        assert_eq!(
            RestError::NotFound("Customer 1 does not exist".to_owned()),
            destroy_error(DriverError::NotFound("Customer 1 does not exist".to_owned()))
        );
        assert_eq!(
            RestError::InternalError("Database error: boom".to_owned()),
            destroy_error(DriverError::BackendError("Database error: boom".to_owned()))
        );
        assert_eq!(
            RestError::InternalError("Already exists".to_owned()),
            destroy_error(DriverError::InvalidInput("Already exists".to_owned()))
        );
    }

    #[test]
    fn test_update_error_hides_not_found() {
        assert_eq!(
            RestError::InternalError("Itinerary 2 does not exist".to_owned()),
            update_error(DriverError::NotFound("Itinerary 2 does not exist".to_owned()))
        );
    }

    #[test]
    fn test_retrieve_error_is_raw_text() {
        let (status, body) =
            retrieve_error(DriverError::NotFound("Attraction 9 does not exist".to_owned()));
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status);
        assert_eq!("Attraction 9 does not exist", body);
    }
}
