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

//! Test utilities for the REST API.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use crate::rest::app;
use axum::Router;
use kennywood_core::db::{Db, DbError, Executor, sqlite};
use kennywood_core::rest::BaseUrls;
use std::sync::Arc;
use time::OffsetDateTime;

/// Base URL of the backend as configured for all tests.
pub(crate) const BACKEND_BASE_URL: &str = "http://localhost:8000/";

/// State of a running test.
pub(crate) struct TestContext {
    app: Router,
    db: Arc<dyn Db + Send + Sync>,
}

impl TestContext {
    /// Initializes an app backed by an in-memory database with an empty schema.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> = Arc::new(sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let base_urls = Arc::from(BaseUrls::from_strs(BACKEND_BASE_URL));
        let driver = Driver::new(db.clone(), base_urls);
        let app = app(driver);
        Self { app, db }
    }

    /// Consumes the context and transforms it into the app router.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }

    /// Gets a clone of the app router.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Creates an attraction named `name` by directly modifying the backing database.
    pub(crate) async fn create_attraction(&self, name: &str) -> Attraction {
        db::create_attraction(&mut self.ex().await, name).await.unwrap()
    }

    /// Creates an attraction named `name` that lives in a new area by directly modifying the
    /// backing database.
    pub(crate) async fn create_attraction_in_area(
        &self,
        name: &str,
        area_name: &str,
        area_theme: &str,
    ) -> Attraction {
        let mut ex = self.ex().await;
        let area = db::create_park_area(&mut ex, area_name, area_theme).await.unwrap();
        let attraction = db::create_attraction(&mut ex, name).await.unwrap();
        let attraction = Attraction::new(*attraction.id(), attraction.name().clone(), Some(area));
        db::update_attraction(&mut ex, &attraction).await.unwrap();
        attraction
    }

    /// Creates a customer with `family_members` by directly modifying the backing database.
    pub(crate) async fn create_customer(&self, family_members: i32) -> Customer {
        db::create_customer(&mut self.ex().await, family_members).await.unwrap()
    }

    /// Creates an itinerary that starts at `starttime` and that is linked to the given
    /// `attraction` and `customer` by directly modifying the backing database.
    pub(crate) async fn create_itinerary(
        &self,
        starttime: OffsetDateTime,
        attraction: Option<Attraction>,
        customer_id: Option<CustomerId>,
    ) -> Itinerary {
        let mut ex = self.ex().await;
        let itinerary = db::create_itinerary(&mut ex, starttime).await.unwrap();
        if attraction.is_none() && customer_id.is_none() {
            return itinerary;
        }
        let itinerary =
            Itinerary::new(*itinerary.id(), *itinerary.starttime(), attraction, customer_id);
        db::update_itinerary(&mut ex, &itinerary).await.unwrap();
        itinerary
    }

    /// Gets the attraction `id` by directly querying the backing database.
    pub(crate) async fn get_attraction(&self, id: AttractionId) -> Option<Attraction> {
        match db::get_attraction(&mut self.ex().await, id).await {
            Ok(attraction) => Some(attraction),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("{:?}", e),
        }
    }

    /// Gets the customer `id` by directly querying the backing database.
    pub(crate) async fn get_customer(&self, id: CustomerId) -> Option<Customer> {
        match db::get_customer(&mut self.ex().await, id).await {
            Ok(customer) => Some(customer),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("{:?}", e),
        }
    }

    /// Gets the itinerary `id` by directly querying the backing database.
    pub(crate) async fn get_itinerary(&self, id: ItineraryId) -> Option<Itinerary> {
        match db::get_itinerary(&mut self.ex().await, id).await {
            Ok(itinerary) => Some(itinerary),
            Err(DbError::NotFound) => None,
            Err(e) => panic!("{:?}", e),
        }
    }

    /// Gets all attractions by directly querying the backing database.
    pub(crate) async fn list_attractions(&self) -> Vec<Attraction> {
        db::list_attractions(&mut self.ex().await).await.unwrap()
    }

    /// Gets all customers by directly querying the backing database.
    pub(crate) async fn list_customers(&self) -> Vec<Customer> {
        db::list_customers(&mut self.ex().await).await.unwrap()
    }

    /// Gets all itineraries by directly querying the backing database.
    pub(crate) async fn list_itineraries(&self) -> Vec<Itinerary> {
        db::list_itineraries(&mut self.ex().await).await.unwrap()
    }

    /// Returns the base URLs used by the app.
    pub(crate) fn base_urls(&self) -> BaseUrls {
        BaseUrls::from_strs(BACKEND_BASE_URL)
    }
}
