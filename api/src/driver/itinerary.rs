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

//! Operations on itineraries.

use crate::db;
use crate::driver::{Driver, with_record_name};
use crate::model::*;
use kennywood_core::driver::DriverResult;
use time::OffsetDateTime;

impl Driver {
    /// Creates a new itinerary that starts at `starttime`.
    pub(crate) async fn create_itinerary(
        self,
        starttime: OffsetDateTime,
    ) -> DriverResult<Itinerary> {
        let itinerary = db::create_itinerary(&mut self.db.ex().await?, starttime).await?;
        Ok(itinerary)
    }

    /// Gets the itinerary identified by `id`.
    pub(crate) async fn get_itinerary(self, id: ItineraryId) -> DriverResult<Itinerary> {
        db::get_itinerary(&mut self.db.ex().await?, id)
            .await
            .map_err(|e| with_record_name(e, "Itinerary", id))
    }

    /// Moves the start of the itinerary identified by `id` to `starttime`.
    pub(crate) async fn update_itinerary_starttime(
        self,
        id: ItineraryId,
        starttime: OffsetDateTime,
    ) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        let itinerary = db::get_itinerary(tx.ex(), id)
            .await
            .map_err(|e| with_record_name(e, "Itinerary", id))?
            .with_starttime(starttime);
        db::update_itinerary(tx.ex(), &itinerary).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Deletes the itinerary identified by `id`.
    pub(crate) async fn delete_itinerary(self, id: ItineraryId) -> DriverResult<()> {
        db::delete_itinerary(&mut self.db.ex().await?, id)
            .await
            .map_err(|e| with_record_name(e, "Itinerary", id))
    }

    /// Gets all itineraries.
    pub(crate) async fn list_itineraries(self) -> DriverResult<Vec<Itinerary>> {
        let itineraries = db::list_itineraries(&mut self.db.ex().await?).await?;
        Ok(itineraries)
    }
}
