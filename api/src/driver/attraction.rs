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

//! Operations on attractions.

use crate::db;
use crate::driver::{Driver, with_record_name};
use crate::model::*;
use kennywood_core::driver::DriverResult;

impl Driver {
    /// Creates a new attraction named `name`.
    pub(crate) async fn create_attraction(self, name: String) -> DriverResult<Attraction> {
        let attraction = db::create_attraction(&mut self.db.ex().await?, &name).await?;
        Ok(attraction)
    }

    /// Gets the attraction identified by `id`.
    pub(crate) async fn get_attraction(self, id: AttractionId) -> DriverResult<Attraction> {
        db::get_attraction(&mut self.db.ex().await?, id)
            .await
            .map_err(|e| with_record_name(e, "Attraction", id))
    }

    /// Saves the attraction identified by `id` again without changing any of its fields.
    ///
    /// Attractions do not have any field that clients can update, but the operation still fails
    /// if the attraction does not exist.
    pub(crate) async fn update_attraction(self, id: AttractionId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        let attraction = db::get_attraction(tx.ex(), id)
            .await
            .map_err(|e| with_record_name(e, "Attraction", id))?;
        db::update_attraction(tx.ex(), &attraction).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Deletes the attraction identified by `id`.
    pub(crate) async fn delete_attraction(self, id: AttractionId) -> DriverResult<()> {
        db::delete_attraction(&mut self.db.ex().await?, id)
            .await
            .map_err(|e| with_record_name(e, "Attraction", id))
    }

    /// Gets all attractions.
    pub(crate) async fn list_attractions(self) -> DriverResult<Vec<Attraction>> {
        let attractions = db::list_attractions(&mut self.db.ex().await?).await?;
        Ok(attractions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::driver::testutils::*;
    use kennywood_core::db::DbError;
    use kennywood_core::driver::DriverError;

    #[tokio::test]
    async fn test_create_attraction() {
        let context = TestContext::setup().await;

        let attraction =
            context.driver().create_attraction("Thunderbolt".to_owned()).await.unwrap();
        assert_eq!("Thunderbolt", attraction.name());
        assert!(attraction.area().is_none());

        assert_eq!(
            attraction,
            db::get_attraction(&mut context.ex().await, *attraction.id()).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_get_attraction_ok() {
        let context = TestContext::setup().await;

        let exp_attraction = db::create_attraction(&mut context.ex().await, "Phantom's Revenge")
            .await
            .unwrap();

        let attraction = context.driver().get_attraction(*exp_attraction.id()).await.unwrap();
        assert_eq!(exp_attraction, attraction);
    }

    #[tokio::test]
    async fn test_get_attraction_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("Attraction 5 does not exist".to_owned()),
            context.driver().get_attraction(AttractionId::from(5)).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_update_attraction_keeps_fields() {
        let context = TestContext::setup().await;

        let mut ex = context.ex().await;
        let area = db::create_park_area(&mut ex, "Volcano Valley", "Lava").await.unwrap();
        let attraction = db::create_attraction(&mut ex, "The Volcano").await.unwrap();
        let attraction = Attraction::new(*attraction.id(), "The Volcano".to_owned(), Some(area));
        db::update_attraction(&mut ex, &attraction).await.unwrap();
        drop(ex);

        context.driver().update_attraction(*attraction.id()).await.unwrap();

        assert_eq!(
            attraction,
            db::get_attraction(&mut context.ex().await, *attraction.id()).await.unwrap()
        );
    }

    #[tokio::test]
    async fn test_update_attraction_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("Attraction 3 does not exist".to_owned()),
            context.driver().update_attraction(AttractionId::from(3)).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_delete_attraction_ok() {
        let context = TestContext::setup().await;

        let attraction = db::create_attraction(&mut context.ex().await, "Racer").await.unwrap();

        context.driver().delete_attraction(*attraction.id()).await.unwrap();

        assert_eq!(
            DbError::NotFound,
            db::get_attraction(&mut context.ex().await, *attraction.id()).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_delete_attraction_not_found() {
        let context = TestContext::setup().await;

        assert_eq!(
            DriverError::NotFound("Attraction 8 does not exist".to_owned()),
            context.driver().delete_attraction(AttractionId::from(8)).await.unwrap_err()
        );
    }

    #[tokio::test]
    async fn test_list_attractions() {
        let context = TestContext::setup().await;

        assert!(context.driver().list_attractions().await.unwrap().is_empty());

        let mut ex = context.ex().await;
        let first = db::create_attraction(&mut ex, "Kangaroo").await.unwrap();
        let second = db::create_attraction(&mut ex, "Steel Curtain").await.unwrap();
        drop(ex);

        assert_eq!(vec![first, second], context.driver().list_attractions().await.unwrap());
    }
}
