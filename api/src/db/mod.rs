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

//! Database abstraction to persist the park's records.

use crate::model::*;
use futures::TryStreamExt;
use kennywood_core::db::postgres;
use kennywood_core::db::sqlite::{self, build_timestamp, unpack_timestamp};
use kennywood_core::db::{DbError, DbResult, Executor, ensure_one_row};
use sqlx::Row;
use sqlx::postgres::PgRow;
use sqlx::sqlite::SqliteRow;
use time::OffsetDateTime;


/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        Executor::Postgres(ex) => postgres::run_schema(ex, include_str!("postgres.sql")).await,
        Executor::Sqlite(ex) => sqlite::run_schema(ex, include_str!("sqlite.sql")).await,
    }
}

/// Expands to the columns and joins needed to load attractions along with their park area.
///
/// The same column aliases are used when attractions are loaded as part of another record so
/// that `attraction_from_*_row` can parse either.
macro_rules! attractions_from [
    () => {
        "
        attractions.id AS attraction_id,
        attractions.name AS attraction_name,
        park_areas.id AS area_id,
        park_areas.name AS area_name,
        park_areas.theme AS area_theme
        FROM attractions
        LEFT JOIN park_areas ON attractions.area_id = park_areas.id
        "
    }
];

/// Expands to the columns and joins needed to load itineraries along with their attraction.
///
/// `starttime` holds the backend-specific columns that store the start time.
macro_rules! itineraries_from [
    ( $starttime:literal ) => {
        concat!(
            "
            itineraries.id AS itinerary_id,
            ",
            $starttime,
            ",
            itineraries.customer_id AS customer_id,
            attractions.id AS attraction_id,
            attractions.name AS attraction_name,
            park_areas.id AS area_id,
            park_areas.name AS area_name,
            park_areas.theme AS area_theme
            FROM itineraries
            LEFT JOIN attractions ON itineraries.attraction_id = attractions.id
            LEFT JOIN park_areas ON attractions.area_id = park_areas.id
            "
        )
    }
];

/// Parses the park area columns of `row`, which may all be null.
fn area_from_pg_row(row: &PgRow) -> DbResult<Option<ParkArea>> {
    let id: Option<i64> = row.try_get("area_id").map_err(postgres::map_sqlx_error)?;
    match id {
        Some(id) => {
            let name: String = row.try_get("area_name").map_err(postgres::map_sqlx_error)?;
            let theme: String = row.try_get("area_theme").map_err(postgres::map_sqlx_error)?;
            Ok(Some(ParkArea::new(ParkAreaId::from(id), name, theme)))
        }
        None => Ok(None),
    }
}

/// Parses the park area columns of `row`, which may all be null.
fn area_from_sqlite_row(row: &SqliteRow) -> DbResult<Option<ParkArea>> {
    let id: Option<i64> = row.try_get("area_id").map_err(sqlite::map_sqlx_error)?;
    match id {
        Some(id) => {
            let name: String = row.try_get("area_name").map_err(sqlite::map_sqlx_error)?;
            let theme: String = row.try_get("area_theme").map_err(sqlite::map_sqlx_error)?;
            Ok(Some(ParkArea::new(ParkAreaId::from(id), name, theme)))
        }
        None => Ok(None),
    }
}

/// Parses the attraction columns of `row`, which must not be null.
fn attraction_from_pg_row(row: &PgRow) -> DbResult<Attraction> {
    let id: i64 = row.try_get("attraction_id").map_err(postgres::map_sqlx_error)?;
    let name: String = row.try_get("attraction_name").map_err(postgres::map_sqlx_error)?;
    let area = area_from_pg_row(row)?;
    Ok(Attraction::new(AttractionId::from(id), name, area))
}

/// Parses the attraction columns of `row`, which must not be null.
fn attraction_from_sqlite_row(row: &SqliteRow) -> DbResult<Attraction> {
    let id: i64 = row.try_get("attraction_id").map_err(sqlite::map_sqlx_error)?;
    let name: String = row.try_get("attraction_name").map_err(sqlite::map_sqlx_error)?;
    let area = area_from_sqlite_row(row)?;
    Ok(Attraction::new(AttractionId::from(id), name, area))
}

/// Parses a customer from `row`.
fn customer_from_pg_row(row: &PgRow) -> DbResult<Customer> {
    let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
    let family_members: i32 = row.try_get("family_members").map_err(postgres::map_sqlx_error)?;
    let user_id: Option<i64> = row.try_get("user_id").map_err(postgres::map_sqlx_error)?;
    Ok(Customer::new(CustomerId::from(id), family_members, user_id))
}

/// Parses a customer from `row`.
fn customer_from_sqlite_row(row: &SqliteRow) -> DbResult<Customer> {
    let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
    let family_members: i32 = row.try_get("family_members").map_err(sqlite::map_sqlx_error)?;
    let user_id: Option<i64> = row.try_get("user_id").map_err(sqlite::map_sqlx_error)?;
    Ok(Customer::new(CustomerId::from(id), family_members, user_id))
}

/// Parses an itinerary and its optional attraction from `row`.
fn itinerary_from_pg_row(row: &PgRow) -> DbResult<Itinerary> {
    let id: i64 = row.try_get("itinerary_id").map_err(postgres::map_sqlx_error)?;
    let starttime: OffsetDateTime = row.try_get("starttime").map_err(postgres::map_sqlx_error)?;
    let customer_id: Option<i64> = row.try_get("customer_id").map_err(postgres::map_sqlx_error)?;
    let attraction_id: Option<i64> =
        row.try_get("attraction_id").map_err(postgres::map_sqlx_error)?;
    let attraction = match attraction_id {
        Some(_) => Some(attraction_from_pg_row(row)?),
        None => None,
    };
    Ok(Itinerary::new(
        ItineraryId::from(id),
        starttime,
        attraction,
        customer_id.map(CustomerId::from),
    ))
}

/// Parses an itinerary and its optional attraction from `row`.
fn itinerary_from_sqlite_row(row: &SqliteRow) -> DbResult<Itinerary> {
    let id: i64 = row.try_get("itinerary_id").map_err(sqlite::map_sqlx_error)?;
    let starttime_secs: i64 = row.try_get("starttime_secs").map_err(sqlite::map_sqlx_error)?;
    let starttime_nsecs: i64 = row.try_get("starttime_nsecs").map_err(sqlite::map_sqlx_error)?;
    let customer_id: Option<i64> = row.try_get("customer_id").map_err(sqlite::map_sqlx_error)?;
    let attraction_id: Option<i64> =
        row.try_get("attraction_id").map_err(sqlite::map_sqlx_error)?;
    let attraction = match attraction_id {
        Some(_) => Some(attraction_from_sqlite_row(row)?),
        None => None,
    };
    Ok(Itinerary::new(
        ItineraryId::from(id),
        build_timestamp(starttime_secs, starttime_nsecs)?,
        attraction,
        customer_id.map(CustomerId::from),
    ))
}

/// Creates a new park area.  Areas cannot be created via the API.
#[cfg(test)]
pub(crate) async fn create_park_area(
    ex: &mut Executor,
    name: &str,
    theme: &str,
) -> DbResult<ParkArea> {
    let id = match ex {
        Executor::Postgres(ex) => {
            let query_str = "INSERT INTO park_areas (name, theme) VALUES ($1, $2) RETURNING id";
            let row = sqlx::query(query_str)
                .bind(name)
                .bind(theme)
                .fetch_one(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO park_areas (name, theme) VALUES (?, ?)";
            let done = sqlx::query(query_str)
                .bind(name)
                .bind(theme)
                .execute(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }
    };
    Ok(ParkArea::new(ParkAreaId::from(id), name.to_owned(), theme.to_owned()))
}

/// Creates a new attraction named `name` that does not belong to any area.
pub(crate) async fn create_attraction(ex: &mut Executor, name: &str) -> DbResult<Attraction> {
    let id = match ex {
        Executor::Postgres(ex) => {
            let query_str = "INSERT INTO attractions (name) VALUES ($1) RETURNING id";
            let row = sqlx::query(query_str)
                .bind(name)
                .fetch_one(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO attractions (name) VALUES (?)";
            let done = sqlx::query(query_str)
                .bind(name)
                .execute(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }
    };
    Ok(Attraction::new(AttractionId::from(id), name.to_owned(), None))
}

/// Gets the attraction identified by `id`.
pub(crate) async fn get_attraction(ex: &mut Executor, id: AttractionId) -> DbResult<Attraction> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = concat!("SELECT", attractions_from!(), "WHERE attractions.id = $1");
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_optional(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            match row {
                Some(row) => attraction_from_pg_row(&row),
                None => Err(DbError::NotFound),
            }
        }

        Executor::Sqlite(ex) => {
            let query_str = concat!("SELECT", attractions_from!(), "WHERE attractions.id = ?");
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_optional(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            match row {
                Some(row) => attraction_from_sqlite_row(&row),
                None => Err(DbError::NotFound),
            }
        }
    }
}

/// Overwrites the stored fields of an existing `attraction`.
pub(crate) async fn update_attraction(ex: &mut Executor, attraction: &Attraction) -> DbResult<()> {
    let area_id = attraction.area().as_ref().map(|area| area.id().as_i64());
    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "UPDATE attractions SET name = $1, area_id = $2 WHERE id = $3";
            let done = sqlx::query(query_str)
                .bind(attraction.name())
                .bind(area_id)
                .bind(attraction.id().as_i64())
                .execute(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "UPDATE attractions SET name = ?, area_id = ? WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(attraction.name())
                .bind(area_id)
                .bind(attraction.id().as_i64())
                .execute(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }
    };
    ensure_one_row(rows_affected)
}

/// Deletes the attraction identified by `id`.
pub(crate) async fn delete_attraction(ex: &mut Executor, id: AttractionId) -> DbResult<()> {
    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM attractions WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM attractions WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }
    };
    ensure_one_row(rows_affected)
}

/// Gets all attractions sorted by their identifier.
pub(crate) async fn list_attractions(ex: &mut Executor) -> DbResult<Vec<Attraction>> {
    let mut attractions = vec![];
    match ex {
        Executor::Postgres(ex) => {
            let query_str = concat!("SELECT", attractions_from!(), "ORDER BY attractions.id");
            let mut rows = sqlx::query(query_str).fetch(ex);
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                attractions.push(attraction_from_pg_row(&row)?);
            }
        }

        Executor::Sqlite(ex) => {
            let query_str = concat!("SELECT", attractions_from!(), "ORDER BY attractions.id");
            let mut rows = sqlx::query(query_str).fetch(ex);
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                attractions.push(attraction_from_sqlite_row(&row)?);
            }
        }
    }
    Ok(attractions)
}

/// Creates a new customer with a party of `family_members` people.
pub(crate) async fn create_customer(ex: &mut Executor, family_members: i32) -> DbResult<Customer> {
    let id = match ex {
        Executor::Postgres(ex) => {
            let query_str = "INSERT INTO customers (family_members) VALUES ($1) RETURNING id";
            let row = sqlx::query(query_str)
                .bind(family_members)
                .fetch_one(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("id").map_err(postgres::map_sqlx_error)?
        }

        Executor::Sqlite(ex) => {
            let query_str = "INSERT INTO customers (family_members) VALUES (?)";
            let done = sqlx::query(query_str)
                .bind(family_members)
                .execute(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }
    };
    Ok(Customer::new(CustomerId::from(id), family_members, None))
}

/// Gets the customer identified by `id`.
pub(crate) async fn get_customer(ex: &mut Executor, id: CustomerId) -> DbResult<Customer> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, family_members, user_id FROM customers WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_optional(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            match row {
                Some(row) => customer_from_pg_row(&row),
                None => Err(DbError::NotFound),
            }
        }

        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, family_members, user_id FROM customers WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_optional(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            match row {
                Some(row) => customer_from_sqlite_row(&row),
                None => Err(DbError::NotFound),
            }
        }
    }
}

/// Overwrites the stored fields of an existing `customer`.
pub(crate) async fn update_customer(ex: &mut Executor, customer: &Customer) -> DbResult<()> {
    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "UPDATE customers SET family_members = $1, user_id = $2 WHERE id = $3";
            let done = sqlx::query(query_str)
                .bind(customer.family_members())
                .bind(customer.user_id())
                .bind(customer.id().as_i64())
                .execute(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "UPDATE customers SET family_members = ?, user_id = ? WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(customer.family_members())
                .bind(customer.user_id())
                .bind(customer.id().as_i64())
                .execute(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }
    };
    ensure_one_row(rows_affected)
}

/// Deletes the customer identified by `id`.
pub(crate) async fn delete_customer(ex: &mut Executor, id: CustomerId) -> DbResult<()> {
    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM customers WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM customers WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }
    };
    ensure_one_row(rows_affected)
}

/// Gets all customers sorted by their identifier.
pub(crate) async fn list_customers(ex: &mut Executor) -> DbResult<Vec<Customer>> {
    let mut customers = vec![];
    match ex {
        Executor::Postgres(ex) => {
            let query_str = "SELECT id, family_members, user_id FROM customers ORDER BY id";
            let mut rows = sqlx::query(query_str).fetch(ex);
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                customers.push(customer_from_pg_row(&row)?);
            }
        }

        Executor::Sqlite(ex) => {
            let query_str = "SELECT id, family_members, user_id FROM customers ORDER BY id";
            let mut rows = sqlx::query(query_str).fetch(ex);
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                customers.push(customer_from_sqlite_row(&row)?);
            }
        }
    }
    Ok(customers)
}

/// Creates a new itinerary that starts at `starttime` and that has no attraction nor customer.
pub(crate) async fn create_itinerary(
    ex: &mut Executor,
    starttime: OffsetDateTime,
) -> DbResult<Itinerary> {
    match ex {
        Executor::Postgres(ex) => {
            // The database truncates timestamps to microseconds so return what was stored.
            let query_str =
                "INSERT INTO itineraries (starttime) VALUES ($1) RETURNING id, starttime";
            let row = sqlx::query(query_str)
                .bind(starttime)
                .fetch_one(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
            let starttime: OffsetDateTime =
                row.try_get("starttime").map_err(postgres::map_sqlx_error)?;
            Ok(Itinerary::new(ItineraryId::from(id), starttime, None, None))
        }

        Executor::Sqlite(ex) => {
            let (starttime_secs, starttime_nsecs) = unpack_timestamp(starttime)?;

            let query_str =
                "INSERT INTO itineraries (starttime_secs, starttime_nsecs) VALUES (?, ?)";
            let done = sqlx::query(query_str)
                .bind(starttime_secs)
                .bind(starttime_nsecs)
                .execute(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Ok(Itinerary::new(ItineraryId::from(done.last_insert_rowid()), starttime, None, None))
        }
    }
}

/// Gets the itinerary identified by `id`.
pub(crate) async fn get_itinerary(ex: &mut Executor, id: ItineraryId) -> DbResult<Itinerary> {
    match ex {
        Executor::Postgres(ex) => {
            let query_str = concat!(
                "SELECT",
                itineraries_from!("itineraries.starttime AS starttime"),
                "WHERE itineraries.id = $1"
            );
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_optional(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            match row {
                Some(row) => itinerary_from_pg_row(&row),
                None => Err(DbError::NotFound),
            }
        }

        Executor::Sqlite(ex) => {
            let query_str = concat!(
                "SELECT",
                itineraries_from!(
                    "itineraries.starttime_secs AS starttime_secs,
                    itineraries.starttime_nsecs AS starttime_nsecs"
                ),
                "WHERE itineraries.id = ?"
            );
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_optional(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            match row {
                Some(row) => itinerary_from_sqlite_row(&row),
                None => Err(DbError::NotFound),
            }
        }
    }
}

/// Overwrites the stored fields of an existing `itinerary`.
pub(crate) async fn update_itinerary(ex: &mut Executor, itinerary: &Itinerary) -> DbResult<()> {
    let attraction_id = itinerary.attraction().as_ref().map(|a| a.id().as_i64());
    let customer_id = itinerary.customer_id().map(CustomerId::as_i64);
    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "
                UPDATE itineraries
                SET starttime = $1, attraction_id = $2, customer_id = $3
                WHERE id = $4
            ";
            let done = sqlx::query(query_str)
                .bind(itinerary.starttime())
                .bind(attraction_id)
                .bind(customer_id)
                .bind(itinerary.id().as_i64())
                .execute(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let (starttime_secs, starttime_nsecs) = unpack_timestamp(*itinerary.starttime())?;

            let query_str = "
                UPDATE itineraries
                SET starttime_secs = ?, starttime_nsecs = ?, attraction_id = ?, customer_id = ?
                WHERE id = ?
            ";
            let done = sqlx::query(query_str)
                .bind(starttime_secs)
                .bind(starttime_nsecs)
                .bind(attraction_id)
                .bind(customer_id)
                .bind(itinerary.id().as_i64())
                .execute(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }
    };
    ensure_one_row(rows_affected)
}

/// Deletes the itinerary identified by `id`.
pub(crate) async fn delete_itinerary(ex: &mut Executor, id: ItineraryId) -> DbResult<()> {
    let rows_affected = match ex {
        Executor::Postgres(ex) => {
            let query_str = "DELETE FROM itineraries WHERE id = $1";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(ex)
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        Executor::Sqlite(ex) => {
            let query_str = "DELETE FROM itineraries WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(id.as_i64())
                .execute(ex)
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }
    };
    ensure_one_row(rows_affected)
}

/// Gets all itineraries sorted by their identifier.
pub(crate) async fn list_itineraries(ex: &mut Executor) -> DbResult<Vec<Itinerary>> {
    let mut itineraries = vec![];
    match ex {
        Executor::Postgres(ex) => {
            let query_str = concat!(
                "SELECT",
                itineraries_from!("itineraries.starttime AS starttime"),
                "ORDER BY itineraries.id"
            );
            let mut rows = sqlx::query(query_str).fetch(ex);
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                itineraries.push(itinerary_from_pg_row(&row)?);
            }
        }

        Executor::Sqlite(ex) => {
            let query_str = concat!(
                "SELECT",
                itineraries_from!(
                    "itineraries.starttime_secs AS starttime_secs,
                    itineraries.starttime_nsecs AS starttime_nsecs"
                ),
                "ORDER BY itineraries.id"
            );
            let mut rows = sqlx::query(query_str).fetch(ex);
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                itineraries.push(itinerary_from_sqlite_row(&row)?);
            }
        }
    }
    Ok(itineraries)
}
