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

//! Representations of the records as exchanged with clients.
//!
//! Every record type has an explicit response type that lists the fields clients get to see.
//! Records that have their own APIs also carry a `url` link back to themselves.

use crate::model::*;
use kennywood_core::rest::BaseUrls;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};
use url::Url;

/// Builds the link to the attraction identified by `id`.
fn attraction_url(base_urls: &BaseUrls, id: AttractionId) -> Url {
    base_urls.make_backend_url(&format!("attractions/{}", id))
}

/// Builds the link to the itinerary identified by `id`.
fn itinerary_url(base_urls: &BaseUrls, id: ItineraryId) -> Url {
    base_urls.make_backend_url(&format!("itineraries/{}", id))
}

/// Text as provided in request bodies.  Scalars other than strings are taken in their textual
/// form.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(try_from = "Value")]
pub(crate) struct TextField(pub(crate) String);

impl TryFrom<Value> for TextField {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(TextField(s)),
            Value::Number(n) => Ok(TextField(n.to_string())),
            Value::Bool(true) => Ok(TextField("True".to_owned())),
            Value::Bool(false) => Ok(TextField("False".to_owned())),
            value => Err(format!("expected text but got {}", value)),
        }
    }
}

/// An integer as provided in request bodies, either as a JSON number or as a string holding one.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(try_from = "Value")]
pub(crate) struct IntegerField(pub(crate) i32);

impl TryFrom<Value> for IntegerField {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let parsed = match &value {
            Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
            Value::String(s) => s.trim().parse::<i32>().ok(),
            _ => None,
        };
        parsed.map(IntegerField).ok_or_else(|| format!("expected an integer but got {}", value))
    }
}

/// A timestamp as provided in request bodies.
///
/// Accepts RFC 3339 as well as ISO 8601 dates and datetimes with a space or `T` separator,
/// optional seconds and an optional UTC offset.  Values without an offset are in UTC.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
#[serde(try_from = "String")]
pub(crate) struct TimestampField(pub(crate) OffsetDateTime);

/// Splits the trailing UTC offset, if any, from the datetime in `value`.
fn split_offset(value: &str) -> Result<(&str, UtcOffset), String> {
    if let Some(rest) = value.strip_suffix('Z') {
        return Ok((rest.trim_end(), UtcOffset::UTC));
    }

    // Offsets can only start after the date, whose own dashes must not be mistaken for a sign.
    let Some(pos) = value.get(10..).and_then(|time| time.rfind(['+', '-'])).map(|pos| pos + 10)
    else {
        return Ok((value, UtcOffset::UTC));
    };

    let offset = &value[pos..];
    let offset = UtcOffset::parse(offset, OFFSET_HH_MM)
        .or_else(|_| UtcOffset::parse(offset, OFFSET_HHMM))
        .or_else(|_| UtcOffset::parse(offset, OFFSET_HH))
        .map_err(|e| format!("invalid offset '{}': {}", offset, e))?;
    Ok((value[..pos].trim_end(), offset))
}

const OFFSET_HH_MM: &[BorrowedFormatItem<'_>] =
    format_description!("[offset_hour sign:mandatory]:[offset_minute]");
const OFFSET_HHMM: &[BorrowedFormatItem<'_>] =
    format_description!("[offset_hour sign:mandatory][offset_minute]");
const OFFSET_HH: &[BorrowedFormatItem<'_>] = format_description!("[offset_hour sign:mandatory]");
const DATETIME_T: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"
);
const DATETIME_SPACE: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"
);
const DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

impl TryFrom<String> for TimestampField {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let value = value.trim();
        if let Ok(timestamp) = OffsetDateTime::parse(value, &Rfc3339) {
            return Ok(TimestampField(timestamp));
        }

        if let Ok(date) = Date::parse(value, DATE) {
            return Ok(TimestampField(date.midnight().assume_utc()));
        }

        let (datetime, offset) = split_offset(value)?;
        let datetime = PrimitiveDateTime::parse(datetime, DATETIME_T)
            .or_else(|_| PrimitiveDateTime::parse(datetime, DATETIME_SPACE))
            .map_err(|e| format!("invalid datetime '{}': {}", value, e))?;
        Ok(TimestampField(datetime.assume_offset(offset)))
    }
}

/// Representation of a park area embedded in an attraction.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct ParkAreaResponse {
    pub(crate) id: ParkAreaId,
    pub(crate) name: String,
    pub(crate) theme: String,
}

impl ParkAreaResponse {
    /// Encodes `area`.
    fn new(area: &ParkArea) -> Self {
        Self { id: *area.id(), name: area.name().clone(), theme: area.theme().clone() }
    }
}

/// Representation of an attraction.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct AttractionResponse {
    pub(crate) id: AttractionId,
    pub(crate) url: Url,
    pub(crate) name: String,
    pub(crate) area: Option<ParkAreaResponse>,
}

impl AttractionResponse {
    /// Encodes `attraction` with links relative to `base_urls`.
    pub(crate) fn new(attraction: &Attraction, base_urls: &BaseUrls) -> Self {
        Self {
            id: *attraction.id(),
            url: attraction_url(base_urls, *attraction.id()),
            name: attraction.name().clone(),
            area: attraction.area().as_ref().map(ParkAreaResponse::new),
        }
    }
}

/// Representation of an attraction embedded in an itinerary.
///
/// Embedded attractions only reference their area by identifier.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct NestedAttractionResponse {
    pub(crate) id: AttractionId,
    pub(crate) url: Url,
    pub(crate) name: String,
    pub(crate) area_id: Option<ParkAreaId>,
}

impl NestedAttractionResponse {
    /// Encodes `attraction` with links relative to `base_urls`.
    fn new(attraction: &Attraction, base_urls: &BaseUrls) -> Self {
        Self {
            id: *attraction.id(),
            url: attraction_url(base_urls, *attraction.id()),
            name: attraction.name().clone(),
            area_id: attraction.area().as_ref().map(|area| *area.id()),
        }
    }
}

/// Representation of a customer.  Customers do not expose a link to themselves.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct CustomerResponse {
    pub(crate) id: CustomerId,
    pub(crate) family_members: i32,
    pub(crate) user_id: Option<i64>,
}

impl CustomerResponse {
    /// Encodes `customer`.
    pub(crate) fn new(customer: &Customer) -> Self {
        Self {
            id: *customer.id(),
            family_members: *customer.family_members(),
            user_id: *customer.user_id(),
        }
    }
}

/// Representation of an itinerary.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct ItineraryResponse {
    pub(crate) id: ItineraryId,
    pub(crate) url: Url,
    #[serde(with = "time::serde::rfc3339")]
    pub(crate) starttime: OffsetDateTime,
    pub(crate) attraction: Option<NestedAttractionResponse>,
    pub(crate) customer_id: Option<CustomerId>,
}

impl ItineraryResponse {
    /// Encodes `itinerary` with links relative to `base_urls`.
    pub(crate) fn new(itinerary: &Itinerary, base_urls: &BaseUrls) -> Self {
        Self {
            id: *itinerary.id(),
            url: itinerary_url(base_urls, *itinerary.id()),
            starttime: *itinerary.starttime(),
            attraction: itinerary
                .attraction()
                .as_ref()
                .map(|attraction| NestedAttractionResponse::new(attraction, base_urls)),
            customer_id: *itinerary.customer_id(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    /// Base URLs to use in all tests.
    fn base_urls() -> BaseUrls {
        BaseUrls::from_strs("https://kennywood.example.com/api/")
    }

    #[test]
    fn test_attraction_without_area() {
        let attraction = Attraction::new(AttractionId::from(1), "Thunderbolt".to_owned(), None);
        assert_eq!(
            json!({
                "id": 1,
                "url": "https://kennywood.example.com/api/attractions/1",
                "name": "Thunderbolt",
                "area": null,
            }),
            serde_json::to_value(AttractionResponse::new(&attraction, &base_urls())).unwrap()
        );
    }

    #[test]
    fn test_attraction_with_area() {
        let area =
            ParkArea::new(ParkAreaId::from(3), "Thunder Alley".to_owned(), "Speed".to_owned());
        let attraction = Attraction::new(AttractionId::from(7), "Racer".to_owned(), Some(area));
        assert_eq!(
            json!({
                "id": 7,
                "url": "https://kennywood.example.com/api/attractions/7",
                "name": "Racer",
                "area": {"id": 3, "name": "Thunder Alley", "theme": "Speed"},
            }),
            serde_json::to_value(AttractionResponse::new(&attraction, &base_urls())).unwrap()
        );
    }

    #[test]
    fn test_customer() {
        let customer = Customer::new(CustomerId::from(2), 5, Some(40));
        assert_eq!(
            json!({"id": 2, "family_members": 5, "user_id": 40}),
            serde_json::to_value(CustomerResponse::new(&customer)).unwrap()
        );
    }

    #[test]
    fn test_itinerary_without_references() {
        let itinerary =
            Itinerary::new(ItineraryId::from(4), datetime!(2023-06-30 14:15:00 UTC), None, None);
        assert_eq!(
            json!({
                "id": 4,
                "url": "https://kennywood.example.com/api/itineraries/4",
                "starttime": "2023-06-30T14:15:00Z",
                "attraction": null,
                "customer_id": null,
            }),
            serde_json::to_value(ItineraryResponse::new(&itinerary, &base_urls())).unwrap()
        );
    }

    #[test]
    fn test_itinerary_with_references() {
        let area = ParkArea::new(ParkAreaId::from(3), "Kiddieland".to_owned(), "Kids".to_owned());
        let attraction = Attraction::new(AttractionId::from(8), "Turtle".to_owned(), Some(area));
        let itinerary = Itinerary::new(
            ItineraryId::from(5),
            datetime!(2023-06-30 14:15:00 +02:00),
            Some(attraction),
            Some(CustomerId::from(6)),
        );
        assert_eq!(
            json!({
                "id": 5,
                "url": "https://kennywood.example.com/api/itineraries/5",
                "starttime": "2023-06-30T14:15:00+02:00",
                "attraction": {
                    "id": 8,
                    "url": "https://kennywood.example.com/api/attractions/8",
                    "name": "Turtle",
                    "area_id": 3,
                },
                "customer_id": 6,
            }),
            serde_json::to_value(ItineraryResponse::new(&itinerary, &base_urls())).unwrap()
        );
    }

    #[test]
    fn test_text_field() {
        for (exp, value) in [
            ("Thunderbolt", json!("Thunderbolt")),
            ("42", json!(42)),
            ("2.5", json!(2.5)),
            ("True", json!(true)),
        ] {
            assert_eq!(exp, serde_json::from_value::<TextField>(value).unwrap().0);
        }

        for value in [json!(null), json!([]), json!({"name": "x"})] {
            serde_json::from_value::<TextField>(value).unwrap_err();
        }
    }

    #[test]
    fn test_integer_field() {
        for (exp, value) in [(4, json!(4)), (4, json!("4")), (-3, json!(" -3 ")), (0, json!(0))] {
            assert_eq!(exp, serde_json::from_value::<IntegerField>(value).unwrap().0);
        }

        for value in
            [json!("four"), json!(""), json!(2.5), json!(null), json!(u64::MAX), json!("1e3")]
        {
            let err = serde_json::from_value::<IntegerField>(value).unwrap_err();
            assert!(err.to_string().starts_with("expected an integer"));
        }
    }

    #[test]
    fn test_timestamp_field_ok() {
        for (exp, value) in [
            (datetime!(2023-06-30 14:15:00.5 UTC), "2023-06-30T14:15:00.5Z"),
            (datetime!(2023-06-30 14:15:00 +02:00), "2023-06-30T14:15:00+02:00"),
            (datetime!(2023-07-04 18:45:00 UTC), "2023-07-04 18:45:00"),
            (datetime!(2023-07-04 18:45:00 UTC), "2023-07-04T18:45"),
            (datetime!(2023-07-04 18:45:10.25 UTC), "2023-07-04 18:45:10.25"),
            (datetime!(2023-07-04 18:45:00 -05:00), "2023-07-04 18:45-05:00"),
            (datetime!(2023-07-04 18:45:00 +05:30), "2023-07-04 18:45:00 +0530"),
            (datetime!(2023-07-04 18:45:00 +01:00), "2023-07-04T18:45:00+01"),
            (datetime!(2023-07-04 18:45:00 UTC), "2023-07-04 18:45Z"),
            (datetime!(2023-07-04 00:00:00 UTC), "2023-07-04"),
        ] {
            let timestamp: TimestampField = serde_json::from_value(json!(value)).unwrap();
            assert_eq!(exp, timestamp.0, "Bad parse of {}", value);
        }
    }

    #[test]
    fn test_timestamp_field_errors() {
        for value in [
            json!("June 30th"),
            json!("2023-06-30 noon"),
            json!("2023-13-01 10:00"),
            json!("2023-06-30 10:00+ab:00"),
            json!(1688134500),
            json!(null),
        ] {
            serde_json::from_value::<TimestampField>(value).unwrap_err();
        }
    }
}
