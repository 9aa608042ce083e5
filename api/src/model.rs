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

//! High-level data types.

use derive_getters::Getters;
use derive_more::{Constructor, Display, From};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Generates a newtype for the store-assigned identifier of a record type.
macro_rules! record_id [
    ( $name:ident, $what:literal ) => {
        #[doc = concat!("Store-assigned identifier of ", $what, ".")]
        #[derive(Clone, Copy, Debug, Deserialize, Display, Eq, From, PartialEq, Serialize)]
        #[serde(transparent)]
        pub(crate) struct $name(i64);

        impl $name {
            /// Returns the raw identifier as stored in the database.
            pub(crate) fn as_i64(self) -> i64 {
                self.0
            }
        }
    }
];

record_id!(AttractionId, "an attraction");
record_id!(CustomerId, "a customer");
record_id!(ItineraryId, "an itinerary");
record_id!(ParkAreaId, "a park area");

/// A themed area of the park that groups attractions.
#[derive(Constructor, Getters)]
#[cfg_attr(test, derive(Clone, Debug, PartialEq))]
pub(crate) struct ParkArea {
    /// Identifier of the area.
    id: ParkAreaId,

    /// Name of the area.
    name: String,

    /// Theme of the area.
    theme: String,
}

/// A ride or show of the park.
#[derive(Constructor, Getters)]
#[cfg_attr(test, derive(Clone, Debug, PartialEq))]
pub(crate) struct Attraction {
    /// Identifier of the attraction.
    id: AttractionId,

    /// Name of the attraction.
    name: String,

    /// Area of the park where the attraction lives, if known.
    area: Option<ParkArea>,
}

/// A visitor of the park.
#[derive(Constructor, Getters)]
#[cfg_attr(test, derive(Clone, Debug, PartialEq))]
pub(crate) struct Customer {
    /// Identifier of the customer.
    id: CustomerId,

    /// Number of people in the customer's party.
    family_members: i32,

    /// Identifier of the user account behind this customer, if any.
    user_id: Option<i64>,
}

impl Customer {
    /// Replaces the size of the customer's party.
    pub(crate) fn with_family_members(mut self, family_members: i32) -> Self {
        self.family_members = family_members;
        self
    }
}

/// A planned visit of a customer to an attraction.
#[derive(Constructor, Getters)]
#[cfg_attr(test, derive(Clone, Debug, PartialEq))]
pub(crate) struct Itinerary {
    /// Identifier of the itinerary.
    id: ItineraryId,

    /// When the visit starts.
    starttime: OffsetDateTime,

    /// Attraction to visit, if assigned.
    attraction: Option<Attraction>,

    /// Customer that plans the visit, if assigned.
    customer_id: Option<CustomerId>,
}

impl Itinerary {
    /// Replaces the start time of the visit.
    pub(crate) fn with_starttime(mut self, starttime: OffsetDateTime) -> Self {
        self.starttime = starttime;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{Token, assert_de_tokens_error, assert_tokens};

    #[test]
    fn test_record_id_ser_de() {
        assert_tokens(&AttractionId::from(5), &[Token::I64(5)]);
        assert_tokens(&CustomerId::from(-1), &[Token::I64(-1)]);
        assert_tokens(&ItineraryId::from(i64::MAX), &[Token::I64(i64::MAX)]);
        assert_tokens(&ParkAreaId::from(0), &[Token::I64(0)]);
    }

    #[test]
    fn test_record_id_de_errors() {
        assert_de_tokens_error::<AttractionId>(
            &[Token::Str("5")],
            "invalid type: string \"5\", expected i64",
        );
    }

    #[test]
    fn test_record_id_display() {
        assert_eq!("42", format!("{}", CustomerId::from(42)));
        assert_eq!(42, CustomerId::from(42).as_i64());
    }

    #[test]
    fn test_with_family_members() {
        let customer = Customer::new(CustomerId::from(1), 2, Some(3));
        assert_eq!(Customer::new(CustomerId::from(1), 7, Some(3)), customer.with_family_members(7));
    }
}
