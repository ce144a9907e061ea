//! The closed catalog of record kinds.
//!
//! Every kind shares the base fields (`id`, `created_at`, `updated_at`) and
//! differs only in which extra fields it starts with.

use std::fmt;

use crate::value::{Fields, Value};

/// A record kind from the fixed catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    /// Plain record with only the base fields.
    BaseModel,
    /// A registered user.
    User,
    /// A state.
    State,
    /// A city within a state.
    City,
    /// An amenity offered by a place.
    Amenity,
    /// A rentable place.
    Place,
    /// A review of a place.
    Review,
}

impl Kind {
    /// Every kind in the catalog, in declaration order.
    pub const ALL: [Kind; 7] = [
        Self::BaseModel,
        Self::User,
        Self::State,
        Self::City,
        Self::Amenity,
        Self::Place,
        Self::Review,
    ];

    /// Returns the catalog name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BaseModel => "BaseModel",
            Self::User => "User",
            Self::State => "State",
            Self::City => "City",
            Self::Amenity => "Amenity",
            Self::Place => "Place",
            Self::Review => "Review",
        }
    }

    /// Looks up a kind by exact, case-sensitive name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Returns the extra fields a new record of this kind starts with.
    #[must_use]
    pub fn defaults(self) -> Fields {
        let empty = || Value::String(String::new());
        let names: &[&str] = match self {
            Self::BaseModel | Self::Place => &[],
            Self::User => &["email", "password", "first_name", "last_name"],
            Self::State | Self::Amenity => &["name"],
            Self::City => &["state_id", "name"],
            Self::Review => &["place_id", "user_id", "text"],
        };
        let mut fields: Fields = names.iter().map(|n| ((*n).to_string(), empty())).collect();

        if self == Self::Place {
            for name in ["city_id", "user_id", "name", "description"] {
                fields.insert(name.to_string(), empty());
            }
            for name in ["number_rooms", "number_bathrooms", "max_guest", "price_by_night"] {
                fields.insert(name.to_string(), Value::Int(0));
            }
            for name in ["latitude", "longitude"] {
                fields.insert(name.to_string(), Value::Float(0.0));
            }
            fields.insert("amenity_ids".to_string(), Value::List(im::Vector::new()));
        }

        fields
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
