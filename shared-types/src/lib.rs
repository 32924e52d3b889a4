use serde::{Deserialize, Serialize};

pub mod domain;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct LatLong {
    pub lat: f64,
    pub long: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
pub struct MapBounds {
    pub north_east: LatLong,
    pub south_west: LatLong,
}

impl MapBounds {
    /// Corner projection used by the listing-search endpoint:
    /// tl = (ne.lat, sw.long), br = (sw.lat, ne.long).
    pub fn top_left(&self) -> LatLong {
        LatLong {
            lat: self.north_east.lat,
            long: self.south_west.long,
        }
    }

    pub fn bottom_right(&self) -> LatLong {
        LatLong {
            lat: self.south_west.lat,
            long: self.north_east.long,
        }
    }

    /// Bounds that have never been set by the map widget.
    pub fn is_unset(&self) -> bool {
        *self == MapBounds::default()
    }
}

/// A geolocated listing as the backend returns it, from both the
/// viewport search and the detail endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Lair {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image: String,
    pub lat: f64,
    pub lon: f64,
}

/// Body of `POST /lair`. Coordinates stay numeric on the wire.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct NewLairPayload {
    pub title: String,
    pub description: String,
    pub image: String,
    pub lat: f64,
    pub lon: f64,
}

/// Body of `POST /user` and `POST /user/login`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountCredentials {
    pub full_name: String,
    pub password: String,
}

/// Response of `POST /user` and `POST /user/login`; any extra fields
/// the backend includes are ignored.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SessionGrant {
    pub cookie: String,
}
