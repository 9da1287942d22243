//! Wire types for the autos resource.
//!
//! # Design
//! `Car` is the payload of a record that has no identifier yet: the body of
//! `POST /autos` and, because updates are full replacements, of
//! `PUT /autos/:id` as well. `CarRecord` is what the server hands back, the
//! same fields plus the store-assigned `_id`. Keeping them as two types makes
//! "new" versus "existing" a compile-time distinction.
//!
//! Field names are English in Rust and Spanish on the wire.
//!
//! Decoding is lenient: the API stores whatever the form posted, so `anio`
//! may come back as `2020` or `"2020"`. Missing, `null` and blank values
//! decode to `0` or `""`, so one sloppy document still renders as a row.

use serde::{Deserialize, Serialize};

/// A car listing without an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    #[serde(rename = "marca", default, deserialize_with = "lenient::text")]
    pub make: String,
    #[serde(rename = "modelo", default, deserialize_with = "lenient::text")]
    pub model: String,
    #[serde(rename = "anio", default, deserialize_with = "lenient::year")]
    pub year: i32,
    #[serde(
        rename = "precio",
        default,
        serialize_with = "lenient::serialize_price",
        deserialize_with = "lenient::price"
    )]
    pub price: f64,
    #[serde(rename = "kilometraje", default, deserialize_with = "lenient::text")]
    pub mileage: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub color: String,
    #[serde(rename = "transmision", default, deserialize_with = "lenient::text")]
    pub transmission: String,
    #[serde(rename = "combustible", default, deserialize_with = "lenient::text")]
    pub fuel: String,
    #[serde(rename = "imagenUrl", default, deserialize_with = "lenient::text")]
    pub image_url: String,
    #[serde(rename = "descripcion", default, deserialize_with = "lenient::text")]
    pub description: String,
}

/// A car listing as stored remotely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(flatten)]
    pub car: Car,
}

/// `{msg}` body returned by `DELETE /autos/:id` and by 404 responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub msg: String,
}

mod lenient {
    use serde::de::{self, Deserializer};
    use serde::{Deserialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    /// `None` for `null` and for blank strings.
    fn raw<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Raw>, D::Error> {
        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Text(s)) if s.trim().is_empty() => None,
            other => other,
        })
    }

    pub(super) fn year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
        match raw(deserializer)? {
            None => Ok(0),
            Some(Raw::Int(n)) => i32::try_from(n).map_err(de::Error::custom),
            Some(Raw::Float(f)) if f.fract() == 0.0 && f.abs() <= i32::MAX as f64 => Ok(f as i32),
            Some(Raw::Float(f)) => Err(de::Error::custom(format!("year is not an integer: {f}"))),
            Some(Raw::Text(s)) => s.trim().parse().map_err(de::Error::custom),
        }
    }

    pub(super) fn price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match raw(deserializer)? {
            None => Ok(0.0),
            Some(Raw::Int(n)) => Ok(n as f64),
            Some(Raw::Float(f)) => Ok(f),
            Some(Raw::Text(s)) => s.trim().parse().map_err(de::Error::custom),
        }
    }

    pub(super) fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(match Option::<Raw>::deserialize(deserializer)? {
            None => String::new(),
            Some(Raw::Int(n)) => n.to_string(),
            Some(Raw::Float(f)) => f.to_string(),
            Some(Raw::Text(s)) => s,
        })
    }

    // Whole prices go out as integers so `15000` does not become `15000.0`.
    pub(super) fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if price.fract() == 0.0 && price.abs() < i64::MAX as f64 {
            serializer.serialize_i64(*price as i64)
        } else {
            serializer.serialize_f64(*price)
        }
    }
}
