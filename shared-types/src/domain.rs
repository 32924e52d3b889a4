//! Parse-don't-validate newtypes for listing fields.
//!
//! The backend applies the same constraints on insertion; running them
//! client-side lets a form reject bad input before a request is composed.

use unicode_segmentation::UnicodeSegmentation;

use crate::NewLairPayload;

#[derive(Debug, Clone)]
pub struct LairTitle(String);

impl LairTitle {
    pub fn parse(s: String) -> Result<LairTitle, String> {
        let is_empty_or_whitespace = s.trim().is_empty();
        let is_too_long = s.graphemes(true).count() > 256;

        if is_empty_or_whitespace || is_too_long {
            Err(format!("`{}` is not a valid lair title.", s))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for LairTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct LairDescription(String);

impl LairDescription {
    pub fn parse(s: String) -> Result<LairDescription, String> {
        let is_empty_or_whitespace = s.trim().is_empty();
        let is_too_long = s.graphemes(true).count() > 10_000;

        if is_empty_or_whitespace || is_too_long {
            Err("the lair description is empty or too long.".to_string())
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for LairDescription {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone)]
pub struct LairImageUrl(String);

impl LairImageUrl {
    pub fn parse(s: String) -> Result<LairImageUrl, String> {
        let trimmed = s.trim();
        let is_empty = trimmed.is_empty();
        let has_scheme = trimmed.starts_with("http://") || trimmed.starts_with("https://");
        let is_too_long = s.graphemes(true).count() > 2_048;

        if is_empty || !has_scheme || is_too_long {
            Err(format!("`{}` is not a valid image URL.", s))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for LairImageUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LairLat(f64);

impl LairLat {
    pub fn parse(value: f64) -> Result<LairLat, String> {
        if value.is_finite() && (-90.0..=90.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(format!("{} is not a valid latitude.", value))
        }
    }
}

impl AsRef<f64> for LairLat {
    fn as_ref(&self) -> &f64 {
        &self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LairLon(f64);

impl LairLon {
    pub fn parse(value: f64) -> Result<LairLon, String> {
        if value.is_finite() && (-180.0..=180.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(format!("{} is not a valid longitude.", value))
        }
    }
}

impl AsRef<f64> for LairLon {
    fn as_ref(&self) -> &f64 {
        &self.0
    }
}

/// A fully validated new listing, ready to be posted.
#[derive(Debug, Clone)]
pub struct NewLair {
    pub title: LairTitle,
    pub description: LairDescription,
    pub image: LairImageUrl,
    pub lat: LairLat,
    pub lon: LairLon,
}

impl NewLair {
    pub fn parse(
        title: String,
        description: String,
        image: String,
        lat: f64,
        lon: f64,
    ) -> Result<NewLair, String> {
        Ok(NewLair {
            title: LairTitle::parse(title)?,
            description: LairDescription::parse(description)?,
            image: LairImageUrl::parse(image)?,
            lat: LairLat::parse(lat)?,
            lon: LairLon::parse(lon)?,
        })
    }

    pub fn into_payload(self) -> NewLairPayload {
        NewLairPayload {
            title: self.title.0,
            description: self.description.0,
            image: self.image.0,
            lat: self.lat.0,
            lon: self.lon.0,
        }
    }
}
