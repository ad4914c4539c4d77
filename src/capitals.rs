//! The list of capitals shown on the globe.
//!
//! Records are validated and converted to radians here, once. Everything
//! downstream assumes valid angles.

use bevy::prelude::*;
use thiserror::Error;

use crate::camera::GeoAngle;

pub struct CapitalsPlugin;

impl Plugin for CapitalsPlugin {
    fn build(&self, app: &mut App) {
        let capitals = Capitals::from_records(CAPITAL_RECORDS);
        info!("loaded {} capitals", capitals.len());
        app.insert_resource(capitals);
    }
}

/// A raw entry, coordinates in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapitalRecord {
    pub city:      &'static str,
    pub country:   &'static str,
    pub latitude:  f32,
    pub longitude: f32,
}

const fn record(
    city: &'static str,
    country: &'static str,
    latitude: f32,
    longitude: f32,
) -> CapitalRecord {
    CapitalRecord {
        city,
        country,
        latitude,
        longitude,
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CapitalError {
    #[error("{city}: latitude {latitude}° is outside [-90°, 90°]")]
    LatitudeOutOfRange { city: String, latitude: f32 },
    #[error("{city}: coordinates ({latitude}, {longitude}) are not finite")]
    NonFinite {
        city:      String,
        latitude:  f32,
        longitude: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Capital {
    pub city:    String,
    pub country: String,
    pub angle:   GeoAngle,
}

impl TryFrom<&CapitalRecord> for Capital {
    type Error = CapitalError;

    fn try_from(record: &CapitalRecord) -> Result<Self, Self::Error> {
        if !record.latitude.is_finite() || !record.longitude.is_finite() {
            return Err(CapitalError::NonFinite {
                city:      record.city.to_string(),
                latitude:  record.latitude,
                longitude: record.longitude,
            });
        }
        if !(-90.0..=90.0).contains(&record.latitude) {
            return Err(CapitalError::LatitudeOutOfRange {
                city:     record.city.to_string(),
                latitude: record.latitude,
            });
        }

        Ok(Self {
            city:    record.city.to_string(),
            country: record.country.to_string(),
            angle:   GeoAngle::new(
                record.latitude.to_radians(),
                record.longitude.to_radians(),
            ),
        })
    }
}

/// Validated capitals in alphabetical order of city name. Indices into this
/// list identify capitals everywhere else.
#[derive(Resource, Debug, Clone, Default)]
pub struct Capitals(Vec<Capital>);

impl Capitals {
    /// Keeps the valid records, logging the rejected ones.
    pub fn from_records(records: &[CapitalRecord]) -> Self {
        let mut capitals: Vec<Capital> = records
            .iter()
            .filter_map(|record| match Capital::try_from(record) {
                Ok(capital) => Some(capital),
                Err(error) => {
                    warn!("skipping capital: {error}");
                    None
                },
            })
            .collect();
        capitals.sort_by_cached_key(|capital| capital.city.to_lowercase());
        Self(capitals)
    }

    pub fn get(&self, index: usize) -> Option<&Capital> { self.0.get(index) }

    pub const fn len(&self) -> usize { self.0.len() }

    pub fn iter(&self) -> impl Iterator<Item = &Capital> { self.0.iter() }
}

#[rustfmt::skip]
const CAPITAL_RECORDS: &[CapitalRecord] = &[
    record("Tokyo",            "Japan",                 35.6895,  139.6917),
    record("Paris",            "France",                48.8566,    2.3522),
    record("London",           "United Kingdom",        51.5074,   -0.1278),
    record("Washington",       "United States",         38.8951,  -77.0364),
    record("Ottawa",           "Canada",                45.4215,  -75.6972),
    record("Mexico City",      "Mexico",                19.4326,  -99.1332),
    record("Havana",           "Cuba",                  23.1136,  -82.3666),
    record("Guatemala City",   "Guatemala",             14.6349,  -90.5069),
    record("Panama City",      "Panama",                 8.9824,  -79.5199),
    record("Bogota",           "Colombia",               4.7110,  -74.0721),
    record("Caracas",          "Venezuela",             10.4806,  -66.9036),
    record("Quito",            "Ecuador",               -0.1807,  -78.4678),
    record("Lima",             "Peru",                 -12.0464,  -77.0428),
    record("La Paz",           "Bolivia",              -16.4897,  -68.1193),
    record("Santiago",         "Chile",                -33.4489,  -70.6693),
    record("Buenos Aires",     "Argentina",            -34.6037,  -58.3816),
    record("Montevideo",       "Uruguay",              -34.9011,  -56.1645),
    record("Asuncion",         "Paraguay",             -25.2637,  -57.5759),
    record("Brasilia",         "Brazil",               -15.7975,  -47.8919),
    record("Reykjavik",        "Iceland",               64.1466,  -21.9426),
    record("Dublin",           "Ireland",               53.3498,   -6.2603),
    record("Lisbon",           "Portugal",              38.7223,   -9.1393),
    record("Madrid",           "Spain",                 40.4168,   -3.7038),
    record("Brussels",         "Belgium",               50.8503,    4.3517),
    record("Amsterdam",        "Netherlands",           52.3676,    4.9041),
    record("Berlin",           "Germany",               52.5200,   13.4050),
    record("Bern",             "Switzerland",           46.9480,    7.4474),
    record("Rome",             "Italy",                 41.9028,   12.4964),
    record("Vienna",           "Austria",               48.2082,   16.3738),
    record("Prague",           "Czechia",               50.0755,   14.4378),
    record("Warsaw",           "Poland",                52.2297,   21.0122),
    record("Budapest",         "Hungary",               47.4979,   19.0402),
    record("Copenhagen",       "Denmark",               55.6761,   12.5683),
    record("Oslo",             "Norway",                59.9139,   10.7522),
    record("Stockholm",        "Sweden",                59.3293,   18.0686),
    record("Helsinki",         "Finland",               60.1699,   24.9384),
    record("Athens",           "Greece",                37.9838,   23.7275),
    record("Ankara",           "Turkey",                39.9334,   32.8597),
    record("Kyiv",             "Ukraine",               50.4501,   30.5234),
    record("Moscow",           "Russia",                55.7558,   37.6173),
    record("Cairo",            "Egypt",                 30.0444,   31.2357),
    record("Rabat",            "Morocco",               34.0209,   -6.8416),
    record("Algiers",          "Algeria",               36.7538,    3.0588),
    record("Tunis",            "Tunisia",               36.8065,   10.1815),
    record("Dakar",            "Senegal",               14.7167,  -17.4677),
    record("Accra",            "Ghana",                  5.6037,   -0.1870),
    record("Abuja",            "Nigeria",                9.0765,    7.3986),
    record("Kinshasa",         "DR Congo",              -4.4419,   15.2663),
    record("Luanda",           "Angola",                -8.8390,   13.2894),
    record("Nairobi",          "Kenya",                 -1.2921,   36.8219),
    record("Addis Ababa",      "Ethiopia",               9.0300,   38.7400),
    record("Khartoum",         "Sudan",                 15.5007,   32.5599),
    record("Pretoria",         "South Africa",         -25.7479,   28.2293),
    record("Windhoek",         "Namibia",              -22.5609,   17.0658),
    record("Antananarivo",     "Madagascar",           -18.8792,   47.5079),
    record("Riyadh",           "Saudi Arabia",          24.7136,   46.6753),
    record("Tehran",           "Iran",                  35.6892,   51.3890),
    record("Baghdad",          "Iraq",                  33.3152,   44.3661),
    record("Kabul",            "Afghanistan",           34.5553,   69.2075),
    record("Islamabad",        "Pakistan",              33.6844,   73.0479),
    record("New Delhi",        "India",                 28.6139,   77.2090),
    record("Kathmandu",        "Nepal",                 27.7172,   85.3240),
    record("Dhaka",            "Bangladesh",            23.8103,   90.4125),
    record("Bangkok",          "Thailand",              13.7563,  100.5018),
    record("Hanoi",            "Vietnam",               21.0278,  105.8342),
    record("Kuala Lumpur",     "Malaysia",               3.1390,  101.6869),
    record("Singapore",        "Singapore",              1.3521,  103.8198),
    record("Jakarta",          "Indonesia",             -6.2088,  106.8456),
    record("Manila",           "Philippines",           14.5995,  120.9842),
    record("Beijing",          "China",                 39.9042,  116.4074),
    record("Ulaanbaatar",      "Mongolia",              47.8864,  106.9057),
    record("Seoul",            "South Korea",           37.5665,  126.9780),
    record("Canberra",         "Australia",            -35.2809,  149.1300),
    record("Wellington",       "New Zealand",          -41.2865,  174.7762),
    record("Suva",             "Fiji",                 -18.1416,  178.4419),
    record("Apia",             "Samoa",                -13.8507, -171.7514),
    record("Nuku'alofa",       "Tonga",                -21.1394, -175.2018),
];
