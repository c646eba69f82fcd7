use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::random::RandomSource;

pub struct City {
    pub name: &'static str,
    pub continent: &'static str,
}

const CITIES: [City; 10] = [
    City {
        name: "New York",
        continent: "North America",
    },
    City {
        name: "London",
        continent: "Europe",
    },
    City {
        name: "Tokyo",
        continent: "Asia",
    },
    City {
        name: "Sydney",
        continent: "Australia",
    },
    City {
        name: "Paris",
        continent: "Europe",
    },
    City {
        name: "Berlin",
        continent: "Europe",
    },
    City {
        name: "Moscow",
        continent: "Europe",
    },
    City {
        name: "Rio de Janeiro",
        continent: "South America",
    },
    City {
        name: "Cape Town",
        continent: "Africa",
    },
    City {
        name: "Toronto",
        continent: "North America",
    },
];

const DESCRIPTIONS: [&str; 7] = [
    "Sunny", "Cloudy", "Rainy", "Windy", "Stormy", "Foggy", "Snowy",
];

const TEMPERATURE_MIN_C: i32 = -10;
const TEMPERATURE_MAX_C: i32 = 35;

/// Continent names in catalog order, without duplicates.
pub fn continents() -> Vec<&'static str> {
    let mut continents = Vec::new();
    for city in &CITIES {
        if !continents.contains(&city.continent) {
            continents.push(city.continent);
        }
    }
    continents
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("invalid report count: {count}")]
    InvalidCount { count: i32 },
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct WeatherReport {
    pub city: String,
    pub description: String,
    pub temperature_c: i32,
}

impl WeatherReport {
    /// Derived on read rather than stored next to the Celsius value.
    pub fn temperature_f(&self) -> i32 {
        32 + (f64::from(self.temperature_c) / 0.5556) as i32
    }
}

/// Samples weather reports for distinct cities. Constructed per request over
/// the shared random source.
pub struct WeatherService<'a> {
    random_source: &'a mut dyn RandomSource,
}

impl<'a> WeatherService<'a> {
    pub fn new(random_source: &'a mut dyn RandomSource) -> WeatherService<'a> {
        WeatherService { random_source }
    }

    /// Draws up to `count` reports for distinct cities, optionally restricted
    /// to one continent (exact, case-sensitive match). The result is capped
    /// at the size of the eligible pool and ordered by successful draw.
    pub fn sample_reports(
        &mut self,
        count: i32,
        continent: Option<&str>,
    ) -> Result<Vec<WeatherReport>, WeatherError> {
        if count < 0 {
            return Err(WeatherError::InvalidCount { count });
        }

        let pool: Vec<&City> = match continent {
            Some(continent) => CITIES
                .iter()
                .filter(|city| city.continent == continent)
                .collect(),
            None => CITIES.iter().collect(),
        };
        let target = (count as usize).min(pool.len());

        let mut selected_cities = HashSet::new();
        let mut reports = Vec::with_capacity(target);
        while reports.len() < target {
            let city = pool[self.random_source.next(0, pool.len() as i32) as usize];
            // A duplicate draw consumes random state but produces no report.
            if !selected_cities.insert(city.name) {
                continue;
            }
            let description = DESCRIPTIONS
                [self.random_source.next(0, DESCRIPTIONS.len() as i32) as usize];
            reports.push(WeatherReport {
                city: city.name.to_string(),
                description: description.to_string(),
                temperature_c: self
                    .random_source
                    .next(TEMPERATURE_MIN_C, TEMPERATURE_MAX_C),
            });
        }
        Ok(reports)
    }
}
