//! World layout and weather schedule files
//!
//! Both are comma-separated rows. Layout rows are `KIND,x,y[,extra...]`;
//! weather rows are `LABEL,start_frame,end_frame` covering `[start, end)`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Location;
use crate::error::LoadError;
use crate::sim::TokenKind;

/// A passenger placement from the layout file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerSpawn {
    pub position: Location,
    pub priority: u32,
    /// X of the destination flag
    pub destination_x: f64,
    /// Vertical distance to the flag; the flag sits this far above the pickup
    pub travel_distance: f64,
    pub has_umbrella: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TokenSpawn {
    pub kind: TokenKind,
    pub position: Location,
}

/// Everything placed in the world at session start
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldLayout {
    pub taxi: Location,
    pub passengers: Vec<PassengerSpawn>,
    pub tokens: Vec<TokenSpawn>,
}

impl WorldLayout {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        Self::parse(&text, path)
    }

    /// Parse layout text; `origin` is only used in error messages
    pub fn parse(text: &str, origin: impl AsRef<Path>) -> Result<Self, LoadError> {
        let origin = origin.as_ref();
        let mut taxi = None;
        let mut passengers = Vec::new();
        let mut tokens = Vec::new();

        for (line_no, fields) in rows(text) {
            let row = Row {
                origin,
                line: line_no,
                fields: &fields,
            };
            let kind = fields[0];
            match kind {
                "TAXI" => {
                    // First taxi row wins
                    if taxi.is_none() {
                        taxi = Some(row.location()?);
                    }
                }
                "PASSENGER" => {
                    row.expect_len(7)?;
                    let priority: u32 = row.parse(3, "priority")?;
                    if priority == 0 {
                        return Err(LoadError::malformed(origin, line_no, "priority must be at least 1"));
                    }
                    passengers.push(PassengerSpawn {
                        position: row.location()?,
                        priority,
                        destination_x: row.parse(4, "destination x")?,
                        travel_distance: row.parse(5, "travel distance")?,
                        has_umbrella: row.parse::<u8>(6, "umbrella flag")? == 1,
                    });
                }
                "COIN" | "INVINCIBLE_POWER" => {
                    let kind = if kind == "COIN" {
                        TokenKind::Coin
                    } else {
                        TokenKind::Invincibility
                    };
                    tokens.push(TokenSpawn {
                        kind,
                        position: row.location()?,
                    });
                }
                other => {
                    return Err(LoadError::malformed(
                        origin,
                        line_no,
                        format!("unknown object kind `{other}`"),
                    ));
                }
            }
        }

        let taxi = taxi.ok_or(LoadError::MissingRecord {
            path: origin.to_path_buf(),
            what: "TAXI row",
        })?;
        if passengers.is_empty() {
            return Err(LoadError::MissingRecord {
                path: origin.to_path_buf(),
                what: "PASSENGER rows",
            });
        }

        Ok(Self {
            taxi,
            passengers,
            tokens,
        })
    }

    /// Highest tier any passenger asks for
    pub fn max_priority(&self) -> u32 {
        self.passengers.iter().map(|p| p.priority).max().unwrap_or(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Raining,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherWindow {
    pub weather: Weather,
    pub start_frame: u32,
    pub end_frame: u32,
}

/// Weather as a function of elapsed frames
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherSchedule {
    pub windows: Vec<WeatherWindow>,
}

impl WeatherSchedule {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        Self::parse(&text, path)
    }

    pub fn parse(text: &str, origin: impl AsRef<Path>) -> Result<Self, LoadError> {
        let origin = origin.as_ref();
        let mut windows = Vec::new();
        for (line_no, fields) in rows(text) {
            let row = Row {
                origin,
                line: line_no,
                fields: &fields,
            };
            row.expect_len(3)?;
            let weather = match fields[0] {
                "SUNNY" => Weather::Sunny,
                "RAINING" => Weather::Raining,
                other => {
                    return Err(LoadError::malformed(
                        origin,
                        line_no,
                        format!("unknown weather `{other}`"),
                    ));
                }
            };
            windows.push(WeatherWindow {
                weather,
                start_frame: row.parse(1, "start frame")?,
                end_frame: row.parse(2, "end frame")?,
            });
        }
        Ok(Self { windows })
    }

    /// First window covering `frame`, if any
    pub fn weather_at(&self, frame: u32) -> Option<Weather> {
        self.windows
            .iter()
            .find(|w| frame >= w.start_frame && frame < w.end_frame)
            .map(|w| w.weather)
    }
}

/// Non-blank rows as (1-based line number, trimmed fields)
fn rows(text: &str) -> impl Iterator<Item = (usize, Vec<&str>)> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| (i + 1, line.split(',').map(str::trim).collect()))
}

struct Row<'a> {
    origin: &'a Path,
    line: usize,
    fields: &'a [&'a str],
}

impl Row<'_> {
    fn expect_len(&self, len: usize) -> Result<(), LoadError> {
        if self.fields.len() < len {
            return Err(LoadError::malformed(
                self.origin,
                self.line,
                format!("expected {len} fields, found {}", self.fields.len()),
            ));
        }
        Ok(())
    }

    fn parse<T: std::str::FromStr>(&self, index: usize, what: &str) -> Result<T, LoadError> {
        let raw = self.fields.get(index).ok_or_else(|| {
            LoadError::malformed(self.origin, self.line, format!("missing {what}"))
        })?;
        raw.parse().map_err(|_| {
            LoadError::malformed(self.origin, self.line, format!("invalid {what} `{raw}`"))
        })
    }

    fn location(&self) -> Result<Location, LoadError> {
        self.expect_len(3)?;
        Ok(Location::new(self.parse(1, "x")?, self.parse(2, "y")?))
    }
}

/// Resolve a data file path relative to a base directory unless already absolute
pub fn resolve(base: &Path, file: &Path) -> PathBuf {
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        base.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_world_layout() {
        let text = "TAXI,480,450\nPASSENGER,360,300,3,620,200,1\nCOIN,480,-200\n\nINVINCIBLE_POWER,620,-1000\n";
        let layout = WorldLayout::parse(text, "world.csv").unwrap();
        assert_eq!(layout.taxi, Location::new(480.0, 450.0));
        assert_eq!(layout.passengers.len(), 1);
        let p = &layout.passengers[0];
        assert_eq!(p.priority, 3);
        assert_eq!(p.destination_x, 620.0);
        assert_eq!(p.travel_distance, 200.0);
        assert!(p.has_umbrella);
        assert_eq!(layout.tokens.len(), 2);
        assert_eq!(layout.tokens[1].kind, TokenKind::Invincibility);
    }

    #[test]
    fn test_shipped_world_parses() {
        let layout = WorldLayout::parse(include_str!("../res/world.csv"), "world.csv").unwrap();
        assert!(!layout.passengers.is_empty());
        assert!(layout.max_priority() <= 3);
    }

    #[test]
    fn test_missing_passengers_is_error() {
        let err = WorldLayout::parse("TAXI,1,2\n", "world.csv").unwrap_err();
        assert!(matches!(err, LoadError::MissingRecord { .. }));
    }

    #[test]
    fn test_missing_taxi_is_error() {
        let err = WorldLayout::parse("PASSENGER,1,2,1,3,4,0\n", "world.csv").unwrap_err();
        assert!(err.to_string().contains("TAXI"));
    }

    #[test]
    fn test_malformed_number_reports_line() {
        let err = WorldLayout::parse("TAXI,1,2\nPASSENGER,1,two,1,3,4,0\n", "world.csv").unwrap_err();
        match err {
            LoadError::Malformed { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("two"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_weather_lookup() {
        let schedule =
            WeatherSchedule::parse("SUNNY,0,100\nRAINING,100,200\n", "weather.csv").unwrap();
        assert_eq!(schedule.weather_at(0), Some(Weather::Sunny));
        assert_eq!(schedule.weather_at(99), Some(Weather::Sunny));
        assert_eq!(schedule.weather_at(100), Some(Weather::Raining));
        assert_eq!(schedule.weather_at(200), None);
    }

    #[test]
    fn test_unknown_weather_label() {
        assert!(WeatherSchedule::parse("FOGGY,0,10\n", "weather.csv").is_err());
    }
}
