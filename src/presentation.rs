//! Display-only facts derived from the clock and the room list.
//!
//! Nothing here touches stored data; it mirrors what the dashboard computes
//! before rendering cards.

use std::collections::HashSet;
use std::fmt;

use chrono::{Datelike, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::Room;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shift {
    Matutino,
    Vespertino,
    Noturno,
}

impl Shift {
    pub const ALL: [Shift; 3] = [Shift::Matutino, Shift::Vespertino, Shift::Noturno];

    /// 06:00–11:59 morning, 12:00–17:59 afternoon, everything else night.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => Shift::Matutino,
            12..=17 => Shift::Vespertino,
            _ => Shift::Noturno,
        }
    }

    pub fn current(now: &impl Timelike) -> Self {
        Self::from_hour(now.hour())
    }

    pub fn label(self) -> &'static str {
        match self {
            Shift::Matutino => "Matutino",
            Shift::Vespertino => "Vespertino",
            Shift::Noturno => "Noturno",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|shift| shift.label() == label)
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Domingo",
        Weekday::Mon => "Segunda",
        Weekday::Tue => "Terça",
        Weekday::Wed => "Quarta",
        Weekday::Thu => "Quinta",
        Weekday::Fri => "Sexta",
        Weekday::Sat => "Sábado",
    }
}

pub fn current_weekday(now: &impl Datelike) -> &'static str {
    weekday_name(now.weekday())
}

/// Illustrative sky for the card header. Not a forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Clear,
    Cloudy,
    Night,
}

impl Weather {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=11 => Weather::Clear,
            12..=17 if hour % 2 == 0 => Weather::Clear,
            12..=17 => Weather::Cloudy,
            _ => Weather::Night,
        }
    }

    pub fn current(now: &impl Timelike) -> Self {
        Self::from_hour(now.hour())
    }
}

pub const FALLBACK_COLOR: &str = "bg-gray-500";

/// Background class for a shift badge; unknown shift labels get [`FALLBACK_COLOR`].
pub fn shift_color(weather: Weather, turno: &str) -> &'static str {
    let Some(shift) = Shift::parse(turno) else {
        return FALLBACK_COLOR;
    };

    match (weather, shift) {
        (Weather::Clear, Shift::Matutino) => "bg-yellow-400",
        (Weather::Clear, Shift::Vespertino) => "bg-orange-500",
        (Weather::Clear, Shift::Noturno) => "bg-indigo-700",
        (Weather::Cloudy, Shift::Matutino) => "bg-blue-300",
        (Weather::Cloudy, Shift::Vespertino) => "bg-gray-400",
        (Weather::Cloudy, Shift::Noturno) => "bg-gray-700",
        (Weather::Night, Shift::Matutino) => "bg-indigo-400",
        (Weather::Night, Shift::Vespertino) => "bg-indigo-600",
        (Weather::Night, Shift::Noturno) => "bg-indigo-900",
    }
}

pub fn status_label(status: bool) -> &'static str {
    if status { "Aberto" } else { "Fechado" }
}

pub fn status_color(status: bool) -> &'static str {
    if status { "bg-green-500" } else { "bg-red-500" }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomMatch {
    Exact(String),
    /// Case-insensitive substring, as typed into the search box.
    Contains(String),
}

impl RoomMatch {
    fn matches(&self, sala_aula: &str) -> bool {
        match self {
            RoomMatch::Exact(wanted) => sala_aula == wanted,
            RoomMatch::Contains(needle) => sala_aula
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }
}

/// Every criterion left as `None` matches all rooms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomFilter {
    pub weekday: Option<String>,
    pub shift: Option<String>,
    pub room: Option<RoomMatch>,
    pub status: Option<bool>,
}

impl RoomFilter {
    /// Preset used on first load and by the "current time" button.
    pub fn for_now<T: Datelike + Timelike>(now: &T) -> Self {
        let mut filter = Self::default();
        filter.use_time_of(now);
        filter
    }

    /// Replaces weekday and shift, keeping the other criteria.
    pub fn use_time_of<T: Datelike + Timelike>(&mut self, now: &T) {
        self.weekday = Some(current_weekday(now).to_string());
        self.shift = Some(Shift::current(now).label().to_string());
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, room: &Room) -> bool {
        let weekday_ok = self
            .weekday
            .as_deref()
            .is_none_or(|day| room.dias_semana.iter().any(|d| d == day));
        let shift_ok = self.shift.as_deref().is_none_or(|s| room.turno == s);
        let room_ok = self.room.as_ref().is_none_or(|m| m.matches(&room.sala_aula));
        let status_ok = self.status.is_none_or(|s| room.status == s);

        weekday_ok && shift_ok && room_ok && status_ok
    }

    pub fn apply<'a>(&self, rooms: &'a [Room]) -> Vec<&'a Room> {
        rooms.iter().filter(|room| self.matches(room)).collect()
    }
}

/// Shift labels in first-seen order, for the filter dropdown.
pub fn unique_shifts(rooms: &[Room]) -> Vec<&str> {
    unique_by(rooms, |room| room.turno.as_str())
}

/// Room labels in first-seen order, for the filter dropdown.
pub fn unique_rooms(rooms: &[Room]) -> Vec<&str> {
    unique_by(rooms, |room| room.sala_aula.as_str())
}

fn unique_by<'a>(rooms: &'a [Room], key: impl Fn(&'a Room) -> &'a str) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    rooms
        .iter()
        .map(key)
        .filter(|value| seen.insert(*value))
        .collect()
}
