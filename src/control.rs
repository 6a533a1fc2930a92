//! HTTP control routes.
//!
//! Only request parsing lives here; the board's HTTP server hands over the
//! path and the raw query string and applies the resulting command with
//! [`SystemState::dispatch`](crate::system::SystemState::dispatch).

use core::fmt;

use crate::motor::ControlData;

const ROUTE_CONNECT: &str = "/con";
const ROUTE_DISCONNECT: &str = "/dis";
const ROUTE_MOVE: &str = "/mov";
const ROUTE_LED: &str = "/led";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// Controller connected, show the idle animation
    Connect,
    /// Controller left, turn the lights off
    Disconnect,
    Move(ControlData),
    /// Select a theme color by number
    SetColor(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlError {
    UnknownRoute,
    MissingParameter(&'static str),
    InvalidParameter(&'static str),
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownRoute => f.write_str("unknown route"),
            Self::MissingParameter(name) => write!(f, "missing query parameter {}", name),
            Self::InvalidParameter(name) => write!(f, "invalid query parameter {}", name),
        }
    }
}

impl ControlCommand {
    /// Parse a request path and its query string (without the `?`)
    pub fn parse(path: &str, query: &str) -> Result<Self, ControlError> {
        match path {
            ROUTE_CONNECT => Ok(Self::Connect),
            ROUTE_DISCONNECT => Ok(Self::Disconnect),
            ROUTE_MOVE => Ok(Self::Move(ControlData::new(
                param(query, "X")?,
                param(query, "Y")?,
                param(query, "L")?,
                param(query, "R")?,
            ))),
            ROUTE_LED => Ok(Self::SetColor(param(query, "color")?)),
            _ => Err(ControlError::UnknownRoute),
        }
    }
}

/// Find `name` in `query` and parse its value
fn param<T: core::str::FromStr>(query: &str, name: &'static str) -> Result<T, ControlError> {
    let value = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find_map(|(key, value)| (key == name).then_some(value))
        .ok_or(ControlError::MissingParameter(name))?;
    value
        .parse()
        .map_err(|_| ControlError::InvalidParameter(name))
}
