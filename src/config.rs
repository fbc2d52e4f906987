//! Listen address configuration

use std::net::SocketAddr;

use crate::error::ConfigError;

pub const DEFAULT_PORT: u16 = 8081;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
}

impl ServerConfig {
    /// Resolve the port from the raw `PORT` setting. Absent or empty falls
    /// back to [`DEFAULT_PORT`].
    pub fn from_port_setting(setting: Option<&str>) -> Result<Self, ConfigError> {
        let port = match setting {
            None | Some("") => DEFAULT_PORT,
            Some(value) => value.parse::<u16>().map_err(|source| ConfigError::InvalidPort {
                value: value.to_string(),
                source,
            })?,
        };
        Ok(Self { port })
    }

    /// Always binds all interfaces.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
