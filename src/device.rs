use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Device {
    pub id: &'static str,
    password: &'static str,
    pub name: &'static str,
    pub location: &'static str,
}

/// Demo fixture, not a security boundary.
pub const DEVICES: [Device; 3] = [
    Device {
        id: "DEV001",
        password: "demo123",
        name: "Downtown Station",
        location: "City Center",
    },
    Device {
        id: "DEV002",
        password: "demo123",
        name: "Industrial Zone",
        location: "East District",
    },
    Device {
        id: "DEV003",
        password: "demo123",
        name: "Residential Area",
        location: "West Side",
    },
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    #[error("Invalid device ID or password")]
    InvalidCredentials,
}

pub fn authenticate(device_id: &str, password: &str) -> Result<&'static Device, LoginError> {
    DEVICES
        .iter()
        .find(|device| device.id == device_id && device.password == password)
        .ok_or(LoginError::InvalidCredentials)
}
