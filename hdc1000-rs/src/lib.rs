#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
//!# HDC1000 - Driver for the Texas Instruments HDC1000/HDC1050 Humidity and Temperature Sensor
//! This crate provides a driver for the HDC1000 family of sensors, allowing you to read
//! humidity and temperature data over I2C.
//! The sensor is acquired in sequential mode: a single trigger measures temperature and
//! humidity back to back, and both results are read out in one 4-byte transfer.
//! Configuration such as measurement resolution, the on-chip heater, and the battery
//! status flag are exposed through the 16-bit configuration register.
mod address;
mod core;
mod error;
mod register;

pub use address::SlaveAddress;
pub use error::Error;
pub use register::{
    AcquisitionMode, Configuration, Humidity, HumidityResolution, Measurement, Temperature,
    TemperatureResolution,
};

pub use crate::core::{Hdc1000, Hdc1000Builder};
