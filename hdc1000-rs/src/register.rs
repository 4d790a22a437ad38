//! Register map of the HDC1000.
//!
//! Pointer addresses: 0x00 temperature, 0x01 humidity, 0x02 configuration,
//! 0xFB..=0xFD serial ID fragments, 0xFE manufacturer ID, 0xFF device ID.
//! In sequential acquisition mode a trigger written to 0x00 measures both
//! channels, and the humidity register is read out in the same transfer as
//! the temperature register.

use bitfield_struct::bitfield;
use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::{Error, core::Hdc1000};

pub(crate) const TI_MANUFACTURER_ID: u16 = 0x5449; // "TI"
pub(crate) const HDC1000_DEVICE_ID: u16 = 0x1000;
pub(crate) const HDC1050_DEVICE_ID: u16 = 0x1050; // also reported by the HDC1080

pub(crate) trait Hdc1000Register: Default {
    const ADDRESS: u8;
    const REGISTER_LEN: usize;

    fn read<T: I2c<SevenBitAddress>>(
        &mut self,
        dev: &mut Hdc1000,
        i2c: &mut T,
    ) -> Result<(), Error<T::Error>>;
    fn write<T: I2c<SevenBitAddress>>(
        &mut self,
        _dev: &mut Hdc1000,
        _i2c: &mut T,
    ) -> Result<(), Error<T::Error>> {
        Err(Error::ReadOnly)
    }
}

#[derive(Debug, Default, Clone, Copy)]
/// Represents a raw temperature measurement from the HDC1000 sensor.
pub struct Temperature {
    pub(crate) value: u16,
}

impl Temperature {
    /// Converts the raw temperature value to Celsius.
    pub fn celsius(&self) -> f32 {
        (self.value as f32 / 65536.0) * 165.0 - 40.0
    }

    /// The raw 16-bit register value.
    pub fn raw(&self) -> u16 {
        self.value
    }
}

#[derive(Debug, Default, Clone, Copy)]
/// Represents a raw humidity measurement from the HDC1000 sensor.
pub struct Humidity {
    pub(crate) value: u16,
}

impl Humidity {
    /// Converts the raw humidity value to percent relative humidity.
    pub fn percent(&self) -> f32 {
        (self.value as f32 / 65536.0) * 100.0
    }

    /// The raw 16-bit register value.
    pub fn raw(&self) -> u16 {
        self.value
    }
}

#[derive(Debug, Default)]
/// A combined sequential-mode measurement of temperature and humidity.
pub struct Measurement {
    /// The temperature half of the 4-byte readout.
    pub temperature: Temperature,
    /// The humidity half of the 4-byte readout.
    pub humidity: Humidity,
}

impl Hdc1000Register for Measurement {
    const ADDRESS: u8 = 0x00;
    const REGISTER_LEN: usize = 4;

    /// Reads the 4-byte result of a previously triggered acquisition.
    /// The chip NAKs while converting, so the caller must wait out the
    /// conversion time between trigger and read.
    fn read<T: I2c<SevenBitAddress>>(
        &mut self,
        dev: &mut Hdc1000,
        i2c: &mut T,
    ) -> Result<(), Error<T::Error>> {
        let mut buffer = [0u8; Self::REGISTER_LEN];
        i2c.read(dev.address, &mut buffer)?;
        self.temperature.value = u16::from_be_bytes([buffer[0], buffer[1]]);
        self.humidity.value = u16::from_be_bytes([buffer[2], buffer[3]]);
        Ok(())
    }

    /// Writes the register pointer, triggering a sequential acquisition.
    fn write<T: I2c<SevenBitAddress>>(
        &mut self,
        dev: &mut Hdc1000,
        i2c: &mut T,
    ) -> Result<(), Error<T::Error>> {
        i2c.write(dev.address, &[Self::ADDRESS])?;
        Ok(())
    }
}

#[bitfield(u16)]
/// The 16-bit configuration register, transferred MSB first.
pub struct Configuration {
    #[bits(8, default = 0x0, access = RO)]
    rsvd: u8,
    #[bits(2, default = HumidityResolution::FourteenBit)]
    pub humidity_resolution: HumidityResolution,
    #[bits(1, default = TemperatureResolution::FourteenBit)]
    pub temperature_resolution: TemperatureResolution,
    #[bits(1, access = RO)]
    pub battery_low: bool,
    #[bits(1, default = AcquisitionMode::Sequential)]
    pub mode: AcquisitionMode,
    #[bits(1, default = false)]
    pub heater_enable: bool,
    #[bits(1, default = false, access = RO)]
    rsvd2: bool,
    #[bits(1, default = false)]
    pub reset: bool,
}

impl Hdc1000Register for Configuration {
    const ADDRESS: u8 = 0x02;
    const REGISTER_LEN: usize = 2;

    fn read<T: I2c<SevenBitAddress>>(
        &mut self,
        dev: &mut Hdc1000,
        i2c: &mut T,
    ) -> Result<(), Error<T::Error>> {
        let mut buffer = [0u8; Self::REGISTER_LEN];
        i2c.write_read(dev.address, &[Self::ADDRESS], &mut buffer)?;
        *self = u16::from_be_bytes(buffer).into();
        Ok(())
    }

    fn write<T: I2c<SevenBitAddress>>(
        &mut self,
        dev: &mut Hdc1000,
        i2c: &mut T,
    ) -> Result<(), Error<T::Error>> {
        let buffer = self.into_bits().to_be_bytes();
        i2c.write(dev.address, &[Self::ADDRESS, buffer[0], buffer[1]])?;
        Ok(())
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Acquisition mode for the HDC1000 sensor.
pub enum AcquisitionMode {
    /// Only the addressed channel is acquired per trigger.
    Single = 0b0,
    #[default]
    /// Temperature is acquired, then humidity, from a single trigger.
    Sequential = 0b1,
}

impl AcquisitionMode {
    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits {
            0b0 => AcquisitionMode::Single,
            0b1 => AcquisitionMode::Sequential,
            _ => panic!("Invalid AcquisitionMode bits"),
        }
    }

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            AcquisitionMode::Single => 0b0,
            AcquisitionMode::Sequential => 0b1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
/// Humidity measurement resolution for the HDC1000 sensor.
pub enum HumidityResolution {
    /// 8-bit resolution, with a conversion time of 2.5 milliseconds.
    EightBit = 0b10,
    /// 11-bit resolution, with a conversion time of 3.85 milliseconds.
    ElevenBit = 0b01,
    #[default]
    /// 14-bit resolution, with a conversion time of 6.5 milliseconds.
    FourteenBit = 0b00,
}

impl HumidityResolution {
    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits {
            0b10 => HumidityResolution::EightBit,
            0b01 => HumidityResolution::ElevenBit,
            0b00 => HumidityResolution::FourteenBit,
            _ => panic!("Invalid HumidityResolution bits"),
        }
    }

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            HumidityResolution::EightBit => 0b10,
            HumidityResolution::ElevenBit => 0b01,
            HumidityResolution::FourteenBit => 0b00,
        }
    }

    /// Returns the conversion time in microseconds for the given humidity resolution.
    pub(crate) fn conversion_time(self) -> u32 {
        match self {
            HumidityResolution::EightBit => 2500,
            HumidityResolution::ElevenBit => 3850,
            HumidityResolution::FourteenBit => 6500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
/// Temperature measurement resolution for the HDC1000 sensor.
pub enum TemperatureResolution {
    /// 11-bit resolution, with a conversion time of 3.65 milliseconds.
    ElevenBit = 0b1,
    #[default]
    /// 14-bit resolution, with a conversion time of 6.35 milliseconds.
    FourteenBit = 0b0,
}

impl TemperatureResolution {
    pub(crate) const fn from_bits(bits: u8) -> Self {
        match bits {
            0b1 => TemperatureResolution::ElevenBit,
            0b0 => TemperatureResolution::FourteenBit,
            _ => panic!("Invalid TemperatureResolution bits"),
        }
    }

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            TemperatureResolution::ElevenBit => 0b1,
            TemperatureResolution::FourteenBit => 0b0,
        }
    }

    /// Returns the conversion time in microseconds for the given temperature resolution.
    pub(crate) fn conversion_time(self) -> u32 {
        match self {
            TemperatureResolution::ElevenBit => 3650,
            TemperatureResolution::FourteenBit => 6350,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct SerialId(u64);

impl SerialId {
    /// The 41-bit factory-programmed serial number.
    pub(crate) fn value(&self) -> u64 {
        self.0
    }
}

impl Hdc1000Register for SerialId {
    const ADDRESS: u8 = 0xFB;
    const REGISTER_LEN: usize = 2;

    /// The serial spans three consecutive 16-bit registers: bits 40:25,
    /// 24:9, and 8:0 (left-aligned in the last fragment).
    fn read<T: I2c<SevenBitAddress>>(
        &mut self,
        dev: &mut Hdc1000,
        i2c: &mut T,
    ) -> Result<(), Error<T::Error>> {
        let mut fragments = [0u16; 3];
        for (i, fragment) in fragments.iter_mut().enumerate() {
            let mut buffer = [0u8; Self::REGISTER_LEN];
            i2c.write_read(dev.address, &[Self::ADDRESS + i as u8], &mut buffer)?;
            *fragment = u16::from_be_bytes(buffer);
        }
        self.0 = (fragments[0] as u64) << 25
            | (fragments[1] as u64) << 9
            | (fragments[2] as u64) >> 7;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub(crate) struct ManufacturerId(u16);

impl Hdc1000Register for ManufacturerId {
    const ADDRESS: u8 = 0xFE;
    const REGISTER_LEN: usize = 2;

    fn read<T: I2c<SevenBitAddress>>(
        &mut self,
        dev: &mut Hdc1000,
        i2c: &mut T,
    ) -> Result<(), Error<T::Error>> {
        let mut buffer = [0u8; Self::REGISTER_LEN];
        i2c.write_read(dev.address, &[Self::ADDRESS], &mut buffer)?;
        self.0 = u16::from_be_bytes(buffer);
        if self.0 != TI_MANUFACTURER_ID {
            return Err(Error::InvalidId);
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub(crate) struct DeviceId(u16);

impl Hdc1000Register for DeviceId {
    const ADDRESS: u8 = 0xFF;
    const REGISTER_LEN: usize = 2;

    fn read<T: I2c<SevenBitAddress>>(
        &mut self,
        dev: &mut Hdc1000,
        i2c: &mut T,
    ) -> Result<(), Error<T::Error>> {
        let mut buffer = [0u8; Self::REGISTER_LEN];
        i2c.write_read(dev.address, &[Self::ADDRESS], &mut buffer)?;
        self.0 = u16::from_be_bytes(buffer);
        if self.0 != HDC1000_DEVICE_ID && self.0 != HDC1050_DEVICE_ID {
            return Err(Error::InvalidId);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_hal_mock::eh1::i2c::Mock as I2cMock;

    use super::*;

    #[test]
    fn default_and_reset_configuration_words() {
        // Sequential mode, 14-bit temperature and humidity.
        assert_eq!(Configuration::default().into_bits(), 0x1000);
        assert_eq!(Configuration::default().with_reset(true).into_bits(), 0x9000);
    }

    #[test]
    fn configuration_field_layout() {
        let cfg = Configuration::from(0x0200u16);
        assert_eq!(cfg.humidity_resolution(), HumidityResolution::EightBit);
        let cfg = Configuration::from(0x0400u16);
        assert_eq!(cfg.temperature_resolution(), TemperatureResolution::ElevenBit);
        let cfg = Configuration::from(0x0800u16);
        assert!(cfg.battery_low());
        let cfg = Configuration::from(0x2000u16);
        assert!(cfg.heater_enable());
        let cfg = Configuration::from(0x0000u16);
        assert_eq!(cfg.mode(), AcquisitionMode::Single);
    }

    #[test]
    fn transfer_functions() {
        let t = Temperature { value: 0x6000 };
        assert_eq!(t.celsius(), 21.875);
        let t = Temperature { value: 0 };
        assert_eq!(t.celsius(), -40.0);
        let h = Humidity { value: 0x8000 };
        assert_eq!(h.percent(), 50.0);
        let h = Humidity { value: 0 };
        assert_eq!(h.percent(), 0.0);
    }

    #[test]
    fn identity_registers_reject_writes() {
        let mut dev = Hdc1000 {
            address: 0x40,
            hres: HumidityResolution::default(),
            tres: TemperatureResolution::default(),
        };
        let mut i2c = I2cMock::new(&[]);
        assert!(matches!(
            ManufacturerId::default().write(&mut dev, &mut i2c),
            Err(Error::ReadOnly)
        ));
        assert!(matches!(
            DeviceId::default().write(&mut dev, &mut i2c),
            Err(Error::ReadOnly)
        ));
        i2c.done();
    }
}
