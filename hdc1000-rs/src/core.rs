use embedded_hal::{
    delay::DelayNs,
    i2c::{I2c, SevenBitAddress},
};

use crate::{
    Error,
    address::SlaveAddress,
    register::{
        Configuration, DeviceId, Hdc1000Register, Humidity, HumidityResolution, ManufacturerId,
        Measurement, SerialId, Temperature, TemperatureResolution,
    },
};

/// Settling time after a configuration write, covering the soft-reset cycle.
const CONFIG_SETTLE_MS: u32 = 15;
/// Number of discarded measurements performed by the heater drying routine.
const DRY_READ_COUNT: usize = 1000;
/// Pause between consecutive drying measurements.
const DRY_READ_GAP_MS: u32 = 1;

/// Represents the HDC1000 sensor.
pub struct Hdc1000 {
    pub(crate) address: u8,
    pub(crate) hres: HumidityResolution,
    pub(crate) tres: TemperatureResolution,
}

#[derive(Debug, Default)]
/// Builder for a HDC1000 sensor.
pub struct Hdc1000Builder {
    pub(crate) address: SlaveAddress,
    pub(crate) hres: HumidityResolution,
    pub(crate) tres: TemperatureResolution,
}

impl Hdc1000Builder {
    /// Set the address of the HDC1000 sensor.
    pub fn with_address(mut self, address: SlaveAddress) -> Self {
        self.address = address;
        self
    }

    /// Set the humidity resolution for the HDC1000 sensor.
    pub fn with_humidity_resolution(mut self, resolution: HumidityResolution) -> Self {
        self.hres = resolution;
        self
    }

    /// Set the temperature resolution for the HDC1000 sensor.
    pub fn with_temperature_resolution(mut self, resolution: TemperatureResolution) -> Self {
        self.tres = resolution;
        self
    }

    /// Build the HDC1000 sensor with the specified configuration.
    ///
    /// Issues a soft reset that also programs the requested acquisition
    /// settings, then verifies the manufacturer and device ID registers.
    /// Fails with [`Error::InvalidId`] when the chip on the bus is not an
    /// HDC1000 or HDC1050/HDC1080.
    pub fn build<T: I2c<SevenBitAddress>, D: DelayNs>(
        self,
        i2c: &mut T,
        delay: &mut D,
    ) -> Result<Hdc1000, Error<T::Error>> {
        let mut dev = Hdc1000 {
            address: self.address.into_bits(),
            hres: self.hres,
            tres: self.tres,
        };
        dev.reset(i2c, delay)?;
        ManufacturerId::default().read(&mut dev, i2c)?;
        DeviceId::default().read(&mut dev, i2c)?;
        Ok(dev)
    }
}

impl Hdc1000 {
    /// Get the current humidity and temperature resolutions.
    pub fn get_resolution(&self) -> (HumidityResolution, TemperatureResolution) {
        (self.hres, self.tres)
    }

    /// Get the address of the device.
    pub fn get_address(&self) -> u8 {
        self.address
    }

    /// Perform a soft reset of the HDC1000 sensor.
    ///
    /// The reset word also selects sequential acquisition mode and the
    /// driver's configured resolutions; the self-clearing reset bit is not
    /// polled, the fixed settling delay covers the reset cycle.
    pub fn reset<T: I2c<SevenBitAddress>, D: DelayNs>(
        &mut self,
        i2c: &mut T,
        delay: &mut D,
    ) -> Result<(), Error<T::Error>> {
        let conf = Configuration::default()
            .with_reset(true)
            .with_humidity_resolution(self.hres)
            .with_temperature_resolution(self.tres);
        self.write_config(i2c, delay, conf)
    }

    /// Read the configuration register.
    pub fn read_config<T: I2c<SevenBitAddress>>(
        &mut self,
        i2c: &mut T,
    ) -> Result<Configuration, Error<T::Error>> {
        let mut conf = Configuration::default();
        conf.read(self, i2c)?;
        Ok(conf)
    }

    /// Write the configuration register, then wait out the settling delay.
    pub fn write_config<T: I2c<SevenBitAddress>, D: DelayNs>(
        &mut self,
        i2c: &mut T,
        delay: &mut D,
        mut config: Configuration,
    ) -> Result<(), Error<T::Error>> {
        config.write(self, i2c)?;
        delay.delay_ms(CONFIG_SETTLE_MS);
        Ok(())
    }

    /// Set the humidity and temperature resolutions.
    pub fn set_resolution<T: I2c<SevenBitAddress>, D: DelayNs>(
        &mut self,
        i2c: &mut T,
        delay: &mut D,
        humidity_resolution: HumidityResolution,
        temperature_resolution: TemperatureResolution,
    ) -> Result<(), Error<T::Error>> {
        let conf = self
            .read_config(i2c)?
            .with_humidity_resolution(humidity_resolution)
            .with_temperature_resolution(temperature_resolution);
        self.write_config(i2c, delay, conf)?;
        let conf = self.read_config(i2c)?;
        self.hres = conf.humidity_resolution();
        self.tres = conf.temperature_resolution();
        Ok(())
    }

    /// Set the heater state of the HDC1000 sensor.
    pub fn set_heater<T: I2c<SevenBitAddress>, D: DelayNs>(
        &mut self,
        i2c: &mut T,
        delay: &mut D,
        enable: bool,
    ) -> Result<(), Error<T::Error>> {
        let conf = self.read_config(i2c)?.with_heater_enable(enable);
        self.write_config(i2c, delay, conf)
    }

    /// Get the heater state of the HDC1000 sensor.
    pub fn get_heater<T: I2c<SevenBitAddress>>(
        &mut self,
        i2c: &mut T,
    ) -> Result<bool, Error<T::Error>> {
        Ok(self.read_config(i2c)?.heater_enable())
    }

    /// Get the battery status flag; true when the supply is below 2.8 V.
    pub fn get_battery_low<T: I2c<SevenBitAddress>>(
        &mut self,
        i2c: &mut T,
    ) -> Result<bool, Error<T::Error>> {
        Ok(self.read_config(i2c)?.battery_low())
    }

    /// Get the 41-bit factory-programmed serial number of the sensor.
    pub fn get_serial<T: I2c<SevenBitAddress>>(
        &mut self,
        i2c: &mut T,
    ) -> Result<u64, Error<T::Error>> {
        let mut serial = SerialId::default();
        serial.read(self, i2c)?;
        Ok(serial.value())
    }

    /// Trigger a sequential acquisition, wait out the conversion time, and
    /// read back both channels in a single 4-byte transfer.
    pub fn measure<T: I2c<SevenBitAddress>, D: DelayNs>(
        &mut self,
        i2c: &mut T,
        delay: &mut D,
    ) -> Result<(Temperature, Humidity), Error<T::Error>> {
        let mut m = Measurement::default();
        m.write(self, i2c)?;
        delay.delay_us(self.tres.conversion_time() + self.hres.conversion_time());
        m.read(self, i2c)?;
        Ok((m.temperature, m.humidity))
    }

    /// Read the current temperature.
    ///
    /// Performs a full combined acquisition and discards the humidity half.
    pub fn read_temperature<T: I2c<SevenBitAddress>, D: DelayNs>(
        &mut self,
        i2c: &mut T,
        delay: &mut D,
    ) -> Result<Temperature, Error<T::Error>> {
        let (temperature, _) = self.measure(i2c, delay)?;
        Ok(temperature)
    }

    /// Read the current relative humidity.
    ///
    /// Performs a full combined acquisition and discards the temperature half.
    pub fn read_humidity<T: I2c<SevenBitAddress>, D: DelayNs>(
        &mut self,
        i2c: &mut T,
        delay: &mut D,
    ) -> Result<Humidity, Error<T::Error>> {
        let (_, humidity) = self.measure(i2c, delay)?;
        Ok(humidity)
    }

    /// Drive condensation off the sensing element with the on-chip heater.
    ///
    /// Saves the current configuration, switches to reset + heater +
    /// sequential 14-bit/14-bit acquisition, performs 1000 discarded
    /// measurements, then restores the saved configuration with the reset
    /// bit forced set. Blocks the caller for on the order of ten seconds.
    pub fn dry_sensor<T: I2c<SevenBitAddress>, D: DelayNs>(
        &mut self,
        i2c: &mut T,
        delay: &mut D,
    ) -> Result<(), Error<T::Error>> {
        let orig = self.read_config(i2c)?;
        let drying = Configuration::default()
            .with_reset(true)
            .with_heater_enable(true)
            .with_humidity_resolution(HumidityResolution::FourteenBit)
            .with_temperature_resolution(TemperatureResolution::FourteenBit);
        self.write_config(i2c, delay, drying)?;
        let conversion = TemperatureResolution::FourteenBit.conversion_time()
            + HumidityResolution::FourteenBit.conversion_time();
        let mut m = Measurement::default();
        for _ in 0..DRY_READ_COUNT {
            m.write(self, i2c)?;
            delay.delay_us(conversion);
            m.read(self, i2c)?;
            delay.delay_ms(DRY_READ_GAP_MS);
        }
        self.write_config(i2c, delay, orig.with_reset(true))
    }

    /// Get the builder for the HDC1000 sensor.
    /// This allows re-initializing the driver on the same bus.
    pub fn to_builder(self) -> Hdc1000Builder {
        Hdc1000Builder {
            address: SlaveAddress::from_bits(self.address),
            hres: self.hres,
            tres: self.tres,
        }
    }
}
