#[derive(Debug)]
/// Represents errors that can occur while interacting with the HDC1000 sensor.
pub enum Error<E> {
    /// An error occurred while communicating with the I2C bus.
    I2c(E),
    /// The manufacturer or device ID register did not match a known part.
    InvalidId,
    /// Attempted to write to a register that is not writable.
    ReadOnly,
}

impl<E> From<E> for Error<E> {
    fn from(e: E) -> Self {
        Error::I2c(e)
    }
}
