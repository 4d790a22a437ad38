use bitfield_struct::bitfield;

#[bitfield(u8)]
/// Represents the slave address of the HDC1000 sensor.
/// The base address is 0x40; the ADR0 and ADR1 pins select one of four
/// addresses in the range 0x40..=0x43, so up to four sensors can share a bus.
pub struct SlaveAddress {
    #[bits(1, default = false)]
    pub adr0: bool,
    #[bits(1, default = false)]
    pub adr1: bool,
    #[bits(6, default = 0x40 >> 2)]
    base: u8,
}

#[cfg(test)]
mod tests {
    use super::SlaveAddress;

    #[test]
    fn strap_pins_select_address() {
        assert_eq!(SlaveAddress::default().into_bits(), 0x40);
        assert_eq!(SlaveAddress::default().with_adr0(true).into_bits(), 0x41);
        assert_eq!(SlaveAddress::default().with_adr1(true).into_bits(), 0x42);
        assert_eq!(
            SlaveAddress::default()
                .with_adr0(true)
                .with_adr1(true)
                .into_bits(),
            0x43
        );
    }
}
