use std::time::{Duration, Instant};

use clap::Parser;
use hdc1000::{Hdc1000Builder, SlaveAddress};
use linux_embedded_hal::{Delay, I2cdev};

/// Poll HDC1000/HDC1050 sensors on a Linux I2C bus
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to I2C bus (e.g., /dev/i2c-1)
    #[arg(short, long)]
    path: String,
    /// Seconds between polls
    #[arg(short, long, default_value_t = 1)]
    interval: u64,
    /// Run the heater drying routine on each sensor before polling
    #[arg(long, default_value_t = false)]
    dry: bool,
}

fn main() {
    // Initialize the logger
    env_logger::init();
    // Parse command line arguments
    let args = Args::parse();
    run(args);
}

fn run(args: Args) {
    println!("[HDC] Opening bus: {}", args.path);
    // Open the I2C bus
    let mut i2c = I2cdev::new(&args.path).expect("Failed to open I2C device");
    let mut delay = Delay;
    // Probe all four strap addresses
    let addrs = [
        SlaveAddress::default(),
        SlaveAddress::default().with_adr0(true),
        SlaveAddress::default().with_adr1(true),
        SlaveAddress::default().with_adr0(true).with_adr1(true),
    ];
    let mut sensors = addrs
        .iter()
        .filter_map(|addr| {
            match Hdc1000Builder::default()
                .with_address(*addr)
                .build(&mut i2c, &mut delay)
            {
                Ok(mut hdc) => {
                    match hdc.get_serial(&mut i2c) {
                        Ok(serial) => println!(
                            "[HDC] Device found at address {:02x}, serial {serial:010x}",
                            hdc.get_address()
                        ),
                        Err(e) => log::warn!(
                            "[HDC] Sensor 0x{:02x}: Could not read serial: {e:?}",
                            hdc.get_address()
                        ),
                    }
                    Some(hdc)
                }
                Err(e) => {
                    log::warn!("[HDC] Address {:02x} not found: {e:?}", addr.into_bits());
                    None
                }
            }
        })
        .collect::<Vec<_>>();

    println!("[HDC] Devices found: {}", sensors.len());

    if args.dry {
        for hdc in sensors.iter_mut() {
            log::info!(
                "[HDC] Sensor 0x{:02x}: Running heater drying routine...",
                hdc.get_address()
            );
            if let Err(e) = hdc.dry_sensor(&mut i2c, &mut delay) {
                log::warn!(
                    "[HDC] Sensor 0x{:02x}: Drying failed: {e:?}",
                    hdc.get_address()
                );
            }
        }
    }

    let interval = Duration::from_secs(args.interval);
    loop {
        let start = Instant::now();
        for hdc in sensors.iter_mut() {
            match hdc.measure(&mut i2c, &mut delay) {
                Ok((temperature, humidity)) => log::info!(
                    "[HDC] Sensor 0x{:02x}: {:.2} C, {:.2}%",
                    hdc.get_address(),
                    temperature.celsius(),
                    humidity.percent()
                ),
                Err(e) => log::warn!(
                    "[HDC] Sensor 0x{:02x}: Error reading: {e:?}",
                    hdc.get_address()
                ),
            }
            match hdc.get_battery_low(&mut i2c) {
                Ok(true) => log::warn!(
                    "[HDC] Sensor 0x{:02x}: Supply voltage below 2.8 V",
                    hdc.get_address()
                ),
                Ok(false) => {}
                Err(e) => log::warn!(
                    "[HDC] Sensor 0x{:02x}: Error reading battery flag: {e:?}",
                    hdc.get_address()
                ),
            }
        }
        log::info!(
            "[HDC] Read {} sensors in {:.2} ms.",
            sensors.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        if start.elapsed() < interval {
            std::thread::sleep(interval - start.elapsed());
        }
    }
}
