//! socdrv simulator: drives both drivers against simulated hardware.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Simulated host: poll timer · ioctl calls · PM events    │
//! │                                                          │
//! │  Nunchuck ──▶ SimNunchuck (I2C)   LogInputSink           │
//! │  TegraWdt ──▶ SimRegisters (MMIO) WatchdogDevice         │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Run with `RUST_LOG=debug cargo run --features sim`.

use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use log::info;

use socdrv::adapters::log_sink::LogInputSink;
use socdrv::adapters::sim::{SimMapper, SimNunchuck};
use socdrv::app::commands::{WatchdogCommand, WatchdogReply};
use socdrv::app::ports::{PolledInput, WatchdogOps};
use socdrv::config::DriverConfig;
use socdrv::drivers::nunchuck::{self, Nunchuck};
use socdrv::drivers::tegra_wdt;
use socdrv::platform::{MemResource, PlatformDevice, Resource};
use socdrv::registry::InstanceRegistry;

/// Number of poll ticks to simulate.
const SIM_TICKS: u32 = 60;

/// Poll ticks between two keepalive pings; at least one.
fn ticks_per_second(poll_interval: Duration) -> u32 {
    (1000 / poll_interval.as_millis().max(1)).max(1) as u32
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = DriverConfig::default();
    if let Err(msg) = config.validate() {
        bail!("invalid configuration: {msg}");
    }

    // ── Watchdog ──────────────────────────────────────────────
    let pdev = PlatformDevice::new(tegra_wdt::DRIVER_NAME, 0)
        .with_resource(Resource::Mem(MemResource::new(0x6000_5100, 0x20)))
        .with_resource(Resource::Mem(MemResource::new(0x6000_5088, 0x8)))
        .with_resource(Resource::Irq(32));
    let mut mapper = SimMapper::new();
    let mut registry = InstanceRegistry::new();
    let ordinal = tegra_wdt::probe(&pdev, &config.watchdog, &mut mapper, &mut registry)
        .context("watchdog probe failed")?;

    // ── Nunchuck ──────────────────────────────────────────────
    let mut sink = LogInputSink::new();
    let bus = SimNunchuck::new(config.nunchuck.address);
    let mut chuck = Nunchuck::probe(nunchuck::DEVICE_ID, bus, &config.nunchuck, &mut sink)
        .context("nunchuck probe failed")?;
    let poll_interval = chuck.device_info().poll_interval;
    chuck.open();

    let wdd = registry
        .get_mut(ordinal)
        .context("watchdog vanished from registry")?;
    wdd.open()?;
    if let WatchdogReply::Timeout(t) = wdd.ioctl(WatchdogCommand::GetTimeout)? {
        info!("sim: watchdog armed, timeout {t}s");
    }

    let ping_every = ticks_per_second(poll_interval);
    for tick in 0..SIM_TICKS {
        // Sweep the stick and toggle buttons so the log shows movement.
        let bus = chuck.bus_mut();
        bus.sample[0] = 30 + ((tick * 7) % 190) as u8;
        bus.sample[1] = 40 + ((tick * 5) % 160) as u8;
        bus.sample[5] = if (tick / 10) % 2 == 0 { 0xff } else { 0xfc };

        chuck.poll(&mut sink);

        if tick % ping_every == 0 {
            wdd.ioctl(WatchdogCommand::KeepAlive)?;
        }
        thread::sleep(poll_interval);
    }

    // ── Suspend / resume ──────────────────────────────────────
    wdd.ioctl(WatchdogCommand::SetTimeout(42))?;
    wdd.suspend()?;
    info!("sim: suspended, armed={}", wdd.driver().is_armed());
    wdd.resume()?;
    info!(
        "sim: resumed, armed={} timeout={}s",
        wdd.driver().is_armed(),
        wdd.timeout()
    );

    // ── Magic close and unbind ────────────────────────────────
    wdd.write(b"V")?;
    wdd.release()?;
    info!("sim: magic close, active={}", wdd.is_active());

    tegra_wdt::remove(ordinal, &mut mapper, &mut registry)?;
    info!("sim: done, {} windows still mapped", mapper.live().len());
    Ok(())
}
