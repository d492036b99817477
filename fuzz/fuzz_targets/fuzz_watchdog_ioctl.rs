//! Fuzz target: watchdog device node
//!
//! Drives arbitrary open / write / ioctl / close / suspend sequences against
//! a Tegra watchdog on simulated registers and verifies:
//! - No panics for any request number or argument
//! - The timeout always stays within [5, 1000] seconds
//! - With nowayout set, an active watchdog never becomes inactive
//!
//! cargo fuzz run fuzz_watchdog_ioctl

#![no_main]

use libfuzzer_sys::fuzz_target;
use socdrv::adapters::sim::SimMapper;
use socdrv::app::commands::WatchdogCommand;
use socdrv::config::{MAX_WDT_TIMEOUT, MIN_WDT_TIMEOUT, WatchdogParams};
use socdrv::drivers::tegra_wdt;
use socdrv::platform::{MemResource, PlatformDevice, Resource};
use socdrv::registry::InstanceRegistry;

fuzz_target!(|data: &[u8]| {
    let Some((&flags, ops)) = data.split_first() else {
        return;
    };
    let nowayout = flags & 1 != 0;

    let pdev = PlatformDevice::new(tegra_wdt::DRIVER_NAME, -1)
        .with_resource(Resource::Mem(MemResource::new(0x6000_5100, 0x20)))
        .with_resource(Resource::Mem(MemResource::new(0x6000_5088, 0x8)))
        .with_resource(Resource::Irq(32));
    let params = WatchdogParams {
        heartbeat: u32::from(flags >> 1) * 8,
        nowayout,
    };
    let mut mapper = SimMapper::new();
    let mut registry = InstanceRegistry::new();
    let Ok(ordinal) = tegra_wdt::probe(&pdev, &params, &mut mapper, &mut registry) else {
        return;
    };
    let Some(wdd) = registry.get_mut(ordinal) else {
        return;
    };

    for op in ops.chunks(3) {
        let was_active = wdd.is_active();
        let arg = u32::from(op.get(1).copied().unwrap_or(0)) * 5
            + u32::from(op.get(2).copied().unwrap_or(0));
        let _ = match op[0] % 6 {
            0 => wdd.open(),
            1 => wdd.write(&op[1..]).map(|_| ()),
            2 => wdd.release(),
            3 => wdd.suspend().and_then(|()| wdd.resume()),
            _ => match WatchdogCommand::decode(op[0] >> 3, arg) {
                Some(cmd) => wdd.ioctl(cmd).map(|_| ()),
                None => Ok(()),
            },
        };

        assert!((MIN_WDT_TIMEOUT..=MAX_WDT_TIMEOUT).contains(&wdd.timeout()));
        if nowayout && was_active {
            assert!(wdd.is_active(), "nowayout watchdog was stopped");
        }
    }

    let _ = tegra_wdt::remove(ordinal, &mut mapper, &mut registry);
    assert!(mapper.live().is_empty());
});
