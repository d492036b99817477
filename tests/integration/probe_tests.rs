//! Integration tests: platform probe / remove of the Tegra watchdog.

use super::mock_hw::{SimRegistry, TMR_BASE, WDT_BASE, probed_watchdog, tegra_pdev};

use socdrv::adapters::sim::SimMapper;
use socdrv::app::ports::{RegisterIo, WatchdogOps};
use socdrv::config::WatchdogParams;
use socdrv::drivers::tegra_regs::{
    TIMER_PCR, TIMER_PCR_INTR, TIMER_PTV, WDT_CFG, WDT_CFG_SOURCE_MASK, WDT_CMD,
    WDT_CMD_DISABLE_COUNTER, WDT_UNLOCK, WDT_UNLOCK_PATTERN,
};
use socdrv::drivers::tegra_wdt::{self, DRIVER_NAME};
use socdrv::error::Error;
use socdrv::platform::{MemResource, PlatformDevice, Resource};

fn probe(pdev: &PlatformDevice, mapper: &mut SimMapper, registry: &mut SimRegistry) -> Result<usize, Error> {
    tegra_wdt::probe(pdev, &WatchdogParams::default(), mapper, registry)
}

#[test]
fn probe_binds_instance_zero() {
    let (mapper, registry, ordinal) = probed_watchdog(&WatchdogParams::default());
    assert_eq!(ordinal, 0);
    assert_eq!(registry.len(), 1);
    assert_eq!(mapper.live(), &[WDT_BASE, TMR_BASE]);

    let wdd = registry.get(0).unwrap();
    assert!(!wdd.is_active());
    assert_eq!(wdd.timeout(), 80);
    assert_eq!(wdd.driver().timer_source(), 7);
}

#[test]
fn probe_leaves_hardware_disarmed() {
    let (_mapper, registry, ordinal) = probed_watchdog(&WatchdogParams::default());
    let wdt = registry.get(ordinal).unwrap().driver();

    assert!(!wdt.is_armed());
    assert_eq!(wdt.timer_regs().read32(TIMER_PTV), 0);
    assert_eq!(wdt.timer_regs().read32(TIMER_PCR), TIMER_PCR_INTR);
    assert_eq!(
        wdt.wdt_regs().writes(),
        &[
            (WDT_UNLOCK, WDT_UNLOCK_PATTERN),
            (WDT_CMD, WDT_CMD_DISABLE_COUNTER)
        ]
    );
}

#[test]
fn first_memory_resource_is_the_watchdog_block() {
    let (_mapper, registry, ordinal) = probed_watchdog(&WatchdogParams::default());
    let wdt = registry.get(ordinal).unwrap().driver();
    assert_eq!(wdt.wdt_regs().base(), Some(WDT_BASE));
    assert_eq!(wdt.timer_regs().base(), Some(TMR_BASE));
}

#[test]
fn unnumbered_device_takes_slot_zero_with_timer_six() {
    let mut mapper = SimMapper::new();
    let mut registry = SimRegistry::new();
    assert_eq!(probe(&tegra_pdev(-1), &mut mapper, &mut registry), Ok(0));

    let wdd = registry.get_mut(0).unwrap();
    assert_eq!(wdd.driver().timer_source(), 6);
    wdd.start().unwrap();
    assert_eq!(
        wdd.driver().wdt_regs().read32(WDT_CFG) & WDT_CFG_SOURCE_MASK,
        6
    );
}

#[test]
fn unsupported_ids_are_rejected() {
    for id in [-2, 1, 3] {
        let mut mapper = SimMapper::new();
        let mut registry = SimRegistry::new();
        let err = probe(&tegra_pdev(id), &mut mapper, &mut registry).unwrap_err();
        assert_eq!(err, Error::NoDevice);
        assert_eq!(err.errno(), -19);
        assert!(registry.is_empty());
        assert!(mapper.live().is_empty());
    }
}

#[test]
fn missing_memory_resource_is_no_entry() {
    let pdev = PlatformDevice::new(DRIVER_NAME, 0)
        .with_resource(Resource::Mem(MemResource::new(WDT_BASE, 0x20)))
        .with_resource(Resource::Irq(32));
    let mut mapper = SimMapper::new();
    let mut registry = SimRegistry::new();

    let err = probe(&pdev, &mut mapper, &mut registry).unwrap_err();
    assert_eq!(err, Error::NoEntry);
    assert_eq!(err.errno(), -2);
    assert!(mapper.live().is_empty());
}

#[test]
fn missing_irq_is_no_entry() {
    let pdev = PlatformDevice::new(DRIVER_NAME, -1)
        .with_resource(Resource::Mem(MemResource::new(WDT_BASE, 0x20)))
        .with_resource(Resource::Mem(MemResource::new(TMR_BASE, 0x8)));
    let mut mapper = SimMapper::new();
    let mut registry = SimRegistry::new();

    assert_eq!(probe(&pdev, &mut mapper, &mut registry), Err(Error::NoEntry));
    assert!(registry.is_empty());
}

#[test]
fn failed_second_map_releases_first() {
    let mut mapper = SimMapper::failing_at(1);
    let mut registry = SimRegistry::new();

    let err = probe(&tegra_pdev(0), &mut mapper, &mut registry).unwrap_err();
    assert_eq!(err, Error::NoMemory);
    assert_eq!(err.errno(), -12);
    assert!(mapper.live().is_empty());
    assert!(registry.is_empty());
}

#[test]
fn failed_first_map_is_no_memory() {
    let mut mapper = SimMapper::failing_at(0);
    let mut registry = SimRegistry::new();
    assert_eq!(
        probe(&tegra_pdev(0), &mut mapper, &mut registry),
        Err(Error::NoMemory)
    );
    assert!(mapper.live().is_empty());
}

#[test]
fn second_probe_of_same_slot_is_busy() {
    let (mut mapper, mut registry, _) = probed_watchdog(&WatchdogParams::default());
    assert_eq!(
        probe(&tegra_pdev(-1), &mut mapper, &mut registry),
        Err(Error::Busy)
    );
    // The first instance keeps its windows; nothing extra was mapped.
    assert_eq!(mapper.live().len(), 2);
}

#[test]
fn out_of_range_heartbeat_falls_back_to_default() {
    let params = WatchdogParams {
        heartbeat: 2,
        nowayout: false,
    };
    let (_mapper, registry, ordinal) = probed_watchdog(&params);
    assert_eq!(registry.get(ordinal).unwrap().timeout(), 80);

    let params = WatchdogParams {
        heartbeat: 300,
        nowayout: true,
    };
    let (_mapper, registry, ordinal) = probed_watchdog(&params);
    let wdd = registry.get(ordinal).unwrap();
    assert_eq!(wdd.timeout(), 300);
    assert!(wdd.nowayout());
}

#[test]
fn remove_unmaps_and_clears_slot() {
    let (mut mapper, mut registry, ordinal) = probed_watchdog(&WatchdogParams::default());
    registry.get_mut(ordinal).unwrap().open().unwrap();

    tegra_wdt::remove(ordinal, &mut mapper, &mut registry).unwrap();
    assert!(registry.is_empty());
    assert!(mapper.live().is_empty());
}

#[test]
fn remove_disarms_even_with_nowayout() {
    let params = WatchdogParams {
        heartbeat: 80,
        nowayout: true,
    };
    let (mut mapper, mut registry, ordinal) = probed_watchdog(&params);
    let wdd = registry.get_mut(ordinal).unwrap();
    wdd.open().unwrap();
    assert_eq!(wdd.stop(), Err(Error::Busy));
    assert!(wdd.driver().is_armed());

    tegra_wdt::remove(ordinal, &mut mapper, &mut registry).unwrap();
    assert!(registry.is_empty());
    assert!(mapper.live().is_empty());
}

#[test]
fn remove_of_unbound_slot_is_no_device() {
    let mut mapper = SimMapper::new();
    let mut registry = SimRegistry::new();
    assert_eq!(
        tegra_wdt::remove(0, &mut mapper, &mut registry),
        Err(Error::NoDevice)
    );
}

#[test]
fn rebind_after_remove() {
    let (mut mapper, mut registry, ordinal) = probed_watchdog(&WatchdogParams::default());
    tegra_wdt::remove(ordinal, &mut mapper, &mut registry).unwrap();
    assert_eq!(probe(&tegra_pdev(0), &mut mapper, &mut registry), Ok(0));
    assert_eq!(mapper.live().len(), 2);
}
