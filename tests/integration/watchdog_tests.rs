//! Integration tests: watchdog device node / ioctl flows over the Tegra
//! driver and simulated registers.

use super::mock_hw::probed_watchdog;

use socdrv::app::commands::{
    WDIOS_DISABLECARD, WDIOS_ENABLECARD, WatchdogCommand, WatchdogReply,
};
use socdrv::app::ports::{RegisterIo, WatchdogOps};
use socdrv::config::WatchdogParams;
use socdrv::drivers::tegra_regs::{
    TIMER_PTV, TIMER_PTV_MASK, WDT_CMD, WDT_CMD_START_COUNTER, WDT_UNLOCK, WDT_UNLOCK_PATTERN,
};
use socdrv::drivers::tegra_wdt::TEGRA_WDT_OPTIONS;
use socdrv::error::Error;

fn period(secs: u32) -> u32 {
    secs * 1_000_000 / 4
}

#[test]
fn open_arms_with_heartbeat_and_pings_do_not_unlock() {
    let (_mapper, mut registry, ordinal) = probed_watchdog(&WatchdogParams::default());
    let wdd = registry.get_mut(ordinal).unwrap();

    wdd.open().unwrap();
    assert!(wdd.is_active());
    assert_eq!(
        wdd.driver().timer_regs().read32(TIMER_PTV) & TIMER_PTV_MASK,
        period(80)
    );

    let unlocks = wdd
        .driver()
        .wdt_regs()
        .count_writes(WDT_UNLOCK, WDT_UNLOCK_PATTERN);
    let starts = wdd
        .driver()
        .wdt_regs()
        .count_writes(WDT_CMD, WDT_CMD_START_COUNTER);

    for _ in 0..3 {
        wdd.ioctl(WatchdogCommand::KeepAlive).unwrap();
    }
    assert_eq!(wdd.write(b"ping").unwrap(), 4);

    let regs = wdd.driver().wdt_regs();
    assert_eq!(regs.count_writes(WDT_UNLOCK, WDT_UNLOCK_PATTERN), unlocks);
    assert_eq!(regs.count_writes(WDT_CMD, WDT_CMD_START_COUNTER), starts + 4);
    assert!(wdd.driver().is_armed());
}

#[test]
fn magic_close_disarms_hardware() {
    let (_mapper, mut registry, ordinal) = probed_watchdog(&WatchdogParams::default());
    let wdd = registry.get_mut(ordinal).unwrap();

    wdd.open().unwrap();
    wdd.write(b"V").unwrap();
    wdd.release().unwrap();

    assert!(!wdd.is_active());
    assert!(!wdd.driver().is_armed());
    assert_eq!(wdd.driver().timer_regs().read32(TIMER_PTV), 0);
}

#[test]
fn plain_close_keeps_hardware_running() {
    let (_mapper, mut registry, ordinal) = probed_watchdog(&WatchdogParams::default());
    let wdd = registry.get_mut(ordinal).unwrap();

    wdd.open().unwrap();
    wdd.release().unwrap();
    assert!(wdd.is_active());
    assert!(wdd.driver().is_armed());

    // Re-opening an active watchdog must not reprogram it.
    let ptv_writes = wdd.driver().timer_regs().writes().len();
    wdd.open().unwrap();
    assert_eq!(wdd.driver().timer_regs().writes().len(), ptv_writes);
}

#[test]
fn nowayout_ignores_magic_close() {
    let params = WatchdogParams {
        heartbeat: 80,
        nowayout: true,
    };
    let (_mapper, mut registry, ordinal) = probed_watchdog(&params);
    let wdd = registry.get_mut(ordinal).unwrap();

    wdd.open().unwrap();
    wdd.write(b"V").unwrap();
    wdd.release().unwrap();
    assert!(wdd.is_active());
    assert!(wdd.driver().is_armed());

    assert_eq!(
        wdd.ioctl(WatchdogCommand::SetOptions(WDIOS_DISABLECARD)),
        Err(Error::Busy)
    );
    assert!(wdd.driver().is_armed());
}

#[test]
fn set_timeout_reprograms_running_watchdog() {
    let (_mapper, mut registry, ordinal) = probed_watchdog(&WatchdogParams::default());
    let wdd = registry.get_mut(ordinal).unwrap();
    wdd.open().unwrap();

    assert_eq!(
        wdd.ioctl(WatchdogCommand::SetTimeout(42)),
        Ok(WatchdogReply::Timeout(42))
    );
    assert_eq!(
        wdd.driver().timer_regs().read32(TIMER_PTV) & TIMER_PTV_MASK,
        period(42)
    );
    assert!(wdd.driver().is_armed());
}

#[test]
fn set_timeout_out_of_range_keeps_previous() {
    let (_mapper, mut registry, ordinal) = probed_watchdog(&WatchdogParams::default());
    let wdd = registry.get_mut(ordinal).unwrap();
    wdd.open().unwrap();

    for bad in [0, 4, 1001, u32::MAX] {
        assert_eq!(
            wdd.ioctl(WatchdogCommand::SetTimeout(bad)),
            Err(Error::InvalidArgument)
        );
    }
    assert_eq!(
        wdd.ioctl(WatchdogCommand::GetTimeout),
        Ok(WatchdogReply::Timeout(80))
    );
    assert_eq!(
        wdd.driver().timer_regs().read32(TIMER_PTV) & TIMER_PTV_MASK,
        period(80)
    );
}

#[test]
fn set_timeout_while_stopped_applies_on_next_start() {
    let (_mapper, mut registry, ordinal) = probed_watchdog(&WatchdogParams::default());
    let wdd = registry.get_mut(ordinal).unwrap();

    wdd.ioctl(WatchdogCommand::SetTimeout(10)).unwrap();
    assert!(!wdd.driver().is_armed());

    wdd.ioctl(WatchdogCommand::SetOptions(WDIOS_ENABLECARD)).unwrap();
    assert_eq!(
        wdd.driver().timer_regs().read32(TIMER_PTV) & TIMER_PTV_MASK,
        period(10)
    );
}

#[test]
fn suspend_resume_preserves_timeout() {
    let (_mapper, mut registry, ordinal) = probed_watchdog(&WatchdogParams::default());
    let wdd = registry.get_mut(ordinal).unwrap();
    wdd.open().unwrap();
    wdd.ioctl(WatchdogCommand::SetTimeout(42)).unwrap();

    wdd.suspend().unwrap();
    assert!(!wdd.driver().is_armed());
    assert!(wdd.is_active());

    wdd.resume().unwrap();
    assert!(wdd.driver().is_armed());
    assert_eq!(wdd.timeout(), 42);
    assert_eq!(
        wdd.driver().timer_regs().read32(TIMER_PTV) & TIMER_PTV_MASK,
        period(42)
    );
}

#[test]
fn suspend_resume_of_idle_watchdog_stays_idle() {
    let (_mapper, mut registry, ordinal) = probed_watchdog(&WatchdogParams::default());
    let wdd = registry.get_mut(ordinal).unwrap();

    wdd.suspend().unwrap();
    wdd.resume().unwrap();
    assert!(!wdd.driver().is_armed());
    assert!(!wdd.is_active());
}

#[test]
fn get_support_reports_identity() {
    let (_mapper, mut registry, ordinal) = probed_watchdog(&WatchdogParams::default());
    let wdd = registry.get_mut(ordinal).unwrap();

    let Ok(WatchdogReply::Info(info)) = wdd.ioctl(WatchdogCommand::GetSupport) else {
        panic!("GetSupport must return Info");
    };
    assert_eq!(info.options, TEGRA_WDT_OPTIONS);
    assert_eq!(info.firmware_version, 0);
    assert_eq!(info.identity.as_str(), "Tegra Watchdog");
    assert_eq!(wdd.info(), &info);

    assert_eq!(
        wdd.ioctl(WatchdogCommand::GetStatus),
        Ok(WatchdogReply::Status(0))
    );
    assert_eq!(
        wdd.ioctl(WatchdogCommand::GetBootStatus),
        Ok(WatchdogReply::Status(0))
    );
}

#[test]
fn raw_ioctl_numbers_decode() {
    let (_mapper, mut registry, ordinal) = probed_watchdog(&WatchdogParams::default());
    let wdd = registry.get_mut(ordinal).unwrap();

    let cmd = WatchdogCommand::decode(6, 30).unwrap();
    assert_eq!(wdd.ioctl(cmd), Ok(WatchdogReply::Timeout(30)));
    let cmd = WatchdogCommand::decode(7, 0).unwrap();
    assert_eq!(wdd.ioctl(cmd), Ok(WatchdogReply::Timeout(30)));
    assert!(WatchdogCommand::decode(3, 0).is_none());
}
