//! Watchdog ioctl requests and replies.
//!
//! Request numbers are the `WDIOC_*` codes from
//! `include/uapi/linux/watchdog.h` (ioctl type `'W'`).

/// ioctl type byte for every watchdog request.
pub const WATCHDOG_IOCTL_BASE: u8 = b'W';

pub const WDIOC_GETSUPPORT: u8 = 0;
pub const WDIOC_GETSTATUS: u8 = 1;
pub const WDIOC_GETBOOTSTATUS: u8 = 2;
pub const WDIOC_SETOPTIONS: u8 = 4;
pub const WDIOC_KEEPALIVE: u8 = 5;
pub const WDIOC_SETTIMEOUT: u8 = 6;
pub const WDIOC_GETTIMEOUT: u8 = 7;

/// `WDIOF_*` capability flags advertised in [`WatchdogInfo::options`].
pub const WDIOF_SETTIMEOUT: u32 = 0x0080;
pub const WDIOF_MAGICCLOSE: u32 = 0x0100;
pub const WDIOF_KEEPALIVEPING: u32 = 0x8000;

/// `WDIOS_*` values accepted by `WDIOC_SETOPTIONS`.
pub const WDIOS_DISABLECARD: u32 = 0x0001;
pub const WDIOS_ENABLECARD: u32 = 0x0002;

/// Length of the identity field in `struct watchdog_info`.
pub const IDENTITY_LEN: usize = 32;

/// Decoded watchdog ioctl request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchdogCommand {
    GetSupport,
    GetStatus,
    GetBootStatus,
    SetOptions(u32),
    KeepAlive,
    SetTimeout(u32),
    GetTimeout,
}

impl WatchdogCommand {
    /// Decode a request number and its integer argument.
    ///
    /// Returns `None` for requests this driver does not implement
    /// (the host replies `-ENOTTY`).
    pub fn decode(nr: u8, arg: u32) -> Option<Self> {
        Some(match nr {
            WDIOC_GETSUPPORT => Self::GetSupport,
            WDIOC_GETSTATUS => Self::GetStatus,
            WDIOC_GETBOOTSTATUS => Self::GetBootStatus,
            WDIOC_SETOPTIONS => Self::SetOptions(arg),
            WDIOC_KEEPALIVE => Self::KeepAlive,
            WDIOC_SETTIMEOUT => Self::SetTimeout(arg),
            WDIOC_GETTIMEOUT => Self::GetTimeout,
            _ => return None,
        })
    }
}

/// Static description of a watchdog (`struct watchdog_info`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchdogInfo {
    pub options: u32,
    pub firmware_version: u32,
    pub identity: heapless::String<IDENTITY_LEN>,
}

impl WatchdogInfo {
    /// Build an info block; identities longer than 32 bytes are truncated.
    pub fn new(options: u32, identity: &str) -> Self {
        let mut id = heapless::String::new();
        for ch in identity.chars() {
            if id.push(ch).is_err() {
                break;
            }
        }
        Self {
            options,
            firmware_version: 0,
            identity: id,
        }
    }
}

/// Reply to a [`WatchdogCommand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchdogReply {
    Info(WatchdogInfo),
    Status(u32),
    /// Timeout in seconds, after any change.
    Timeout(u32),
    Done,
}
