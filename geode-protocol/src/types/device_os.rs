use num_derive::FromPrimitive;

/// Build platform reported in spawn packets. The wire field stays a raw
/// `i32` so values from newer clients round-trip; this enum is the known
/// set for consumers that want to match on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
#[repr(i32)]
pub enum DeviceOs {
    Unknown = -1,
    Android = 1,
    Ios = 2,
    Osx = 3,
    Amazon = 4,
    GearVr = 5,
    Hololens = 6,
    Windows10 = 7,
    Win32 = 8,
    Dedicated = 9,
    TvOs = 10,
    PlayStation = 11,
    Nintendo = 12,
    Xbox = 13,
    WindowsPhone = 14,
    Linux = 15,
}
