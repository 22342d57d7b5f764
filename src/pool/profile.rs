use std::fmt;
use wreq_util::Emulation;

/// Browser preset a session impersonates: TLS handshake, HTTP/2 settings and
/// default headers all come from the wrapped emulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImpersonationProfile(Emulation);

impl ImpersonationProfile {
    pub const CHROME_131: Self = Self(Emulation::Chrome131);
    pub const CHROME_136: Self = Self(Emulation::Chrome136);
    pub const EDGE_134: Self = Self(Emulation::Edge134);
    pub const FIREFOX_136: Self = Self(Emulation::Firefox136);
    pub const SAFARI_18: Self = Self(Emulation::Safari18);
    pub const SAFARI_18_5: Self = Self(Emulation::Safari18_5);
    pub const SAFARI_IOS_18: Self = Self(Emulation::SafariIos18_1_1);

    /// Desktop and mobile browsers rotated by default
    pub const ALL: &'static [ImpersonationProfile] = &[
        Self::CHROME_131,
        Self::CHROME_136,
        Self::EDGE_134,
        Self::FIREFOX_136,
        Self::SAFARI_18,
        Self::SAFARI_18_5,
        Self::SAFARI_IOS_18,
    ];

    pub const fn new(emulation: Emulation) -> Self {
        Self(emulation)
    }

    pub fn emulation(self) -> Emulation {
        self.0
    }
}

impl From<Emulation> for ImpersonationProfile {
    fn from(emulation: Emulation) -> Self {
        Self(emulation)
    }
}

impl fmt::Display for ImpersonationProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}
