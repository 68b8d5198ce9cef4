//! Client-agent normalization and audience fingerprint derivation.
//!
//! Tokens carry a hash of the client profile rather than the raw User-Agent
//! string: the audience claim loosely binds a token to the device class that
//! requested it without embedding identifying header text.

use sha2::{Digest, Sha256};

/// Normalized view of a client agent: browser family, OS family, device class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentProfile {
    /// Browser family, e.g. `"firefox"`.
    pub browser: String,
    /// Operating system family, e.g. `"linux"`.
    pub os: String,
    /// Device class: `"mobile"`, `"tablet"`, or `"desktop"`.
    pub device: String,
}

impl AgentProfile {
    /// Canonical string form hashed into the audience claim.
    fn canonical(&self) -> String {
        format!("{}/{}/{}", self.browser, self.os, self.device)
    }
}

/// Normalizes a raw User-Agent header into a coarse profile.
pub fn normalize_agent(user_agent: &str) -> AgentProfile {
    let ua = user_agent.to_ascii_lowercase();

    // Order matters: Edge and Opera embed "chrome", Chrome embeds "safari".
    let browser = if ua.contains("edg/") || ua.contains("edge") {
        "edge"
    } else if ua.contains("opr/") || ua.contains("opera") {
        "opera"
    } else if ua.contains("firefox") {
        "firefox"
    } else if ua.contains("chrome") || ua.contains("crios") {
        "chrome"
    } else if ua.contains("safari") {
        "safari"
    } else if ua.contains("curl") {
        "curl"
    } else {
        "other"
    };

    let os = if ua.contains("android") {
        "android"
    } else if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ios") {
        "ios"
    } else if ua.contains("windows") {
        "windows"
    } else if ua.contains("mac os") || ua.contains("macintosh") {
        "macos"
    } else if ua.contains("linux") {
        "linux"
    } else {
        "other"
    };

    let device = if ua.contains("ipad") || ua.contains("tablet") {
        "tablet"
    } else if ua.contains("mobile") || ua.contains("iphone") || ua.contains("android") {
        "mobile"
    } else {
        "desktop"
    };

    AgentProfile {
        browser: browser.to_string(),
        os: os.to_string(),
        device: device.to_string(),
    }
}

/// Derives the audience claim for a client agent: a fixed-length,
/// non-reversible SHA-256 hex digest of the normalized profile.
pub fn audience_fingerprint(user_agent: &str) -> String {
    let profile = normalize_agent(user_agent);
    let digest = Sha256::digest(profile.canonical().as_bytes());
    format!("{digest:x}")
}
