//! Activation policy - decides once, at mount, whether the trail runs at all

use thiserror::Error;

/// User-agent fragments treated as touch/mobile platforms (matched case-insensitively)
pub const MOBILE_AGENTS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "iemobile",
    "opera mini",
];

/// Why the overlay did not start. None of these are surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Declined {
    #[error("reduced motion requested")]
    ReducedMotion,
    #[error("touch or mobile device")]
    MobileDevice,
    #[error("no 2d drawing context available")]
    NoSurface,
    #[error("viewport size unavailable")]
    NoViewport,
}

/// Host signals read once at mount
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub prefers_reduced_motion: bool,
    pub user_agent: String,
}

impl Environment {
    pub fn new(prefers_reduced_motion: bool, user_agent: impl Into<String>) -> Self {
        Self {
            prefers_reduced_motion,
            user_agent: user_agent.into(),
        }
    }

    pub fn is_mobile(&self) -> bool {
        is_mobile_user_agent(&self.user_agent)
    }

    /// Policy checks that come before any surface is claimed
    pub fn check(&self) -> Result<(), Declined> {
        if self.prefers_reduced_motion {
            return Err(Declined::ReducedMotion);
        }
        if self.is_mobile() {
            return Err(Declined::MobileDevice);
        }
        Ok(())
    }
}

pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    MOBILE_AGENTS.iter().any(|agent| ua.contains(agent))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESKTOP_UA: &str =
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

    #[test]
    fn desktop_is_allowed() {
        assert_eq!(Environment::new(false, DESKTOP_UA).check(), Ok(()));
    }

    #[test]
    fn reduced_motion_wins_over_everything() {
        let env = Environment::new(true, "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)");
        assert_eq!(env.check(), Err(Declined::ReducedMotion));
    }

    #[test]
    fn mobile_agents_are_declined() {
        for ua in [
            "Mozilla/5.0 (Linux; Android 14; Pixel 8)",
            "Mozilla/5.0 (iPad; CPU OS 17_0 like Mac OS X)",
            "Mozilla/5.0 (webOS/1.4.0; U; en-US)",
            "BlackBerry9700/5.0.0.351",
            "Mozilla/4.0 (compatible; MSIE 7.0; Windows Phone OS 7.0; IEMobile/7.0)",
            "Opera/9.80 (J2ME/MIDP; Opera Mini/9.80)",
            "mozilla/5.0 (ipod touch)",
        ] {
            assert_eq!(
                Environment::new(false, ua).check(),
                Err(Declined::MobileDevice),
                "{}",
                ua
            );
        }
    }

    #[test]
    fn empty_agent_is_desktop() {
        assert!(!is_mobile_user_agent(""));
    }
}
