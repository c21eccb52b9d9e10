use crate::classify::taxonomy::{BOT_KEYWORDS, MOBILE_KEYWORDS, contains_any};

pub fn is_bot(user_agent: &str) -> bool {
    contains_any(&user_agent.to_lowercase(), BOT_KEYWORDS)
}

pub fn is_mobile(user_agent: &str) -> bool {
    contains_any(&user_agent.to_lowercase(), MOBILE_KEYWORDS)
}

/// Bot and device flags of one user agent, lowercased once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrafficProfile {
    pub is_bot: bool,
    pub is_mobile: bool,
}

impl TrafficProfile {
    pub fn of(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();
        Self {
            is_bot: contains_any(&ua, BOT_KEYWORDS),
            is_mobile: contains_any(&ua, MOBILE_KEYWORDS),
        }
    }
}
