//! Directional vote counting over technical flags.

use tracing::warn;

use crate::models::FlagSet;

use super::classification::{DirectionTag, DirectionalClassification};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoteTally {
    pub bull: usize,
    pub bear: usize,
    pub neutral: usize,
}

impl VoteTally {
    /// Count true flags by direction. Flags without a table entry count as
    /// neutral and are logged.
    pub fn count(flags: &FlagSet, classification: &DirectionalClassification) -> Self {
        let mut tally = Self::default();
        for (name, value) in flags.iter() {
            let tag = match classification.get(name) {
                Some(tag) => tag,
                None => {
                    warn!(flag = %name, "Technical flag has no direction; counting as neutral");
                    DirectionTag::Neutral
                }
            };
            if !value {
                continue;
            }
            match tag {
                DirectionTag::Bullish => tally.bull += 1,
                DirectionTag::Bearish => tally.bear += 1,
                DirectionTag::Neutral => tally.neutral += 1,
            }
        }
        tally
    }

    pub fn is_conflicted(&self) -> bool {
        self.bull > 0 && self.bear > 0
    }
}
