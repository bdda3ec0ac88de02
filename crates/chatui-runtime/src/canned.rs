//! Canned Reply Provider
//!
//! Stand-in for a real assistant: picks a reply from a fixed pool and waits a
//! random latency before handing it back. Seed the RNG for reproducible runs.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chatui_core::{ChatError, Delay, Details, Reply, ReplyConfig, ReplyProvider, Result};
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

struct CannedEntry {
    content: &'static str,
    suggestions: &'static [&'static str],
    details: Option<(&'static str, &'static [&'static str])>,
}

const POOL: &[CannedEntry] = &[
    CannedEntry {
        content: "Good question! Here is a short overview to get you started.",
        suggestions: &["Give me an example", "Go deeper"],
        details: Some((
            "Key points",
            &["Start small", "Iterate quickly", "Measure before optimizing"],
        )),
    },
    CannedEntry {
        content: "I'm not entirely sure, but the most common approach is to break the problem into smaller steps.",
        suggestions: &["What are the steps?", "Any alternatives?"],
        details: None,
    },
    CannedEntry {
        content: "Sure, happy to help with that.",
        suggestions: &["Summarize it", "Show the details"],
        details: Some(("Related topics", &["Planning", "Trade-offs"])),
    },
    CannedEntry {
        content: "Interesting! Could you tell me a bit more about what you're trying to achieve?",
        suggestions: &["It's for a project", "Just curious"],
        details: None,
    },
    CannedEntry {
        content: "Here's what I found. Let me know if you want me to expand on any part.",
        suggestions: &["Expand on part one", "Thanks!"],
        details: Some((
            "Sources",
            &["Internal notes", "Team wiki", "Previous conversation"],
        )),
    },
];

impl CannedEntry {
    fn to_reply(&self) -> Reply {
        let mut reply = Reply::text(self.content);
        reply.suggestions = self.suggestions.iter().map(|s| (*s).to_string()).collect();
        if let Some((title, items)) = self.details {
            let details = items
                .iter()
                .fold(Details::new(title), |d, item| d.with_item(*item));
            reply = reply.with_details(details);
        }
        reply
    }
}

/// Provider that serves replies from the built-in pool
pub struct CannedReplyProvider<D: Delay> {
    delay: D,
    config: ReplyConfig,
    rng: Mutex<SmallRng>,
}

impl<D: Delay> CannedReplyProvider<D> {
    /// Create a provider; `seed` fixes both reply choice and latency
    pub fn new(delay: D, config: ReplyConfig, seed: u64) -> Self {
        Self {
            delay,
            config,
            rng: Mutex::new(SmallRng::seed_from_u64(seed)),
        }
    }

    pub fn config(&self) -> &ReplyConfig {
        &self.config
    }

    /// Draw the next reply and its latency
    fn draw(&self) -> Result<(Reply, Duration)> {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let entry = POOL
            .choose(&mut *rng)
            .ok_or_else(|| ChatError::Provider("reply pool is empty".into()))?;
        let (min, max) = (self.config.min_delay_ms, self.config.max_delay_ms);
        let millis = if min >= max { min } else { rng.random_range(min..=max) };
        Ok((entry.to_reply(), Duration::from_millis(millis)))
    }
}

#[async_trait(?Send)]
impl<D: Delay> ReplyProvider for CannedReplyProvider<D> {
    async fn reply(&self, prompt: &str) -> Result<Reply> {
        if prompt.trim().is_empty() {
            return Err(ChatError::EmptyPrompt);
        }
        let (reply, latency) = self.draw()?;
        tracing::debug!(latency_ms = latency.as_millis() as u64, "simulating reply latency");
        self.delay.sleep(latency).await;
        Ok(reply)
    }

    fn name(&self) -> &str {
        "Canned"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokioDelay;
    use chatui_core::provider::NoDelay;

    fn provider(seed: u64) -> CannedReplyProvider<NoDelay> {
        CannedReplyProvider::new(NoDelay, ReplyConfig::default(), seed)
    }

    #[test]
    fn test_pool_entries_are_well_formed() {
        for entry in POOL {
            let reply = entry.to_reply();
            assert!(!reply.content.is_empty());
            assert!(!reply.suggestions.is_empty());
        }
    }

    #[test]
    fn test_latency_stays_in_window() {
        let provider = provider(7);
        for _ in 0..200 {
            let (_, latency) = provider.draw().unwrap();
            assert!(latency >= Duration::from_millis(600));
            assert!(latency <= Duration::from_millis(1800));
        }
    }

    #[test]
    fn test_fixed_latency_window() {
        let config = ReplyConfig { min_delay_ms: 250, max_delay_ms: 250 };
        let provider = CannedReplyProvider::new(NoDelay, config, 1);
        let (_, latency) = provider.draw().unwrap();
        assert_eq!(latency, Duration::from_millis(250));
    }

    #[tokio::test]
    async fn test_same_seed_same_replies() {
        let a = provider(42);
        let b = provider(42);
        for prompt in ["one", "two", "three"] {
            assert_eq!(a.reply(prompt).await.unwrap(), b.reply(prompt).await.unwrap());
        }
    }

    #[tokio::test]
    async fn test_empty_prompt_rejected() {
        assert!(matches!(provider(1).reply("  ").await, Err(ChatError::EmptyPrompt)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_waits_for_latency() {
        let config = ReplyConfig { min_delay_ms: 500, max_delay_ms: 900 };
        let provider = CannedReplyProvider::new(TokioDelay, config, 3);

        let start = tokio::time::Instant::now();
        provider.reply("hello").await.unwrap();
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(500));
        assert!(elapsed <= Duration::from_millis(950));
    }
}
