//! Stagger configuration for animating a sequence of items

/// Direction for stagger animations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StaggerDirection {
    /// Animate first to last
    #[default]
    Forward,
    /// Animate last to first
    Reverse,
    /// Animate from center outward
    FromCenter,
}

/// Configuration for stagger delays
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaggerConfig {
    /// Delay applied before the first item (ms)
    pub base_delay_ms: u32,
    /// Delay between each item's animation start (ms)
    pub delay_ms: u32,
    /// Direction of stagger
    pub direction: StaggerDirection,
    /// Optional: cap the effective index at N
    pub limit: Option<usize>,
    /// Optional: restart the cascade every N items (`index % N`)
    pub wrap: Option<usize>,
}

impl StaggerConfig {
    /// Create a new stagger config with delay between items
    pub fn new(delay_ms: u32) -> Self {
        Self {
            base_delay_ms: 0,
            delay_ms,
            direction: StaggerDirection::Forward,
            limit: None,
            wrap: None,
        }
    }

    /// Delay before the first item
    pub fn base_delay(mut self, delay_ms: u32) -> Self {
        self.base_delay_ms = delay_ms;
        self
    }

    /// Stagger from last to first
    pub fn reverse(mut self) -> Self {
        self.direction = StaggerDirection::Reverse;
        self
    }

    /// Stagger from center outward
    pub fn from_center(mut self) -> Self {
        self.direction = StaggerDirection::FromCenter;
        self
    }

    /// Limit stagger to first N items
    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// Restart the cascade every N items
    pub fn wrap(mut self, n: usize) -> Self {
        self.wrap = Some(n.max(1));
        self
    }

    /// Calculate delay for a specific item index
    pub fn delay_for_index(&self, index: usize, total: usize) -> u32 {
        let effective_index = match self.direction {
            StaggerDirection::Forward => index,
            StaggerDirection::Reverse => total.saturating_sub(1).saturating_sub(index),
            StaggerDirection::FromCenter => {
                let center = total / 2;
                center.abs_diff(index)
            }
        };

        let wrapped = match self.wrap {
            Some(n) => effective_index % n,
            None => effective_index,
        };

        let capped_index = match self.limit {
            Some(limit) => wrapped.min(limit),
            None => wrapped,
        };

        self.base_delay_ms + self.delay_ms * capped_index as u32
    }
}

impl Default for StaggerConfig {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_stagger() {
        let stagger = StaggerConfig::new(30);
        assert_eq!(stagger.delay_for_index(0, 3), 0);
        assert_eq!(stagger.delay_for_index(2, 3), 60);
    }

    #[test]
    fn test_base_delay() {
        let stagger = StaggerConfig::new(30).base_delay(200);
        assert_eq!(stagger.delay_for_index(0, 3), 200);
        assert_eq!(stagger.delay_for_index(1, 3), 230);
    }

    #[test]
    fn test_wrap_restarts_cascade() {
        let stagger = StaggerConfig::new(100).wrap(4);
        let delays: Vec<u32> = (0..9).map(|i| stagger.delay_for_index(i, 9)).collect();
        assert_eq!(delays, vec![0, 100, 200, 300, 0, 100, 200, 300, 0]);
    }

    #[test]
    fn test_reverse_and_center() {
        assert_eq!(StaggerConfig::new(10).reverse().delay_for_index(0, 5), 40);
        let center = StaggerConfig::new(10).from_center();
        assert_eq!(center.delay_for_index(2, 5), 0);
        assert_eq!(center.delay_for_index(0, 5), 20);
        assert_eq!(center.delay_for_index(4, 5), 20);
    }

    #[test]
    fn test_limit() {
        let stagger = StaggerConfig::new(50).limit(2);
        assert_eq!(stagger.delay_for_index(10, 12), 100);
    }
}
