use std::time::Duration;

use crate::{LifeError, Renderer, Result};

/// Settings of a simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub generations: u64,
    pub delay: Duration,
    /// Size of the worker pool; `None` lets rayon decide.
    pub threads: Option<usize>,
    pub renderer: Renderer,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: Self::DEFAULT_SIDE,
            height: Self::DEFAULT_SIDE,
            generations: Self::DEFAULT_GENERATIONS,
            delay: Self::DEFAULT_DELAY,
            threads: None,
            renderer: Renderer::default(),
        }
    }
}

impl Config {
    pub const DEFAULT_SIDE: usize = 25;
    pub const DEFAULT_GENERATIONS: u64 = 1000;
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(5);

    pub fn size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn generations(mut self, generations: u64) -> Self {
        self.generations = generations;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn glyphs(mut self, alive: char, dead: char) -> Self {
        self.renderer = Renderer::new(alive, dead);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LifeError::InvalidDimension {
                width: self.width,
                height: self.height,
            });
        }
        if self.threads == Some(0) {
            return Err(LifeError::ComputationFailure(
                "worker pool needs at least one thread".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!((config.width, config.height), (25, 25));
        assert_eq!(config.generations, 1000);
        assert_eq!(config.delay, Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_and_validation() {
        let config = Config::default()
            .size(40, 10)
            .generations(3)
            .delay(Duration::ZERO)
            .threads(Some(2))
            .glyphs('#', '.');
        assert_eq!(config.renderer, Renderer::new('#', '.'));
        assert!(config.validate().is_ok());
        assert!(config.clone().size(0, 10).validate().is_err());
        assert!(config.threads(Some(0)).validate().is_err());
    }
}
