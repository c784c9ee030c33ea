//! Generator - Produces code names for a profile
//!
//! Provides:
//! - Bounded generation (`count` names, each with a retry budget)
//! - Exhaustive listing for list profiles
//! - Source memoization through the cache

pub mod rules;
pub mod source;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::cache::KeyValueStore;
use crate::config::{Config, Profile, ProfileKind};
use crate::error::GenerationError;
use rules::Validator;

/// Candidate names a profile draws from
#[derive(Debug)]
enum Pool {
    List(Vec<String>),
    Compound {
        parts: Vec<Vec<String>>,
        separator: String,
    },
}

impl Pool {
    fn is_empty(&self) -> bool {
        match self {
            Pool::List(names) => names.is_empty(),
            Pool::Compound { parts, .. } => parts.is_empty() || parts.iter().any(Vec::is_empty),
        }
    }

    fn draw<R: Rng>(&self, rng: &mut R) -> Option<String> {
        match self {
            Pool::List(names) => names.choose(rng).cloned(),
            Pool::Compound { parts, separator } => {
                let picked = parts
                    .iter()
                    .map(|part| part.choose(&mut *rng).map(String::as_str))
                    .collect::<Option<Vec<_>>>()?;
                Some(picked.join(separator))
            }
        }
    }
}

/// Code name generator bound to a configuration and a cache
pub struct Generator<'a, S, R = StdRng> {
    config: &'a Config,
    cache: &'a mut S,
    try_count: usize,
    rng: R,
}

impl<'a, S: KeyValueStore> Generator<'a, S> {
    /// Create a generator with an entropy-seeded RNG
    pub fn new(config: &'a Config, cache: &'a mut S, try_count: usize) -> Self {
        Self::with_rng(config, cache, try_count, StdRng::from_entropy())
    }
}

impl<'a, S: KeyValueStore, R: Rng> Generator<'a, S, R> {
    pub fn with_rng(config: &'a Config, cache: &'a mut S, try_count: usize, rng: R) -> Self {
        Self {
            config,
            cache,
            try_count,
            rng,
        }
    }

    /// Generate `count` distinct valid names for `profile`
    ///
    /// Each name gets at most `try_count` draws; running out fails the
    /// whole request.
    pub fn generate(&mut self, profile: &str, count: usize) -> Result<Vec<String>, GenerationError> {
        let (pool, validator) = self.prepare(profile)?;

        let mut names: Vec<String> = Vec::with_capacity(count);
        for _ in 0..count {
            let mut accepted = None;
            for _ in 0..self.try_count {
                let Some(candidate) = pool.draw(&mut self.rng) else {
                    break;
                };
                if validator.is_valid(&candidate) && !names.contains(&candidate) {
                    accepted = Some(candidate);
                    break;
                }
            }

            match accepted {
                Some(name) => names.push(name),
                None => {
                    return Err(GenerationError::new(format!(
                        "Could not generate a valid code name for the profile '{}' in {} tries",
                        profile, self.try_count
                    )))
                }
            }
        }

        info!(profile, count = names.len(), "generated code names");
        Ok(names)
    }

    /// Every valid name of a list profile, in source order
    pub fn generate_all(&mut self, profile: &str) -> Result<Vec<String>, GenerationError> {
        let (pool, validator) = self.prepare(profile)?;

        match pool {
            Pool::List(names) => {
                let names: Vec<String> =
                    names.into_iter().filter(|n| validator.is_valid(n)).collect();
                info!(profile, count = names.len(), "listed code names");
                Ok(names)
            }
            Pool::Compound { .. } => Err(GenerationError::new(format!(
                "The profile '{}' is not a code name list",
                profile
            ))),
        }
    }

    fn prepare(&mut self, name: &str) -> Result<(Pool, Validator), GenerationError> {
        let config = self.config;
        let profile: &Profile = config
            .profile(name)
            .ok_or_else(|| GenerationError::new(format!("Unknown profile: {}", name)))?;

        let validator = Validator::compile(&profile.rules)?;

        let pool = match &profile.kind {
            ProfileKind::List { sources } => {
                Pool::List(source::fetch_all(config, self.cache, sources)?)
            }
            ProfileKind::Compound { parts, separator } => {
                let parts = parts
                    .iter()
                    .map(|sources| source::fetch_all(config, self.cache, sources))
                    .collect::<Result<Vec<_>, _>>()?;
                Pool::Compound {
                    parts,
                    separator: separator.clone(),
                }
            }
        };

        if pool.is_empty() {
            return Err(GenerationError::new(format!(
                "The profile '{}' has no source entries",
                name
            )));
        }

        debug!(profile = name, "profile sources ready");
        Ok((pool, validator))
    }
}
