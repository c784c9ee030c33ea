//! Pipeline - Configuration, cache bring-up, drift check, generation
//!
//! ```text
//! Start -> ConfigLoaded -> ProfilesListed                        (exit 0)
//!                       -> CacheReady -> CacheCleared            (exit 0)
//!                                     -> DriftChecked
//!                                     -> VersionPersisted
//!                                     -> Generated               (exit 0)
//! ```
//!
//! Configuration failures end the run with exit 1, cache failures with
//! exit 2 and generation failures with exit 3. Nothing is retried.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::cache::{FileStore, KeyValueStore, CONFIG_VERSION_KEY};
use crate::config::Config;
use crate::error::{PipelineError, StorageError};
use crate::generator::Generator;

/// Inputs of one run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config_path: PathBuf,
    pub profile: String,
    pub count: usize,
    pub try_count: usize,
    pub sort: bool,
    pub list_all: bool,
    pub list_profiles: bool,
    pub clear_cache: bool,
    pub quiet: bool,
}

/// Pipeline states, logged on every transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ConfigLoaded,
    CacheReady,
    DriftChecked,
    VersionPersisted,
}

/// Advisory and status messages raised while running
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The cached configuration version differs from the loaded one
    ConfigChanged { cached: String, current: String },
    CacheCleared,
}

/// Receives notices as they happen
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Successful terminal state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Sorted profile names
    ProfilesListed(Vec<String>),
    CacheCleared,
    /// Generated names, sorted if requested
    Generated(Vec<String>),
}

impl Outcome {
    /// Lines to print on stdout
    pub fn lines(&self) -> &[String] {
        match self {
            Outcome::ProfilesListed(lines) | Outcome::Generated(lines) => lines.as_slice(),
            Outcome::CacheCleared => &[],
        }
    }
}

fn enter(stage: Stage) {
    info!(?stage, "pipeline stage reached");
}

/// Run the pipeline to a terminal state
pub fn run(options: &RunOptions, notifier: &mut dyn Notifier) -> Result<Outcome, PipelineError> {
    let config = Config::load(&options.config_path)?;
    enter(Stage::ConfigLoaded);

    if options.list_profiles {
        return Ok(Outcome::ProfilesListed(list_profiles(&config)));
    }

    let mut cache = FileStore::open(config.cache_directory())?;
    debug!(dir = %cache.dir().display(), "cache opened");
    enter(Stage::CacheReady);

    if options.clear_cache {
        clear_cache(&mut cache, options.quiet, notifier)?;
        return Ok(Outcome::CacheCleared);
    }

    if !options.quiet {
        check_drift(&cache, config.version(), notifier)?;
        enter(Stage::DriftChecked);
    }

    persist_version(&mut cache, config.version())?;
    enter(Stage::VersionPersisted);

    generate(&config, &mut cache, options)
}

/// Profile names in sorted order
pub fn list_profiles(config: &Config) -> Vec<String> {
    let mut names: Vec<String> = config.profile_names().into_iter().map(String::from).collect();
    names.sort();
    names
}

pub fn clear_cache<S: KeyValueStore>(
    cache: &mut S,
    quiet: bool,
    notifier: &mut dyn Notifier,
) -> Result<(), StorageError> {
    cache.clear()?;
    if !quiet {
        notifier.notify(Notice::CacheCleared);
    }
    Ok(())
}

/// Warn when the cached configuration version differs from `current`
///
/// Advisory only: a missing record or a matching version raises nothing.
pub fn check_drift<S: KeyValueStore>(
    cache: &S,
    current: &str,
    notifier: &mut dyn Notifier,
) -> Result<(), StorageError> {
    if let Some(cached) = cache.read(CONFIG_VERSION_KEY)? {
        if cached != current {
            notifier.notify(Notice::ConfigChanged {
                cached,
                current: current.to_string(),
            });
        }
    }
    Ok(())
}

pub fn persist_version<S: KeyValueStore>(cache: &mut S, current: &str) -> Result<(), StorageError> {
    cache.write(CONFIG_VERSION_KEY, current)
}

pub fn generate<S: KeyValueStore>(
    config: &Config,
    cache: &mut S,
    options: &RunOptions,
) -> Result<Outcome, PipelineError> {
    let mut generator = Generator::new(config, cache, options.try_count);
    let mut names = if options.list_all {
        generator.generate_all(&options.profile)?
    } else {
        generator.generate(&options.profile, options.count)?
    };

    if options.sort {
        names.sort();
    }
    Ok(Outcome::Generated(names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use std::fs;
    use std::path::Path;
    use tempfile::{tempdir, TempDir};

    #[derive(Default)]
    struct Recorder(Vec<Notice>);

    impl Notifier for Recorder {
        fn notify(&mut self, notice: Notice) {
            self.0.push(notice);
        }
    }

    fn options(config_path: &Path) -> RunOptions {
        RunOptions {
            config_path: config_path.to_path_buf(),
            profile: "main".into(),
            count: 2,
            try_count: 64,
            sort: false,
            list_all: false,
            list_profiles: false,
            clear_cache: false,
            quiet: false,
        }
    }

    fn write_config(dir: &Path, version: &str) {
        let config = format!(
            r#"{{
                "version": "{}",
                "profiles": {{
                    "main": {{ "kind": "list", "sources": ["names.txt"] }},
                    "alt": {{ "kind": "list", "sources": ["names.txt"] }}
                }}
            }}"#,
            version
        );
        fs::write(dir.join("config.json"), config).unwrap();
        fs::write(dir.join("names.txt"), "Kestrel\nAlbatross\nMerlin\n").unwrap();
    }

    fn setup(version: &str) -> TempDir {
        let temp = tempdir().unwrap();
        write_config(temp.path(), version);
        temp
    }

    #[test]
    fn test_drift_warns_once_when_versions_differ() {
        let mut cache = MemoryStore::new();
        cache.write(CONFIG_VERSION_KEY, "v1").unwrap();
        let mut recorder = Recorder::default();

        check_drift(&cache, "v2", &mut recorder).unwrap();

        assert_eq!(
            recorder.0,
            vec![Notice::ConfigChanged {
                cached: "v1".into(),
                current: "v2".into()
            }]
        );
    }

    #[test]
    fn test_drift_silent_when_versions_match() {
        let mut cache = MemoryStore::new();
        cache.write(CONFIG_VERSION_KEY, "v2").unwrap();
        let mut recorder = Recorder::default();

        check_drift(&cache, "v2", &mut recorder).unwrap();
        assert!(recorder.0.is_empty());
    }

    #[test]
    fn test_drift_silent_without_prior_version() {
        let cache = MemoryStore::new();
        let mut recorder = Recorder::default();

        check_drift(&cache, "v2", &mut recorder).unwrap();
        assert!(recorder.0.is_empty());
    }

    #[test]
    fn test_persist_version_overwrites() {
        let mut cache = MemoryStore::new();
        persist_version(&mut cache, "v1").unwrap();
        persist_version(&mut cache, "v2").unwrap();
        assert_eq!(cache.read(CONFIG_VERSION_KEY).unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn test_clear_cache_notifies_unless_quiet() {
        let mut cache = MemoryStore::new();
        cache.write("x", "1").unwrap();

        let mut recorder = Recorder::default();
        clear_cache(&mut cache, false, &mut recorder).unwrap();
        assert_eq!(recorder.0, vec![Notice::CacheCleared]);
        assert!(cache.is_empty());

        let mut recorder = Recorder::default();
        clear_cache(&mut cache, true, &mut recorder).unwrap();
        assert!(recorder.0.is_empty());
    }

    #[test]
    fn test_run_lists_profiles_without_touching_cache() {
        let temp = setup("1");
        let mut opts = options(temp.path());
        opts.list_profiles = true;

        let outcome = run(&opts, &mut Recorder::default()).unwrap();

        assert_eq!(outcome, Outcome::ProfilesListed(vec!["alt".into(), "main".into()]));
        assert!(!temp.path().join("cache").exists());
    }

    #[test]
    fn test_run_generates_and_persists_version() {
        let temp = setup("1");
        let mut opts = options(temp.path());
        opts.sort = true;

        let outcome = run(&opts, &mut Recorder::default()).unwrap();
        let lines = outcome.lines();
        assert_eq!(lines.len(), 2);
        let mut sorted = lines.to_vec();
        sorted.sort();
        assert_eq!(lines, sorted.as_slice());

        let cache = FileStore::open(temp.path().join("cache")).unwrap();
        assert_eq!(cache.read(CONFIG_VERSION_KEY).unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_run_list_all() {
        let temp = setup("1");
        let mut opts = options(temp.path());
        opts.list_all = true;

        let outcome = run(&opts, &mut Recorder::default()).unwrap();
        assert_eq!(
            outcome,
            Outcome::Generated(vec!["Kestrel".into(), "Albatross".into(), "Merlin".into()])
        );
    }

    #[test]
    fn test_run_warns_after_config_change() {
        let temp = setup("1");
        let opts = options(temp.path());
        let mut recorder = Recorder::default();
        run(&opts, &mut recorder).unwrap();
        assert!(recorder.0.is_empty());

        write_config(temp.path(), "2");
        run(&opts, &mut recorder).unwrap();
        assert_eq!(
            recorder.0,
            vec![Notice::ConfigChanged {
                cached: "1".into(),
                current: "2".into()
            }]
        );

        // The new version was persisted
        run(&opts, &mut recorder).unwrap();
        assert_eq!(recorder.0.len(), 1);
    }

    #[test]
    fn test_run_quiet_skips_drift_but_persists() {
        let temp = setup("1");
        let mut opts = options(temp.path());
        run(&opts, &mut Recorder::default()).unwrap();

        write_config(temp.path(), "2");
        opts.quiet = true;
        let mut recorder = Recorder::default();
        run(&opts, &mut recorder).unwrap();
        assert!(recorder.0.is_empty());

        let cache = FileStore::open(temp.path().join("cache")).unwrap();
        assert_eq!(cache.read(CONFIG_VERSION_KEY).unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_run_clear_cache() {
        let temp = setup("1");
        let opts = options(temp.path());
        run(&opts, &mut Recorder::default()).unwrap();

        let mut clear = options(temp.path());
        clear.clear_cache = true;
        let mut recorder = Recorder::default();
        let outcome = run(&clear, &mut recorder).unwrap();

        assert_eq!(outcome, Outcome::CacheCleared);
        assert!(outcome.lines().is_empty());
        assert_eq!(recorder.0, vec![Notice::CacheCleared]);
        assert_eq!(fs::read_dir(temp.path().join("cache")).unwrap().count(), 0);
    }

    #[test]
    fn test_run_config_failure_exit_code() {
        let temp = tempdir().unwrap();
        let err = run(&options(temp.path()), &mut Recorder::default()).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_run_cache_failure_exit_code() {
        let temp = setup("1");
        fs::write(temp.path().join("cache"), "not a directory").unwrap();

        let err = run(&options(temp.path()), &mut Recorder::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_run_generation_failure_exit_code() {
        let temp = setup("1");
        let mut opts = options(temp.path());
        opts.profile = "missing".into();

        let err = run(&opts, &mut Recorder::default()).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
