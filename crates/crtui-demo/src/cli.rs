#![forbid(unsafe_code)]

//! Command-line argument parsing for the demo.
//!
//! Parses args manually to keep the binary lean. Environment variables with
//! the `CRTUI_DEMO_*` prefix set defaults; explicit flags override them.

use std::env;
use std::path::PathBuf;
use std::process;

use crtui::{ColorScheme, EffectSettings, Theme, ThemeError};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
crtui demo: a Pip-Boy style terminal with CRT effects

USAGE:
    crtui-demo [OPTIONS]

OPTIONS:
    --scheme=NAME        Colour scheme: classic_green (default), amber, blue, white
    --fps=N              Target frames per second (default: 24)
    --seed=N             Seed the effect RNG for reproducible effects
    --no-crt             Disable scanlines and noise
    --no-bloom           Disable the bloom wash
    --no-glitch          Disable random glitches and glitch sequences
    --log-file=PATH      Write tracing output to PATH
    --help, -h           Show this help message
    --version, -V        Show version

TABS:
    STAT    STATUS / SPECIAL / PERKS
    INV     WEAPONS / APPAREL / AID
    DATA    QUESTS / NOTES, with a live clock
    RADIO   Station list with a signal scope

KEYBINDINGS:
    Left / Right    Previous / next tab
    Up / Down       Next / previous sub-tab
    w / s           Scroll up / down
    Enter / Space   Select
    c               Cycle colour scheme
    q / Esc / Ctrl+C Quit

ENVIRONMENT VARIABLES:
    CRTUI_DEMO_SCHEME         Override --scheme
    CRTUI_DEMO_FPS            Override --fps
    CRTUI_DEMO_SEED           Override --seed
    CRTUI_DEMO_EXIT_AFTER_MS  Auto-quit after N milliseconds (for testing)
    CRTUI_LOG_FILE            Override --log-file
    RUST_LOG                  Log filter (default: info)";

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq)]
pub struct Opts {
    pub scheme: String,
    pub fps: u32,
    pub seed: Option<u64>,
    pub crt: bool,
    pub bloom: bool,
    pub glitch: bool,
    pub log_file: Option<PathBuf>,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            scheme: ColorScheme::default().name.into(),
            fps: 24,
            seed: None,
            crt: true,
            bloom: true,
            glitch: true,
            log_file: None,
            exit_after_ms: 0,
        }
    }
}

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Run(Opts),
    Help,
    Version,
}

impl Opts {
    /// Parse the process arguments and environment. Prints help or version
    /// and exits when asked to, and exits with status 1 on bad input.
    pub fn parse() -> Self {
        let args: Vec<String> = env::args().skip(1).collect();
        match Self::from_sources(|key| env::var(key).ok(), &args) {
            Ok(Action::Run(opts)) => opts,
            Ok(Action::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Ok(Action::Version) => {
                println!("crtui-demo {VERSION}");
                process::exit(0);
            }
            Err(msg) => {
                eprintln!("{msg}");
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    /// Parse from an environment lookup and an argument list.
    pub fn from_sources(
        env_var: impl Fn(&str) -> Option<String>,
        args: &[String],
    ) -> Result<Action, String> {
        let mut opts = Self::default();

        // Environment variables first
        if let Some(val) = env_var("CRTUI_DEMO_SCHEME") {
            opts.scheme = val;
        }
        if let Some(val) = env_var("CRTUI_DEMO_FPS")
            && let Ok(n) = val.parse()
        {
            opts.fps = n;
        }
        if let Some(val) = env_var("CRTUI_DEMO_SEED")
            && let Ok(n) = val.parse()
        {
            opts.seed = Some(n);
        }
        if let Some(val) = env_var("CRTUI_DEMO_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }
        if let Some(val) = env_var("CRTUI_LOG_FILE") {
            opts.log_file = Some(PathBuf::from(val));
        }

        // Command-line args override env vars
        for arg in args {
            match arg.as_str() {
                "--help" | "-h" => return Ok(Action::Help),
                "--version" | "-V" => return Ok(Action::Version),
                "--no-crt" => opts.crt = false,
                "--no-bloom" => opts.bloom = false,
                "--no-glitch" => opts.glitch = false,
                other => {
                    if let Some(val) = other.strip_prefix("--scheme=") {
                        opts.scheme = val.to_string();
                    } else if let Some(val) = other.strip_prefix("--fps=") {
                        opts.fps = parse_value("--fps", val)?;
                    } else if let Some(val) = other.strip_prefix("--seed=") {
                        opts.seed = Some(parse_value("--seed", val)?);
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        opts.exit_after_ms = parse_value("--exit-after-ms", val)?;
                    } else if let Some(val) = other.strip_prefix("--log-file=") {
                        opts.log_file = Some(PathBuf::from(val));
                    } else {
                        return Err(format!("Unknown argument: {other}"));
                    }
                }
            }
        }

        if opts.fps == 0 {
            return Err("--fps must be at least 1".into());
        }
        Ok(Action::Run(opts))
    }

    /// Build the theme these options describe.
    pub fn theme(&self) -> Result<Theme, ThemeError> {
        let effects = EffectSettings {
            crt: self.crt,
            bloom: self.bloom,
            random_glitches: self.glitch,
            glitch_move_chance: if self.glitch {
                EffectSettings::default().glitch_move_chance
            } else {
                0.0
            },
            seed: self.seed,
            ..EffectSettings::default()
        };
        Theme::builder()
            .scheme_name(&self.scheme)?
            .effects(effects)
            .build()
    }
}

fn parse_value<T: std::str::FromStr>(flag: &str, val: &str) -> Result<T, String> {
    val.parse()
        .map_err(|_| format!("Invalid {flag} value: {val}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn run(action: Result<Action, String>) -> Opts {
        match action {
            Ok(Action::Run(opts)) => opts,
            other => panic!("expected Run, got {other:?}"),
        }
    }

    #[test]
    fn default_opts() {
        let opts = Opts::default();
        assert_eq!(opts.scheme, "classic_green");
        assert_eq!(opts.fps, 24);
        assert!(opts.crt && opts.bloom && opts.glitch);
        assert_eq!(opts.seed, None);
        assert_eq!(opts.exit_after_ms, 0);
    }

    #[test]
    fn flags_parse() {
        let opts = run(Opts::from_sources(
            no_env,
            &args(&["--scheme=amber", "--fps=30", "--seed=9", "--no-crt", "--log-file=/tmp/x.log"]),
        ));
        assert_eq!(opts.scheme, "amber");
        assert_eq!(opts.fps, 30);
        assert_eq!(opts.seed, Some(9));
        assert!(!opts.crt);
        assert!(opts.bloom);
        assert_eq!(opts.log_file, Some(PathBuf::from("/tmp/x.log")));
    }

    #[test]
    fn flags_override_env() {
        let env = |key: &str| match key {
            "CRTUI_DEMO_SCHEME" => Some("blue".to_string()),
            "CRTUI_DEMO_FPS" => Some("10".to_string()),
            "CRTUI_DEMO_EXIT_AFTER_MS" => Some("500".to_string()),
            _ => None,
        };
        let opts = run(Opts::from_sources(env, &args(&["--fps=60"])));
        assert_eq!(opts.scheme, "blue");
        assert_eq!(opts.fps, 60);
        assert_eq!(opts.exit_after_ms, 500);
    }

    #[test]
    fn help_and_version() {
        assert_eq!(Opts::from_sources(no_env, &args(&["-h"])), Ok(Action::Help));
        assert_eq!(
            Opts::from_sources(no_env, &args(&["--version"])),
            Ok(Action::Version)
        );
    }

    #[test]
    fn bad_input_is_rejected() {
        assert!(Opts::from_sources(no_env, &args(&["--fps=fast"])).is_err());
        assert!(Opts::from_sources(no_env, &args(&["--fps=0"])).is_err());
        let err = Opts::from_sources(no_env, &args(&["--bogus"])).unwrap_err();
        assert_eq!(err, "Unknown argument: --bogus");
    }

    #[test]
    fn theme_follows_flags() {
        let opts = run(Opts::from_sources(
            no_env,
            &args(&["--scheme=amber", "--no-glitch", "--no-bloom"]),
        ));
        let theme = opts.theme().unwrap();
        assert_eq!(theme.scheme().name, "amber");
        assert!(!theme.effects().bloom);
        assert!(!theme.effects().random_glitches);
        assert_eq!(theme.effects().glitch_move_chance, 0.0);
    }

    #[test]
    fn unknown_scheme_is_a_theme_error() {
        let opts = run(Opts::from_sources(no_env, &args(&["--scheme=pink"])));
        assert!(matches!(opts.theme(), Err(ThemeError::UnknownScheme(_))));
    }

    #[test]
    fn help_text_lists_every_scheme_and_env_var() {
        for name in ColorScheme::names() {
            assert!(HELP_TEXT.contains(name), "missing scheme {name}");
        }
        assert!(HELP_TEXT.contains("CRTUI_DEMO_SCHEME"));
        assert!(HELP_TEXT.contains("CRTUI_LOG_FILE"));
    }
}
