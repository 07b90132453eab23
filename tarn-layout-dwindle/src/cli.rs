use std::path::PathBuf;

use argh::FromArgs;

use crate::command::{MAX_RATIO, MIN_RATIO};

/// Dwindle layout generator for river-compatible Wayland compositors.
///
/// Runtime commands: `horizontal-ratio <value>` and `vertical-ratio <value>`.
/// A value prefixed with `+` or `-` adjusts the current ratio.
#[derive(FromArgs, Debug, Default)]
pub struct Args {
    /// padding between views in pixels (default: 6)
    #[argh(option)]
    pub view_padding: Option<u32>,

    /// padding around the edge of the usable area in pixels (default: 6)
    #[argh(option)]
    pub outer_padding: Option<u32>,

    /// default horizontal split ratio, 0.1 to 0.9 (default: 0.5)
    #[argh(option, from_str_fn(parse_ratio))]
    pub horizontal_ratio: Option<f64>,

    /// default vertical split ratio, 0.1 to 0.9 (default: 0.5)
    #[argh(option, from_str_fn(parse_ratio))]
    pub vertical_ratio: Option<f64>,

    /// path to a JSON config file
    #[argh(option)]
    pub config: Option<PathBuf>,

    /// print the version and exit
    #[argh(switch, short = 'v')]
    pub version: bool,
}

fn parse_ratio(value: &str) -> Result<f64, String> {
    let ratio: f64 = value
        .parse()
        .map_err(|_| format!("invalid ratio: {}", value))?;
    if (MIN_RATIO..=MAX_RATIO).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(format!(
            "ratio must be between {} and {}, got {}",
            MIN_RATIO, MAX_RATIO, value
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(flags: &[&str]) -> Result<Args, argh::EarlyExit> {
        Args::from_args(&["tarn-dwindle"], flags)
    }

    #[test]
    fn test_no_flags() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.view_padding, None);
        assert_eq!(args.horizontal_ratio, None);
        assert!(!args.version);
    }

    #[test]
    fn test_all_flags() {
        let args = parse(&[
            "--view-padding",
            "2",
            "--outer-padding",
            "0",
            "--horizontal-ratio",
            "0.65",
            "--vertical-ratio",
            "0.35",
        ])
        .unwrap();

        assert_eq!(args.view_padding, Some(2));
        assert_eq!(args.outer_padding, Some(0));
        assert_eq!(args.horizontal_ratio, Some(0.65));
        assert_eq!(args.vertical_ratio, Some(0.35));
    }

    #[test]
    fn test_version_switch() {
        assert!(parse(&["-v"]).unwrap().version);
        assert!(parse(&["--version"]).unwrap().version);
    }

    #[test]
    fn test_help_is_not_an_error() {
        let exit = parse(&["--help"]).unwrap_err();
        assert_eq!(exit.status, Ok(()));
    }

    #[test]
    fn test_rejects_invalid_values() {
        for flags in [
            &["--horizontal-ratio", "0.95"][..],
            &["--vertical-ratio", "0.05"],
            &["--vertical-ratio", "half"],
            &["--view-padding", "-1"],
            &["--bogus"],
        ] {
            let exit = parse(flags).unwrap_err();
            assert_eq!(exit.status, Err(()), "{:?} should be rejected", flags);
        }
    }
}
