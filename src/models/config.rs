use pixel_art::{DitherMethod, MatrixSize, OutlineStyle, PaletteSize, ProcessConfig};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::ConfigError;

/// Named processing bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// No processing at all.
    Raw,
    /// Full resolution, light outlines, 64 colors.
    Subtle,
    /// Half resolution, 48 colors.
    #[default]
    Classic,
    /// Quarter resolution, strong dither, 32 colors.
    Retro,
}

impl Preset {
    pub const ALL: [Preset; 4] = [Preset::Raw, Preset::Subtle, Preset::Classic, Preset::Retro];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Raw => "raw",
            Preset::Subtle => "subtle",
            Preset::Classic => "classic",
            Preset::Retro => "retro",
        }
    }

    /// Bumped whenever [`Preset::config`] changes for this preset, so
    /// tiles processed under different bundles can be told apart.
    pub fn version(self) -> u32 {
        match self {
            Preset::Raw | Preset::Subtle | Preset::Classic | Preset::Retro => 1,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Preset::Raw => "renderer output untouched",
            Preset::Subtle => "full resolution, light outlines, 64 colors",
            Preset::Classic => "half resolution, outlines, 48 colors",
            Preset::Retro => "quarter resolution, heavy dither, 32 colors",
        }
    }

    /// The complete option bundle this preset stands for.
    pub fn config(self) -> ProcessConfig {
        let classic = ProcessConfig::default();
        match self {
            Preset::Raw => ProcessConfig::passthrough(),
            Preset::Subtle => ProcessConfig {
                downscale: 1,
                outline_threshold: 64.0,
                dither_strength: 16.0,
                dither_matrix: MatrixSize::Eight,
                palette: PaletteSize::Colors64,
                ..classic
            },
            Preset::Classic => classic,
            Preset::Retro => ProcessConfig {
                downscale: 4,
                outline_threshold: 40.0,
                dither_strength: 48.0,
                palette: PaletteSize::Colors32,
                ..classic
            },
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

/// Partial processing options, from a config file or command-line flags.
///
/// Every field is optional; set fields replace the corresponding preset
/// value. Unknown keys in a file are rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverrides {
    #[serde(default)]
    pub downscale: Option<u32>,

    #[serde(default)]
    pub outline: Option<bool>,

    #[serde(default, alias = "outline-style", deserialize_with = "parse_setting")]
    pub outline_style: Option<OutlineStyle>,

    #[serde(default, alias = "outline-threshold")]
    pub outline_threshold: Option<f32>,

    #[serde(default)]
    pub dither: Option<bool>,

    #[serde(default, alias = "dither-method", deserialize_with = "parse_setting")]
    pub dither_method: Option<DitherMethod>,

    #[serde(default, alias = "dither-strength")]
    pub dither_strength: Option<f32>,

    #[serde(
        default,
        alias = "dither-matrix",
        alias = "matrix",
        deserialize_with = "parse_setting"
    )]
    pub dither_matrix: Option<MatrixSize>,

    #[serde(default, deserialize_with = "parse_setting")]
    pub palette: Option<PaletteSize>,

    #[serde(default)]
    pub posterize: Option<u32>,
}

/// A scalar that may be written as a number or a string (`palette: 48`,
/// `palette: full`).
#[derive(Deserialize)]
#[serde(untagged)]
enum Setting {
    Number(u64),
    Text(String),
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Setting::Number(n) => write!(f, "{n}"),
            Setting::Text(s) => f.write_str(s),
        }
    }
}

fn parse_setting<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    Option::<Setting>::deserialize(deserializer)?
        .map(|raw| raw.to_string().parse().map_err(serde::de::Error::custom))
        .transpose()
}

impl ConfigOverrides {
    /// Load overrides from a YAML (or JSON) file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let overrides: Self =
            serde_yaml::from_str(&content).map_err(|source| ConfigError::ParseFile {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), ?overrides, "Loaded config overrides");
        Ok(overrides)
    }

    /// Combine two override sets; fields set in `top` win.
    pub fn layered(self, top: ConfigOverrides) -> ConfigOverrides {
        ConfigOverrides {
            downscale: top.downscale.or(self.downscale),
            outline: top.outline.or(self.outline),
            outline_style: top.outline_style.or(self.outline_style),
            outline_threshold: top.outline_threshold.or(self.outline_threshold),
            dither: top.dither.or(self.dither),
            dither_method: top.dither_method.or(self.dither_method),
            dither_strength: top.dither_strength.or(self.dither_strength),
            dither_matrix: top.dither_matrix.or(self.dither_matrix),
            palette: top.palette.or(self.palette),
            posterize: top.posterize.or(self.posterize),
        }
    }

    /// Apply onto `base` and validate the result.
    pub fn merge(&self, base: ProcessConfig) -> Result<ProcessConfig, ConfigError> {
        let config = ProcessConfig {
            downscale: self.downscale.unwrap_or(base.downscale),
            outline: self.outline.unwrap_or(base.outline),
            outline_style: self.outline_style.unwrap_or(base.outline_style),
            outline_threshold: self.outline_threshold.unwrap_or(base.outline_threshold),
            dither: self.dither.unwrap_or(base.dither),
            dither_method: self.dither_method.unwrap_or(base.dither_method),
            dither_strength: self.dither_strength.unwrap_or(base.dither_strength),
            dither_matrix: self.dither_matrix.unwrap_or(base.dither_matrix),
            palette: self.palette.unwrap_or(base.palette),
            posterize: self.posterize.or(base.posterize),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Resolve the effective configuration: preset, then file overrides, then
/// command-line overrides.
pub fn resolve_config(
    preset: Preset,
    file: Option<ConfigOverrides>,
    cli: ConfigOverrides,
) -> Result<ProcessConfig, ConfigError> {
    file.unwrap_or_default()
        .layered(cli)
        .merge(preset.config())
}

/// oxipng accepts optimization presets 0 through 6.
pub fn check_optimize_level(level: u8) -> Result<u8, ConfigError> {
    if level > 6 {
        return Err(ConfigError::Invalid {
            field: "optimize",
            reason: format!("level must be within 0..=6, got {level}"),
        });
    }
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_preset_table() {
        let raw = Preset::Raw.config();
        assert_eq!(raw.downscale, 1);
        assert_eq!(raw.outline_threshold, 48.0);
        assert!(!raw.outline && !raw.dither);
        assert_eq!(raw.palette, PaletteSize::Full);

        let subtle = Preset::Subtle.config();
        assert_eq!(
            (subtle.downscale, subtle.outline_threshold, subtle.dither_strength),
            (1, 64.0, 16.0)
        );
        assert_eq!(subtle.dither_matrix, MatrixSize::Eight);
        assert_eq!(subtle.palette, PaletteSize::Colors64);

        assert_eq!(Preset::Classic.config(), ProcessConfig::default());

        let retro = Preset::Retro.config();
        assert_eq!(
            (retro.downscale, retro.outline_threshold, retro.dither_strength),
            (4, 40.0, 48.0)
        );
        assert_eq!(retro.dither_matrix, MatrixSize::Four);
        assert_eq!(retro.palette, PaletteSize::Colors32);

        for preset in Preset::ALL {
            let config = preset.config();
            assert_eq!(config.outline_style, OutlineStyle::Boundary);
            assert_eq!(config.dither_method, DitherMethod::Ordered);
            assert_eq!(config.posterize, None);
            config.validate().unwrap();
        }
    }

    #[test]
    fn test_preset_versions() {
        for preset in Preset::ALL {
            assert_eq!(preset.version(), 1, "{preset}");
        }
        // a change here must come with a version bump above
        assert_eq!(
            Preset::Classic.config().to_string(),
            "downscale=2 palette=48 outline=boundary@48 dither=ordered/4x4@32"
        );
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!("Retro".parse::<Preset>().unwrap(), Preset::Retro);
        assert!(matches!(
            "vapor".parse::<Preset>(),
            Err(ConfigError::UnknownPreset(name)) if name == "vapor"
        ));
        assert_eq!(Preset::default(), Preset::Classic);
    }

    #[test]
    fn test_overrides_from_yaml() {
        let yaml = "palette: full\nposterize: 6\ndither-method: diffusion\nmatrix: 8\n";
        let overrides: ConfigOverrides = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(overrides.palette, Some(PaletteSize::Full));
        assert_eq!(overrides.posterize, Some(6));
        assert_eq!(overrides.dither_method, Some(DitherMethod::ErrorDiffusion));
        assert_eq!(overrides.dither_matrix, Some(MatrixSize::Eight));
        assert_eq!(overrides.downscale, None);
    }

    #[test]
    fn test_overrides_numeric_palette() {
        let overrides: ConfigOverrides = serde_yaml::from_str("palette: 32").unwrap();
        assert_eq!(overrides.palette, Some(PaletteSize::Colors32));
        assert!(serde_yaml::from_str::<ConfigOverrides>("palette: 40").is_err());
    }

    #[test]
    fn test_overrides_reject_unknown_fields() {
        assert!(serde_yaml::from_str::<ConfigOverrides>("sharpen: true").is_err());
    }

    #[test]
    fn test_cli_wins_over_file() {
        let file = ConfigOverrides {
            downscale: Some(4),
            dither_strength: Some(10.0),
            ..Default::default()
        };
        let cli = ConfigOverrides {
            downscale: Some(1),
            ..Default::default()
        };
        let config = resolve_config(Preset::Classic, Some(file), cli).unwrap();
        assert_eq!(config.downscale, 1);
        assert_eq!(config.dither_strength, 10.0);
        assert_eq!(config.palette, PaletteSize::Colors48);
    }

    #[test]
    fn test_merge_validates() {
        let overrides = ConfigOverrides {
            downscale: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            overrides.merge(ProcessConfig::default()),
            Err(ConfigError::Pixel(pixel_art::ConfigError::InvalidDownscale(0)))
        ));
    }

    #[test]
    fn test_posterize_needs_full_palette() {
        let cli = ConfigOverrides {
            posterize: Some(4),
            ..Default::default()
        };
        assert!(matches!(
            resolve_config(Preset::Classic, None, cli.clone()),
            Err(ConfigError::Pixel(pixel_art::ConfigError::PosterizeWithPalette(
                PaletteSize::Colors48
            )))
        ));

        let file = ConfigOverrides {
            palette: Some(PaletteSize::Full),
            ..Default::default()
        };
        let config = resolve_config(Preset::Classic, Some(file), cli).unwrap();
        assert_eq!(config.posterize, Some(4));
    }

    #[test]
    fn test_optimize_level_range() {
        assert_eq!(check_optimize_level(6).unwrap(), 6);
        assert!(matches!(
            check_optimize_level(7),
            Err(ConfigError::Invalid { field: "optimize", .. })
        ));
    }
}
