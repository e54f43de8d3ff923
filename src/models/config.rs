use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::models::entry::WeightUnit;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub units: Units,
    #[serde(default)]
    pub chart: ChartPrefs,
    #[serde(default)]
    pub limits: Limits,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Units {
    /// Unit used for entry and display when no `--unit` override is given.
    #[serde(default)]
    pub weight: WeightUnit,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ChartPrefs {
    /// Plot fat and muscle as derived weights instead of percentages.
    #[serde(default)]
    pub show_as_weight: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Limits {
    #[serde(default = "default_enforce_max_weight")]
    pub enforce_max_weight: bool,
    /// Exclusive upper bound on canonical weight.
    #[serde(default = "default_max_weight_kg")]
    pub max_weight_kg: f64,
}

fn default_enforce_max_weight() -> bool {
    true
}

fn default_max_weight_kg() -> f64 {
    500.0
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            enforce_max_weight: default_enforce_max_weight(),
            max_weight_kg: default_max_weight_kg(),
        }
    }
}

impl Limits {
    pub fn unbounded() -> Self {
        Self {
            enforce_max_weight: false,
            ..Self::default()
        }
    }

    /// Upper weight bound in kg, if one is enforced.
    pub fn max_weight(&self) -> Option<f64> {
        self.enforce_max_weight.then_some(self.max_weight_kg)
    }

    pub fn check(&self) -> anyhow::Result<()> {
        if !self.max_weight_kg.is_finite() || self.max_weight_kg <= 0.0 {
            anyhow::bail!(
                "limits.max_weight_kg must be a positive number, got {}",
                self.max_weight_kg
            );
        }
        Ok(())
    }
}

impl Config {
    /// Load config from the standard path, or return defaults.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            let config: Self = toml::from_str(&contents)?;
            config.limits.check()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to the standard path.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = Self::path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                std::fs::set_permissions(parent, std::fs::Permissions::from_mode(0o700))?;
            }
        }
        let contents = toml::to_string_pretty(self)?;

        #[cfg(unix)]
        {
            use std::fs::{self, OpenOptions};
            use std::io::Write;
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

            let mut options = OpenOptions::new();
            options.write(true).create(true).truncate(true).mode(0o600);
            let mut file = options.open(&path)?;
            file.write_all(contents.as_bytes())?;

            // mode() only applies on create; tighten a pre-existing file too
            let mut perms = file.metadata()?.permissions();
            if perms.mode() & 0o777 != 0o600 {
                perms.set_mode(0o600);
                fs::set_permissions(&path, perms)?;
            }
        }
        #[cfg(not(unix))]
        {
            std::fs::write(&path, contents)?;
        }

        Ok(())
    }

    /// Apply a `key = value` setting from the command line.
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "units.weight" => self.units.weight = value.parse()?,
            "chart.show_as_weight" => self.chart.show_as_weight = value.parse()?,
            "limits.max_weight_kg" => match value {
                "none" | "off" => self.limits.enforce_max_weight = false,
                v => {
                    let limits = Limits {
                        enforce_max_weight: true,
                        max_weight_kg: v.parse()?,
                    };
                    limits.check()?;
                    self.limits = limits;
                }
            },
            _ => anyhow::bail!("unknown config key: {}", key),
        }
        Ok(())
    }

    pub fn data_dir() -> anyhow::Result<PathBuf> {
        if let Ok(home) = std::env::var("WEIGHTLOG_HOME") {
            return Ok(PathBuf::from(home));
        }
        dirs::home_dir()
            .map(|h| h.join(".weightlog"))
            .ok_or_else(|| anyhow::anyhow!("cannot resolve home directory"))
    }

    pub fn path() -> anyhow::Result<PathBuf> {
        Ok(Self::data_dir()?.join("config.toml"))
    }

    pub fn db_path() -> anyhow::Result<PathBuf> {
        Ok(Self::data_dir()?.join("data.db"))
    }
}
