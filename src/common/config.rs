use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::layout_engine::{MAX_RATIO, MIN_RATIO, Orientation};

const MAX_GAP: u32 = 512;

pub fn config_dir() -> PathBuf { dirs::config_dir().unwrap_or_default().join("fork-tiler") }
pub fn config_file() -> PathBuf { config_dir().join("config.toml") }

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    settings: Settings,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct Config {
    pub settings: Settings,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default)]
    pub gaps: GapSettings,
    #[serde(default)]
    pub layout: LayoutSettings,
}

/// Gap configuration for window spacing, in pixels.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct GapSettings {
    /// Space between sibling windows.
    #[serde(default = "default_inner_gap")]
    pub inner: u32,
    /// Space between windows and the edges of the work area.
    #[serde(default)]
    pub outer: OuterGaps,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct OuterGaps {
    #[serde(default)]
    pub top: u32,
    #[serde(default)]
    pub left: u32,
    #[serde(default)]
    pub bottom: u32,
    #[serde(default)]
    pub right: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(deny_unknown_fields)]
pub struct LayoutSettings {
    /// Share of a fork's area given to its left branch when the fork is created.
    #[serde(default = "default_ratio")]
    pub default_ratio: f32,
    #[serde(default = "default_orientation")]
    pub default_orientation: Orientation,
}

impl Default for GapSettings {
    fn default() -> Self {
        Self {
            inner: default_inner_gap(),
            outer: OuterGaps::default(),
        }
    }
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            default_ratio: default_ratio(),
            default_orientation: default_orientation(),
        }
    }
}

impl GapSettings {
    pub fn gap(&self) -> i32 { self.inner as i32 }

    pub fn half_gap(&self) -> i32 { (self.inner / 2) as i32 }

    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.inner > MAX_GAP {
            issues.push(format!("inner gap must not exceed {MAX_GAP}, got {}", self.inner));
        }
        if self.inner % 2 != 0 {
            issues.push(format!("inner gap should be even, got {}", self.inner));
        }

        issues.extend(self.outer.validate());

        issues
    }

    pub fn auto_fix_values(&mut self) -> usize {
        let mut fixes = 0;

        if self.inner > MAX_GAP {
            self.inner = MAX_GAP;
            fixes += 1;
        }
        if self.inner % 2 != 0 {
            self.inner -= 1;
            fixes += 1;
        }

        fixes + self.outer.auto_fix_values()
    }
}

impl OuterGaps {
    fn sides_mut(&mut self) -> [(&'static str, &mut u32); 4] {
        [
            ("top", &mut self.top),
            ("left", &mut self.left),
            ("bottom", &mut self.bottom),
            ("right", &mut self.right),
        ]
    }

    pub fn is_zero(&self) -> bool {
        self.top == 0 && self.left == 0 && self.bottom == 0 && self.right == 0
    }

    pub fn validate(&self) -> Vec<String> {
        let sides = [
            ("top", self.top),
            ("left", self.left),
            ("bottom", self.bottom),
            ("right", self.right),
        ];
        sides
            .into_iter()
            .filter(|(_, value)| *value > MAX_GAP)
            .map(|(side, value)| format!("outer.{side} gap must not exceed {MAX_GAP}, got {value}"))
            .collect()
    }

    pub fn auto_fix_values(&mut self) -> usize {
        let mut fixes = 0;
        for (_, value) in self.sides_mut() {
            if *value > MAX_GAP {
                *value = MAX_GAP;
                fixes += 1;
            }
        }
        fixes
    }
}

impl LayoutSettings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !(MIN_RATIO..=MAX_RATIO).contains(&self.default_ratio) {
            issues.push(format!(
                "default_ratio must be between {MIN_RATIO} and {MAX_RATIO}, got {}",
                self.default_ratio
            ));
        }

        issues
    }

    pub fn auto_fix_values(&mut self) -> usize {
        if (MIN_RATIO..=MAX_RATIO).contains(&self.default_ratio) {
            return 0;
        }
        self.default_ratio = default_ratio();
        1
    }
}

impl Settings {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        issues.extend(self.gaps.validate());
        issues.extend(self.layout.validate());
        issues
    }

    pub fn auto_fix_values(&mut self) -> usize {
        self.gaps.auto_fix_values() + self.layout.auto_fix_values()
    }
}

fn default_inner_gap() -> u32 { 8 }

fn default_ratio() -> f32 { 0.5 }

fn default_orientation() -> Orientation { Orientation::Horizontal }

impl Config {
    pub fn read(path: &Path) -> anyhow::Result<Config> {
        let buf = std::fs::read_to_string(path)?;
        Self::parse(&buf)
    }

    /// Reads the config at `path`, falling back to defaults when the file does
    /// not exist yet.
    pub fn read_or_default(path: &Path) -> anyhow::Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::read(path)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let config_file = ConfigFile { settings: self.settings.clone() };
        let toml_string = toml::to_string_pretty(&config_file)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, toml_string.as_bytes())?;
        Ok(())
    }

    /// Validates the entire configuration and returns a list of issues found.
    pub fn validate(&self) -> Vec<String> { self.settings.validate() }

    /// Attempts to fix configuration values automatically.
    /// Returns the number of fixes applied.
    pub fn auto_fix_values(&mut self) -> usize { self.settings.auto_fix_values() }

    pub fn parse(buf: &str) -> anyhow::Result<Config> {
        let c: ConfigFile = toml::from_str(buf)?;
        let issues = c.settings.validate();
        if issues.iter().any(|issue| issue.contains("default_ratio")) {
            anyhow::bail!("Invalid layout settings: {}", issues.join("; "));
        }
        Ok(Config { settings: c.settings })
    }
}
