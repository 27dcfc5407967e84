//! Declarative configuration for the default traversal policy.
//!
//! ```yaml
//! include_flags: 65535   # optional, default: every flag
//! exclude_flags: 16      # optional, default: none
//! area_costs:            # optional, unlisted areas stay at 1.0
//!   - area: 1
//!     cost: 2.5
//! ```

use crate::error::ConfigError;
use crate::filter::DefaultQueryFilter;
use crate::mesh::{MAX_AREAS, PolyFlags};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Cost override for one area
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AreaCost {
    /// Area id, must be `< MAX_AREAS`
    pub area: usize,
    /// Cost multiplier, finite and `>= 0` (should be `>= 1`)
    pub cost: f32,
}

/// Filter configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Raw include mask
    #[serde(default = "default_include_flags")]
    pub include_flags: u16,

    /// Raw exclude mask
    #[serde(default)]
    pub exclude_flags: u16,

    /// Area cost overrides (later entries win)
    #[serde(default)]
    pub area_costs: Vec<AreaCost>,
}

fn default_include_flags() -> u16 {
    PolyFlags::all().bits()
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            include_flags: default_include_flags(),
            exclude_flags: 0,
            area_costs: Vec::new(),
        }
    }
}

impl FilterConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: &Path) -> Result<(), ConfigError> {
        let yaml = self.to_yaml()?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Capture a filter's configuration (only areas whose cost is not 1.0)
    pub fn from_filter(filter: &DefaultQueryFilter) -> Self {
        let area_costs = filter
            .area_costs()
            .iter()
            .enumerate()
            .filter(|&(_, &cost)| cost != 1.0)
            .map(|(area, &cost)| AreaCost { area, cost })
            .collect();

        Self {
            include_flags: filter.include_flags().bits(),
            exclude_flags: filter.exclude_flags().bits(),
            area_costs,
        }
    }

    /// Validate and build the filter.
    ///
    /// Multipliers below 1.0 are accepted with a warning: they make the
    /// search heuristic over-estimate and can produce suboptimal paths.
    pub fn build(&self) -> Result<DefaultQueryFilter, ConfigError> {
        let mut filter = DefaultQueryFilter::new()
            .with_include_flags(PolyFlags::from_bits_retain(self.include_flags))
            .with_exclude_flags(PolyFlags::from_bits_retain(self.exclude_flags));

        for &AreaCost { area, cost } in &self.area_costs {
            if area >= MAX_AREAS {
                return Err(ConfigError::InvalidAreaId {
                    area,
                    max: MAX_AREAS,
                });
            }
            if !cost.is_finite() || cost < 0.0 {
                return Err(ConfigError::InvalidAreaCost { area, cost });
            }
            if cost < 1.0 {
                warn!(
                    "[FilterConfig] area {} cost {:.3} < 1.0, paths may be suboptimal",
                    area, cost
                );
            }
            filter.set_area_cost(area as u8, cost);
        }

        if self.include_flags == 0 {
            warn!("[FilterConfig] include_flags is 0, every polygon will be rejected");
        }

        debug!(
            "[FilterConfig] built filter: include={:#06x} exclude={:#06x} overrides={}",
            self.include_flags,
            self.exclude_flags,
            self.area_costs.len()
        );

        Ok(filter)
    }
}
