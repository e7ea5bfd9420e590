//! Stateless slider engine
//!
//! Owns a sanitized configuration and exposes the pure value operations:
//! formatting, offset resolution and collision resolution. Interaction state
//! lives in [`SliderController`](crate::controller::SliderController).

use crate::config::{ResolvedConfig, SliderConfig};
use crate::error::ConfigWarning;
use crate::format::ValueFormatter;
use crate::offset::{Offset, OffsetMode, OffsetResolver, OffsetResult};
use crate::values::{sort_values, Values};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SliderEngine {
    config: ResolvedConfig,
}

impl SliderEngine {
    /// Create an engine from an already sanitized configuration
    pub fn new(config: ResolvedConfig) -> Self {
        Self { config }
    }

    /// Sanitize a configuration, logging every substitution
    pub fn from_config(config: &SliderConfig) -> (Self, Vec<ConfigWarning>) {
        let (resolved, warnings) = config.sanitize();
        for warning in &warnings {
            tracing::warn!("slider config: {}", warning);
        }
        (Self::new(resolved), warnings)
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn formatter(&self) -> ValueFormatter<'_> {
        ValueFormatter::new(&self.config)
    }

    pub fn resolver(&self) -> OffsetResolver<'_> {
        OffsetResolver::new(&self.config)
    }

    /// Clamp and snap a raw value
    pub fn format_value(&self, raw: f64) -> f64 {
        self.formatter().format_value(raw)
    }

    /// New value of one handle for an offset, without touching neighbours
    pub fn offset_value(&self, values: &[f64], offset: Offset, index: usize, mode: OffsetMode) -> f64 {
        self.resolver().offset_value(values, offset, index, mode)
    }

    /// Move one handle and resolve collisions
    pub fn offset_values(
        &self,
        values: &[f64],
        offset: Offset,
        index: usize,
        mode: OffsetMode,
    ) -> Option<OffsetResult> {
        self.resolver().offset_values(values, offset, index, mode)
    }

    /// Format and sort a value array; an empty array becomes `[min]`
    pub fn normalize(&self, values: &[f64]) -> Values {
        let formatter = self.formatter();
        let mut out: Values = values.iter().map(|v| formatter.format_value(*v)).collect();
        if out.is_empty() {
            out.push(self.config.min);
        }
        sort_values(&mut out);
        out
    }
}
