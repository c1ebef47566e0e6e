// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Print configuration owned by one quoting session.

use serde::{Deserialize, Serialize};

/// Filament material offered by the shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Material {
    Pla,
    Petg,
    Abs,
    Tpu,
}

impl Material {
    /// Wire identifier sent to the slicer.
    pub fn id(&self) -> &'static str {
        match self {
            Material::Pla => "PLA",
            Material::Petg => "PETG",
            Material::Abs => "ABS",
            Material::Tpu => "TPU",
        }
    }

    /// Solid material density in g/cm³, used by the local weight estimator
    /// when no slicer result is available.
    pub fn density_g_cm3(&self) -> f64 {
        match self {
            Material::Pla => 1.24,
            Material::Petg => 1.27,
            Material::Abs => 1.04,
            Material::Tpu => 1.21,
        }
    }

    /// Flexible filaments print slowly and wear the extruder; priced at a
    /// flat multiple of the rigid-material total.
    pub fn is_flexible(&self) -> bool {
        matches!(self, Material::Tpu)
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Session print configuration.
///
/// Owned and mutated by the UI session; the pricing engine reads it only.
/// Any change to a price-affecting field invalidates the held quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintConfig {
    /// Selected filament material
    pub material: Material,
    /// Layer height in millimeters (quality proxy)
    pub quality_mm: f64,
    /// Infill density, percent 0–100
    pub infill_percent: u8,
    /// Number of copies ordered, ≥ 1
    pub quantity: u32,
    /// Selected color, opaque to pricing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_id: Option<String>,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            material: Material::Pla,
            quality_mm: 0.2,
            infill_percent: 15,
            quantity: 1,
            color_id: None,
        }
    }
}
