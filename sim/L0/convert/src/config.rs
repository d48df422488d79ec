//! Conversion options.

use sim_mjcf::MjcfGeom;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which SDFormat attachments an MJCF geom turns into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeomClass {
    /// Collision only.
    Collision,
    /// Visual only.
    Visual,
    /// Both a collision and a visual.
    Both,
}

impl GeomClass {
    /// Whether a collision is emitted.
    #[must_use]
    pub fn has_collision(self) -> bool {
        matches!(self, Self::Collision | Self::Both)
    }

    /// Whether a visual is emitted.
    #[must_use]
    pub fn has_visual(self) -> bool {
        matches!(self, Self::Visual | Self::Both)
    }
}

/// Options shared by both conversion directions.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConversionOptions {
    /// Attach the Gazebo system plugins to the converted world.
    pub export_world_plugins: bool,
    /// Place capsules and cylinders given by `fromto` at the segment midpoint,
    /// aligned with the segment.
    pub align_fromto: bool,
    /// Drop attachments whose shape cannot be converted instead of failing.
    pub skip_unsupported_geometry: bool,
    /// MJCF `group` of collision geoms.
    pub collision_group: i32,
    /// MJCF `group` of visual geoms.
    pub visual_group: i32,
    /// Name used when the source model has none.
    pub default_model_name: String,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            export_world_plugins: false,
            align_fromto: true,
            skip_unsupported_geometry: false,
            collision_group: 3,
            visual_group: 0,
            default_model_name: "model".to_string(),
        }
    }
}

impl ConversionOptions {
    /// Attach the Gazebo system plugins.
    #[must_use]
    pub fn with_world_plugins(mut self, export: bool) -> Self {
        self.export_world_plugins = export;
        self
    }

    /// Enable or disable fromto alignment.
    #[must_use]
    pub fn with_align_fromto(mut self, align: bool) -> Self {
        self.align_fromto = align;
        self
    }

    /// Skip unsupported geometry instead of failing.
    #[must_use]
    pub fn with_skip_unsupported_geometry(mut self, skip: bool) -> Self {
        self.skip_unsupported_geometry = skip;
        self
    }

    /// Set the collision and visual groups.
    #[must_use]
    pub fn with_groups(mut self, collision_group: i32, visual_group: i32) -> Self {
        self.collision_group = collision_group;
        self.visual_group = visual_group;
        self
    }

    /// Classify an MJCF geom.
    ///
    /// A geom in the collision group is a collision only, a geom with
    /// contacts disabled is a visual only, anything else is both.
    #[must_use]
    pub fn classify(&self, geom: &MjcfGeom) -> GeomClass {
        if geom.group == Some(self.collision_group) {
            GeomClass::Collision
        } else if geom.is_contact_disabled() {
            GeomClass::Visual
        } else {
            GeomClass::Both
        }
    }

    /// Model name, or the fallback when empty.
    #[must_use]
    pub fn model_name<'a>(&'a self, name: &'a str) -> &'a str {
        if name.is_empty() {
            &self.default_model_name
        } else {
            name
        }
    }
}
