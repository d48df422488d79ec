//! Name allocation for converted elements.
//!
//! One [`NamingAllocator`] lives for the duration of one conversion call, so
//! anonymous elements are numbered from zero in every run.

use std::collections::{HashMap, HashSet};

/// Kind of element a name is allocated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRole {
    /// SDFormat visual.
    Visual,
    /// SDFormat collision.
    Collision,
    /// MJCF body or SDFormat link.
    Body,
    /// Joint.
    Joint,
    /// MJCF geom.
    Geom,
    /// SDFormat sensor or MJCF camera.
    Sensor,
    /// Light.
    Light,
}

impl ElementRole {
    /// Lowercase role name used in generated names.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Visual => "visual",
            Self::Collision => "collision",
            Self::Body => "body",
            Self::Joint => "joint",
            Self::Geom => "geom",
            Self::Sensor => "sensor",
            Self::Light => "light",
        }
    }

    /// Whether declared names get the role as a prefix.
    fn prefixes_declared(self) -> bool {
        matches!(self, Self::Visual | Self::Collision)
    }
}

/// Per-conversion name counters.
#[derive(Debug, Clone, Default)]
pub struct NamingAllocator {
    counters: HashMap<ElementRole, usize>,
}

impl NamingAllocator {
    /// Create an allocator with all counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Name for an element of `role`.
    ///
    /// Declared visual and collision names become `visual_<name>` and
    /// `collision_<name>`, other declared names are kept. Missing or empty
    /// names become `unnamed_<role>_<n>` with `n` counting per role from 0.
    pub fn name_for(&mut self, role: ElementRole, declared: Option<&str>) -> String {
        match declared.filter(|name| !name.is_empty()) {
            Some(name) if role.prefixes_declared() => format!("{}_{name}", role.as_str()),
            Some(name) => name.to_string(),
            None => {
                let counter = self.counters.entry(role).or_insert(0);
                let name = format!("unnamed_{}_{counter}", role.as_str());
                *counter += 1;
                name
            }
        }
    }

    /// Number of anonymous names handed out for `role`.
    #[must_use]
    pub fn anonymous_count(&self, role: ElementRole) -> usize {
        self.counters.get(&role).copied().unwrap_or(0)
    }
}

/// Return `base` if it is not taken, else the first free `base_<n>`.
///
/// The returned name is recorded in `taken`.
pub fn unique_name(base: &str, taken: &mut HashSet<String>) -> String {
    if taken.insert(base.to_string()) {
        return base.to_string();
    }
    let mut n = 0_usize;
    loop {
        let candidate = format!("{base}_{n}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
