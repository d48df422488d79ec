//! Gazebo system plugins attached to converted worlds.

use sim_sdf::SdfPlugin;

/// `(filename, name)` of the world system plugins, in attachment order.
pub const WORLD_SYSTEM_PLUGINS: [(&str, &str); 4] = [
    (
        "ignition-gazebo-physics-system",
        "ignition::gazebo::systems::Physics",
    ),
    (
        "ignition-gazebo-sensors-system",
        "ignition::gazebo::systems::Sensors",
    ),
    (
        "ignition-gazebo-user-commands-system",
        "ignition::gazebo::systems::UserCommands",
    ),
    (
        "ignition-gazebo-scene-broadcaster-system",
        "ignition::gazebo::systems::SceneBroadcaster",
    ),
];

/// The world system plugins as SDFormat plugin elements.
#[must_use]
pub fn world_system_plugins() -> Vec<SdfPlugin> {
    WORLD_SYSTEM_PLUGINS
        .iter()
        .map(|(filename, name)| SdfPlugin::new(*filename, *name))
        .collect()
}
