//! bp_core: foundational ECS types (components, resources, events, system sets) shared by the
//! gameplay and rendering crates.
//!
//! Entity behaviour that does not need the ECS (bubble rise, pop fade, cloud drift) lives as
//! plain methods on the component types so it can be exercised without an `App`.

use bevy::prelude::*;

pub mod color;
pub mod components;
pub mod events;
pub mod random;
pub mod resources;

pub use color::Rgb;
pub use components::*;
pub use events::*;
pub use resources::*;

/// Deterministic RNG seed resource (set once at startup / tests for reproducible spawning).
#[derive(Resource, Debug, Copy, Clone, Default)]
pub struct RngSeed(pub u64);

// Wrapper Bevy resource for the pure-data GameConfig (keeps bp_config free of bevy dependency).
#[derive(Resource, Debug, Clone, Default)]
pub struct GameConfigRes(pub bp_config::GameConfig);

/// Per-frame ordering contract. Everything that mutates simulation state lives in one of these
/// sets; the chain makes the frame a strict sequence:
/// clock -> pointer input -> spawn -> clouds -> bubbles -> pop effects -> prune -> visuals.
#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone, Copy)]
pub enum SimulationSet {
    Clock,
    /// Pointer presses are resolved here, before any entity updates this frame.
    Input,
    Spawn,
    Clouds,
    Bubbles,
    Effects,
    Prune,
    /// Rendering mirrors the settled state; never mutates simulation components.
    Visuals,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PointerDown>()
            .add_event::<BubblePopped>()
            .init_resource::<Score>()
            .init_resource::<Viewport>()
            .init_resource::<FrameClock>()
            .configure_sets(
                Update,
                (
                    SimulationSet::Clock,
                    SimulationSet::Input,
                    SimulationSet::Spawn,
                    SimulationSet::Clouds,
                    SimulationSet::Bubbles,
                    SimulationSet::Effects,
                    SimulationSet::Prune,
                    SimulationSet::Visuals,
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plugin_adds_sets_and_resources() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(CorePlugin);
        fn dummy() {}
        app.add_systems(Update, dummy.in_set(SimulationSet::Input));
        app.add_systems(Update, dummy.in_set(SimulationSet::Visuals));
        app.update();
        assert_eq!(app.world().resource::<Score>().value(), 0);
        assert!(app.world().contains_resource::<Viewport>());
        assert!(app.world().contains_resource::<FrameClock>());
        assert!(app.world().contains_resource::<Events<PointerDown>>());
        assert!(app.world().contains_resource::<Events<BubblePopped>>());
    }

    #[test]
    fn sets_run_in_chain_order() {
        #[derive(Resource, Default)]
        struct Trace(Vec<&'static str>);

        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(CorePlugin);
        app.init_resource::<Trace>();
        // Registered out of order on purpose.
        app.add_systems(
            Update,
            (
                (|mut t: ResMut<Trace>| t.0.push("prune")).in_set(SimulationSet::Prune),
                (|mut t: ResMut<Trace>| t.0.push("input")).in_set(SimulationSet::Input),
                (|mut t: ResMut<Trace>| t.0.push("bubbles")).in_set(SimulationSet::Bubbles),
                (|mut t: ResMut<Trace>| t.0.push("spawn")).in_set(SimulationSet::Spawn),
            ),
        );
        app.update();
        assert_eq!(
            app.world().resource::<Trace>().0,
            vec!["input", "spawn", "bubbles", "prune"]
        );
    }
}
