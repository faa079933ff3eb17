use bevy::prelude::*;

/// Primary-button press or touch start, in viewport coordinates (top-left origin, y down).
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PointerDown {
    pub position: Vec2,
}

/// Emitted once per successful pop, after the score has been updated.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BubblePopped {
    pub entity: Entity,
    pub position: Vec2,
    pub radius: f32,
    pub points: u32,
    /// Score after this pop.
    pub score: u64,
}
