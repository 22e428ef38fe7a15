use crate::rooms::Direction;

/// Sink for the moments the direction core wants the presentation layer to
/// react to. Implemented by the caller; the core never knows what a camera
/// or a door animation is.
pub trait DirectorEventListener {
    fn on_camera_shake(&mut self, duration_seconds: f32, intensity: f32);
    fn on_door_entry(&mut self, side: Direction);
}

pub struct NullListener;

impl DirectorEventListener for NullListener {
    fn on_camera_shake(&mut self, _duration_seconds: f32, _intensity: f32) {}

    fn on_door_entry(&mut self, _side: Direction) {}
}
