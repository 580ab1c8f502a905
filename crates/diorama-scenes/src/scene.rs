use diorama_engine::input::MouseButton;
use diorama_engine::paint::Color;
use diorama_engine::scene::DrawList;
use diorama_engine::time::SceneTime;
use diorama_engine::transform::Projection;

/// A self-contained animated scene.
///
/// The frame driver owns the scene and calls [`frame_step`](Scene::frame_step)
/// once per presented frame with a cleared draw list.
pub trait Scene {
    /// Window title.
    fn title(&self) -> &str;

    fn projection(&self) -> Projection;

    fn clear_color(&self) -> Color;

    /// Mouse button pressed over the window.
    fn on_pointer_button(&mut self, button: MouseButton) {
        let _ = button;
    }

    /// Advances the simulation to `time` and records this frame's draw commands.
    fn frame_step(&mut self, time: &SceneTime, list: &mut DrawList);
}
