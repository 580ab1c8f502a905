use diorama_engine::core::{App, AppControl, FrameCtx};
use diorama_engine::input::Key;
use diorama_engine::mesh::MeshLibrary;
use diorama_engine::render::MeshRenderer;
use diorama_engine::scene::DrawList;
use diorama_scenes::Scene;

/// Drives one scene per window: input, frame step, render.
pub struct StudioApp {
    scene: Box<dyn Scene>,
    draw_list: DrawList,
    renderer: MeshRenderer,
}

impl StudioApp {
    pub fn new(scene: Box<dyn Scene>, library: MeshLibrary) -> Self {
        Self {
            scene,
            draw_list: DrawList::new(),
            renderer: MeshRenderer::new(library),
        }
    }
}

impl App for StudioApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) || ctx.input_frame.key_pressed(Key::Q) {
            log::info!("quit requested");
            return AppControl::Exit;
        }

        for &button in &ctx.input_frame.buttons_pressed {
            self.scene.on_pointer_button(button);
        }

        // ── Simulate + record ─────────────────────────────────────────────
        self.draw_list.clear();
        self.scene.frame_step(&ctx.time, &mut self.draw_list);

        // ── Render ────────────────────────────────────────────────────────
        let projection = self.scene.projection();
        let dl = &mut self.draw_list;
        let renderer = &mut self.renderer;

        ctx.render(self.scene.clear_color(), &projection, |rctx, target| {
            renderer.render(rctx, target, dl);
        })
    }
}
