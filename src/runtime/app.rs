use std::num::NonZeroU32;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context as _, Result};
use fontdue::{Font, FontSettings};
use softbuffer::{Context, Surface};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Window, WindowId};

use ember_ui::geometry::Vec2;
use ember_ui::panel::PanelCreateInfo;
use ember_ui::pipeline::{CursorHint, PipelineState, UiEvent};
use ember_ui::render::{DrawList, Frame, GlyphCache, TextPainter};
use ember_ui::tracing::LayoutSnapshot;

use super::input::{cursor_icon, WindowInput, WindowViewport};

/// Sandbox panels: title and size, all submitted at the origin
const DEMO_PANELS: [(&str, f32, f32); 5] = [
    ("Panel", 200.0, 550.0),
    ("PanelOne", 300.0, 600.0),
    ("PanelTwo", 100.0, 550.0),
    ("PanelThree", 300.0, 300.0),
    ("PanelFour", 300.0, 200.0),
];

/// Options the sandbox takes from the command line
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub width: u32,
    pub height: u32,
    pub font: Option<PathBuf>,
    pub dump_layout: Option<PathBuf>,
}

/// Software presenter: a persistent back buffer copied to the surface
struct Renderer {
    surface: Surface<Rc<Window>, Rc<Window>>,
    back_buffer: Vec<u32>,
    size: PhysicalSize<u32>,
}

impl Renderer {
    fn new(window: Rc<Window>, context: &Context<Rc<Window>>) -> Result<Self> {
        let surface = Surface::new(context, Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create surface: {}", e))?;
        let mut renderer = Self {
            surface,
            back_buffer: Vec::new(),
            size: PhysicalSize::new(0, 0),
        };
        renderer.resize(window.inner_size())?;
        Ok(renderer)
    }

    fn resize(&mut self, size: PhysicalSize<u32>) -> Result<()> {
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
        else {
            // Minimized
            return Ok(());
        };
        if size == self.size {
            return Ok(());
        }

        self.surface
            .resize(width, height)
            .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))?;
        self.back_buffer
            .resize(size.width as usize * size.height as usize, 0);
        self.size = size;
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("Failed to get surface buffer: {}", e))?;
        if buffer.len() == self.back_buffer.len() {
            buffer.copy_from_slice(&self.back_buffer);
        }
        buffer
            .present()
            .map_err(|e| anyhow::anyhow!("Failed to present buffer: {}", e))
    }
}

pub struct App {
    pipeline: PipelineState,
    options: AppOptions,
    window: Option<Rc<Window>>,
    context: Option<Context<Rc<Window>>>,
    renderer: Option<Renderer>,
    input: WindowInput,
    draw_list: DrawList,
    font: Option<Font>,
    glyph_cache: GlyphCache,
    cursor_hint: CursorHint,
    last_snapshot: Option<LayoutSnapshot>,
}

impl App {
    pub fn new(mut pipeline: PipelineState, options: AppOptions) -> Self {
        let color = pipeline.theme().panel.background;
        for (title, width, height) in DEMO_PANELS {
            let handle = pipeline.submit_panel(PanelCreateInfo::new(
                title,
                Vec2::ZERO,
                Vec2::new(width, height),
                color,
            ));
            pipeline.add_button(handle, "whatever", Vec2::new(80.0, 30.0));
        }

        let font = options.font.as_deref().and_then(|path| match load_font(path) {
            Ok(font) => Some(font),
            Err(e) => {
                tracing::warn!("{:#}, drawing without text", e);
                None
            }
        });

        Self {
            pipeline,
            options,
            window: None,
            context: None,
            renderer: None,
            input: WindowInput::default(),
            draw_list: DrawList::new(),
            font,
            glyph_cache: GlyphCache::default(),
            cursor_hint: CursorHint::Default,
            last_snapshot: None,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title("ember")
            .with_inner_size(LogicalSize::new(self.options.width, self.options.height));

        let window = Rc::new(
            event_loop
                .create_window(attributes)
                .context("Failed to create window")?,
        );
        let context = Context::new(Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create softbuffer context: {}", e))?;
        let renderer = Renderer::new(Rc::clone(&window), &context)?;

        tracing::info!(
            "Window created at {}x{} (scale {})",
            window.inner_size().width,
            window.inner_size().height,
            window.scale_factor()
        );

        self.renderer = Some(renderer);
        self.context = Some(context);
        self.window = Some(window);
        Ok(())
    }

    fn viewport(&self) -> Option<WindowViewport> {
        self.window.as_ref().map(|window| WindowViewport {
            size: window.inner_size(),
            scale_factor: window.scale_factor(),
        })
    }

    /// Run one pipeline frame and present it
    fn redraw(&mut self) -> Result<()> {
        let Some(viewport) = self.viewport() else {
            return Ok(());
        };
        if viewport.size.width == 0 || viewport.size.height == 0 {
            return Ok(());
        }

        self.draw_list.clear();
        let output = self
            .pipeline
            .execute_from(&self.input, &viewport, &mut self.draw_list);

        for event in &output.events {
            match event {
                UiEvent::ButtonClicked { panel, label, .. } => {
                    tracing::info!(panel = panel.0, "Button '{}' clicked", label)
                }
                other => tracing::debug!(?other, "UI event"),
            }
        }

        if output.cursor_hint != self.cursor_hint {
            self.cursor_hint = output.cursor_hint;
            if let Some(window) = &self.window {
                window.set_cursor(cursor_icon(self.cursor_hint));
            }
        }

        if tracing::enabled!(tracing::Level::TRACE) {
            let snapshot = LayoutSnapshot::from_pipeline(&self.pipeline);
            if let Some(diff) = self
                .last_snapshot
                .as_ref()
                .and_then(|previous| previous.diff(&snapshot))
            {
                tracing::trace!("Layout: {}", diff);
            }
            self.last_snapshot = Some(snapshot);
        }

        let Some(renderer) = self.renderer.as_mut() else {
            return Ok(());
        };
        renderer.resize(viewport.size)?;

        let title_bar_height = self.pipeline.config().title_bar_height;
        let mut painter = self
            .font
            .as_ref()
            .map(|font| TextPainter::new(font, &mut self.glyph_cache));
        let mut frame = Frame::new(
            &mut renderer.back_buffer,
            viewport.size.width as usize,
            viewport.size.height as usize,
        );
        frame.draw_list(
            &self.draw_list,
            &viewport,
            self.pipeline.theme(),
            title_bar_height,
            painter.as_mut(),
        );

        renderer.present()
    }

    fn dump_layout(&self) {
        let Some(path) = &self.options.dump_layout else {
            return;
        };
        let result = LayoutSnapshot::from_pipeline(&self.pipeline)
            .to_json()
            .context("Failed to serialize layout")
            .and_then(|json| {
                std::fs::write(path, json)
                    .with_context(|| format!("Failed to write layout to {}", path.display()))
            });
        match result {
            Ok(()) => tracing::info!("Wrote layout to {}", path.display()),
            Err(e) => tracing::error!("{:#}", e),
        }
    }
}

fn load_font(path: &std::path::Path) -> Result<Font> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read font at {}", path.display()))?;
    Font::from_bytes(bytes, FontSettings::default())
        .map_err(|e| anyhow::anyhow!("Failed to parse font {}: {}", path.display(), e))
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                tracing::error!("{:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone() else {
            return;
        };
        if window_id != window.id() {
            return;
        }
        let Some(viewport) = self.viewport() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                self.dump_layout();
                event_loop.exit();
            }
            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                self.input.refresh(&viewport);
                window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.redraw() {
                    tracing::error!("Render failed: {:#}", e);
                }
            }
            ref other => {
                if self.input.handle_event(other, &viewport) {
                    window.request_redraw();
                }
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
    }
}
