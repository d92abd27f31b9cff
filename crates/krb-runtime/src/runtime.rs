use std::collections::HashMap;

use krb_backend::{CustomComponentRegistry, GraphicsBackend, HandlerRegistry, TextureHandle};
use krb_build::{BuildOutput, WindowConfig};
use krb_format::Document;
use krb_interaction::{hover_brightened, resolve_frame_interaction, FrameInteraction};
use krb_model::{ComponentInstance, ElementId, ElementKind, RenderContext, RenderElement, TextAlignment};
use krb_types::{Color, EdgeInsets, Point, Rect, Size};

use crate::config::RuntimeConfig;
use crate::error::Result;
use crate::frame::{FrameInput, FrameOutcome};
use crate::metrics::FrameMetrics;

/// A fully built document paired with a [`GraphicsBackend`], driving the
/// per-frame sequence in spec §4.8. Generic over the backend so this
/// crate never names a concrete window or rendering library.
pub struct Runtime<B: GraphicsBackend> {
    context: RenderContext,
    document: Document,
    window: WindowConfig,
    config: RuntimeConfig,
    backend: B,
    handlers: HandlerRegistry,
    components: CustomComponentRegistry,
    hooks_run: bool,
    texture_sizes: HashMap<u16, Size>,
    texture_handles: HashMap<u16, TextureHandle>,
    last_interaction: FrameInteraction,
}

impl<B: GraphicsBackend> Runtime<B> {
    /// Runs the build pipeline over `document` and pairs the resulting
    /// tree with `backend`. Keeps `document` around afterward: component
    /// definition names (for hook matching, spec §4.9) and resource
    /// paths (for texture loading) are never copied onto the render
    /// tree, since nothing else needs them once expansion has run.
    pub fn new(document: Document, config: RuntimeConfig, backend: B) -> Result<Self> {
        let BuildOutput {
            context,
            mut window,
        } = krb_build::build(&document)?;

        if !document.header.has_app() {
            window.width = config.fallback_width;
            window.height = config.fallback_height;
            window.title = config.fallback_title.clone();
            window.resizable = config.fallback_resizable;
            window.scale_factor = config.fallback_scale_factor;
        }

        Ok(Self {
            context,
            document,
            window,
            config,
            backend,
            handlers: HandlerRegistry::new(),
            components: CustomComponentRegistry::new(),
            hooks_run: false,
            texture_sizes: HashMap::new(),
            texture_handles: HashMap::new(),
            last_interaction: FrameInteraction::default(),
        })
    }

    #[must_use]
    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    #[must_use]
    pub fn window(&self) -> &WindowConfig {
        &self.window
    }

    pub fn register_handler(&mut self, name: impl Into<String>, handler: impl FnMut() + 'static) {
        self.handlers.register(name, handler);
    }

    pub fn register_component(
        &mut self,
        name: impl Into<String>,
        hook: impl FnMut(&mut RenderContext, ComponentInstance) + 'static,
    ) {
        self.components.register(name, hook);
    }

    /// Drives one frame without a real window: build input by hand, read
    /// the outcome back, assert on it. The seam host programs and the
    /// scenario tests (spec §8) both use instead of `run`'s blocking
    /// loop.
    pub fn step(&mut self, input: FrameInput) -> FrameOutcome {
        self.run_component_hooks_once();

        if let Some(size) = input.resized {
            self.apply_resize(size);
        }

        self.ensure_textures_loaded();

        let roots = self.context.roots().to_vec();
        let viewport = Rect::from_origin_size(Point::ZERO, self.backend.window_size());
        let metrics = FrameMetrics::new(&self.backend, &self.texture_sizes);
        krb_layout::layout_frame(&mut self.context, &roots, viewport, self.window.scale_factor, &metrics);

        let interaction = resolve_frame_interaction(&self.context, &roots, input.pointer);
        self.backend.set_cursor(interaction.cursor);
        self.last_interaction = interaction;

        let dispatched_handler = if input.left_just_pressed {
            interaction
                .hovered
                .and_then(|id| self.context.get(id))
                .and_then(|element| element.click_handler.clone())
        } else {
            None
        };
        if let Some(name) = &dispatched_handler {
            tracing::info!(handler = %name, "dispatching click handler");
            self.handlers.invoke(name);
        }

        FrameOutcome {
            hovered: interaction.hovered,
            cursor: interaction.cursor,
            dispatched_handler,
        }
    }

    /// Draws the current layout (spec §4.8 step 3). Kept separate from
    /// `step` so tests can drive input/layout without a backend capable
    /// of drawing, and so a real host can draw at a different cadence
    /// than it polls input if it ever needs to.
    pub fn draw_frame(&mut self) {
        let viewport = Rect::from_origin_size(Point::ZERO, self.backend.window_size());
        self.backend.draw_rect(viewport, self.background_color());

        let roots = self.context.roots().to_vec();
        let scale = self.window.scale_factor;
        let hovered = self.last_interaction.hovered;
        for root in roots {
            self.draw_element(root, hovered, scale);
        }
    }

    /// Blocks, running the frame loop until the backend signals
    /// window-close (spec §5).
    pub fn run(mut self) -> Result<()> {
        while !self.backend.should_close() {
            self.backend.begin_frame();
            let input = self.poll_input();
            self.step(input);
            self.draw_frame();
            self.backend.end_frame();
        }
        Ok(())
    }

    fn poll_input(&mut self) -> FrameInput {
        FrameInput {
            pointer: self.backend.mouse_position(),
            left_just_pressed: self.backend.mouse_left_just_pressed(),
            resized: self.backend.poll_resize(),
        }
    }

    fn run_component_hooks_once(&mut self) {
        if self.hooks_run {
            return;
        }
        self.hooks_run = true;

        let instances = self.context.component_instances().to_vec();
        for instance in instances {
            let Some(definition) = self
                .document
                .component_definitions
                .get(instance.definition_index as usize)
            else {
                continue;
            };
            let Some(name) = self.document.strings.get(u16::from(definition.name_index)) else {
                continue;
            };
            let name = name.to_owned();
            self.components.invoke(&name, &mut self.context, instance);
        }
    }

    /// A resize only ever touches the App root's declared size (spec
    /// §4.8 step 1's "update ... the App element's render_w/h"): layout
    /// recomputes from declared size every frame regardless, so there is
    /// no separate render_w/h to poke directly.
    fn apply_resize(&mut self, size: Size) {
        if !self.window.resizable {
            return;
        }
        self.window.width = size.width.max(0.0) as u16;
        self.window.height = size.height.max(0.0) as u16;
        let scale = self.window.scale_factor.max(f32::EPSILON);

        let Some(&app_root) = self.context.roots().first() else {
            return;
        };
        if let Some(element) = self.context.get_mut(app_root) {
            if element.kind == ElementKind::App {
                element.declared_size = (
                    (size.width / scale).round() as u16,
                    (size.height / scale).round() as u16,
                );
            }
        }
    }

    /// Loads any texture a visible image element references but hasn't
    /// been loaded yet. Run every frame because there is no dependency
    /// tracking for "newly visible" — the HashMap lookup that skips
    /// already-loaded resources makes repeat calls cheap.
    fn ensure_textures_loaded(&mut self) {
        let roots = self.context.roots().to_vec();
        let mut needed: Vec<u16> = Vec::new();
        for root in roots {
            for id in self.context.descendants(root) {
                if let Some(index) = self.context.get(id).and_then(|e| e.image_resource) {
                    if !self.texture_sizes.contains_key(&index) {
                        needed.push(index);
                    }
                }
            }
        }
        needed.sort_unstable();
        needed.dedup();

        for index in needed {
            let Some(resource) = self.document.resources.get(index as usize) else {
                tracing::warn!(index, "image_resource index has no matching resource entry");
                continue;
            };
            let Some(path) = self.document.strings.get(u16::from(resource.path_index)) else {
                tracing::warn!(index, "resource path string index is invalid");
                continue;
            };
            let path = path.to_owned();
            match self.backend.load_texture(&path) {
                Some(handle) => {
                    let size = self.backend.texture_size(handle);
                    self.texture_handles.insert(index, handle);
                    self.texture_sizes.insert(index, size);
                }
                None => tracing::warn!(%path, "failed to load texture resource"),
            }
        }
    }

    fn background_color(&self) -> Color {
        self.context
            .roots()
            .first()
            .and_then(|&id| self.context.get(id))
            .and_then(|element| element.background_color)
            .unwrap_or(self.config.default_bg)
    }

    fn draw_element(&mut self, id: ElementId, hovered: Option<ElementId>, scale: f32) {
        let Some(snapshot) = self.context.get(id).map(DrawSnapshot::from) else {
            return;
        };
        if snapshot.is_placeholder || !snapshot.is_visible {
            return;
        }

        let is_hovered = hovered == Some(id);
        let (background, border) = if snapshot.kind == ElementKind::Button && is_hovered {
            hover_brightened(snapshot.background_color, snapshot.border_color)
        } else {
            (snapshot.background_color, snapshot.border_color)
        };

        if snapshot.kind != ElementKind::Text {
            self.backend
                .draw_rect(snapshot.render_rect, background.unwrap_or(self.config.default_bg));
        }

        let borders = EdgeInsets::new(
            snapshot.border_widths[0],
            snapshot.border_widths[1],
            snapshot.border_widths[2],
            snapshot.border_widths[3],
        )
        .clamped_for(scale, snapshot.render_rect.width, snapshot.render_rect.height);

        let border_color = border.unwrap_or(self.config.default_border);
        if border_color.a > 0 {
            self.backend.draw_border(snapshot.render_rect, borders, border_color);
        }

        let content = snapshot.render_rect.inset(borders);
        self.backend.push_scissor(content);

        if matches!(snapshot.kind, ElementKind::Text | ElementKind::Button) {
            if let Some(text) = snapshot.text.as_deref() {
                if !text.is_empty() {
                    self.draw_text_content(text, &snapshot, content, scale);
                }
            }
        }

        if snapshot.kind == ElementKind::Image {
            if let Some(handle) = snapshot.image_resource.and_then(|i| self.texture_handles.get(&i)) {
                self.backend.draw_texture(*handle, content);
            }
        }

        self.backend.pop_scissor();

        for child in &snapshot.children {
            self.draw_element(*child, hovered, scale);
        }
    }

    fn draw_text_content(&mut self, text: &str, snapshot: &DrawSnapshot, content: Rect, scale: f32) {
        let font_size = snapshot.font_size * scale;
        let measured = self.backend.measure_text(text, font_size);
        let alignment = snapshot.text_alignment.unwrap_or(TextAlignment::Center);
        let x = match alignment {
            TextAlignment::Start | TextAlignment::SpaceBetween => content.x,
            TextAlignment::Center => content.x + (content.width - measured.width) / 2.0,
            TextAlignment::End => content.x + content.width - measured.width,
        }
        .max(content.x);
        let y = content.y + (content.height - font_size) / 2.0;

        let color = match snapshot.foreground_color {
            Some(color) if color.is_transparent() || color.is_rgb_black() => Color::WHITE,
            Some(color) => color,
            None => self.config.default_fg,
        };

        self.backend.draw_text(text, Point::new(x, y), font_size, color);
    }
}

/// Fields `draw_element` needs, cloned out of the arena before making
/// any `&mut self.backend` call — holding a `&RenderElement` across
/// those calls would conflict with `self.context`'s other borrows.
struct DrawSnapshot {
    kind: ElementKind,
    is_placeholder: bool,
    is_visible: bool,
    background_color: Option<Color>,
    foreground_color: Option<Color>,
    border_color: Option<Color>,
    border_widths: [f32; 4],
    render_rect: Rect,
    text: Option<String>,
    text_alignment: Option<TextAlignment>,
    font_size: f32,
    image_resource: Option<u16>,
    children: Vec<ElementId>,
}

impl From<&RenderElement> for DrawSnapshot {
    fn from(element: &RenderElement) -> Self {
        Self {
            kind: element.kind,
            is_placeholder: element.is_placeholder,
            is_visible: element.is_visible,
            background_color: element.background_color,
            foreground_color: element.foreground_color,
            border_color: element.border_color,
            border_widths: element.border_widths,
            render_rect: element.render_rect,
            text: element.text.clone(),
            text_alignment: element.text_alignment,
            font_size: element.font_size,
            image_resource: element.image_resource,
            children: element.children.clone(),
        }
    }
}
