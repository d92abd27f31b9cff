//! A [`krb_backend::GraphicsBackend`] over raylib, the same library the
//! pre-Rust reference renderer drew with.
//!
//! `GraphicsBackend` calls one drawing primitive at a time with no shared
//! scope between them, which doesn't fit raylib-rs's safe wrapper (its
//! `RaylibDrawHandle` borrows the window for an entire `begin_drawing`/
//! `end_drawing` block). Going through `raylib::ffi` directly sidesteps
//! that mismatch at the cost of a handful of `unsafe` blocks around calls
//! that are individually side-effect-only and infallible in practice.

use std::collections::HashMap;
use std::ffi::CString;
use std::os::raw::c_int;

use krb_backend::{GraphicsBackend, TextureHandle};
use krb_interaction::CursorIcon;
use krb_types::{Color, EdgeInsets, Point, Rect, Size};
use raylib::ffi;

fn to_ffi_color(color: Color) -> ffi::Color {
    ffi::Color {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

fn cstring(text: &str) -> CString {
    // An embedded interior NUL can't occur in any string this backend draws
    // (KRB string-table entries, resource paths) — fall back to truncating
    // at the first NUL rather than panicking if one ever did.
    CString::new(text).unwrap_or_else(|err| {
        let valid = err.into_vec();
        CString::new(valid.split(|&b| b == 0).next().unwrap_or(&[])).unwrap_or_default()
    })
}

/// Owns the raylib window for its lifetime. Only one may exist per
/// process — raylib itself is global, singleton state.
pub struct RaylibBackend {
    textures: HashMap<u32, ffi::Texture2D>,
    next_handle: u32,
    resizable: bool,
    last_size: Size,
}

impl RaylibBackend {
    /// Opens a window sized `width`x`height` titled `title` (spec §4.8's
    /// host-side window setup, mirroring `InitWindow`/`SetTargetFPS` in
    /// the reference renderer).
    #[must_use]
    pub fn open(width: u16, height: u16, title: &str, resizable: bool) -> Self {
        let title = cstring(title);
        unsafe {
            ffi::InitWindow(i32::from(width), i32::from(height), title.as_ptr());
            if resizable {
                ffi::SetWindowState(ffi::ConfigFlags::FLAG_WINDOW_RESIZABLE as u32);
            }
            ffi::SetTargetFPS(60);
        }
        Self {
            textures: HashMap::new(),
            next_handle: 0,
            resizable,
            last_size: Size::new(f32::from(width), f32::from(height)),
        }
    }
}

impl Drop for RaylibBackend {
    fn drop(&mut self) {
        unsafe {
            for texture in self.textures.values() {
                ffi::UnloadTexture(*texture);
            }
            ffi::CloseWindow();
        }
    }
}

impl GraphicsBackend for RaylibBackend {
    fn window_size(&self) -> Size {
        unsafe { Size::new(ffi::GetScreenWidth() as f32, ffi::GetScreenHeight() as f32) }
    }

    fn poll_resize(&mut self) -> Option<Size> {
        if !self.resizable {
            return None;
        }
        let resized = unsafe { ffi::IsWindowResized() };
        if !resized {
            return None;
        }
        let size = self.window_size();
        if size == self.last_size {
            return None;
        }
        self.last_size = size;
        Some(size)
    }

    fn mouse_position(&self) -> Option<Point> {
        let pos = unsafe { ffi::GetMousePosition() };
        Some(Point::new(pos.x, pos.y))
    }

    fn mouse_left_just_pressed(&self) -> bool {
        unsafe { ffi::IsMouseButtonPressed(ffi::MouseButton::MOUSE_BUTTON_LEFT as c_int) }
    }

    fn should_close(&self) -> bool {
        unsafe { ffi::WindowShouldClose() }
    }

    fn set_cursor(&mut self, icon: CursorIcon) {
        let shape = match icon {
            CursorIcon::Default => ffi::MouseCursor::MOUSE_CURSOR_DEFAULT,
            CursorIcon::PointingHand => ffi::MouseCursor::MOUSE_CURSOR_POINTING_HAND,
        };
        unsafe { ffi::SetMouseCursor(shape as c_int) }
    }

    fn measure_text(&self, text: &str, font_size: f32) -> Size {
        let c_text = cstring(text);
        let width = unsafe { ffi::MeasureText(c_text.as_ptr(), font_size.round() as c_int) };
        Size::new(width as f32, font_size)
    }

    fn load_texture(&mut self, path: &str) -> Option<TextureHandle> {
        let c_path = cstring(path);
        let texture = unsafe { ffi::LoadTexture(c_path.as_ptr()) };
        if texture.id == 0 {
            return None;
        }
        let handle = TextureHandle(self.next_handle);
        self.next_handle += 1;
        self.textures.insert(handle.0, texture);
        Some(handle)
    }

    fn texture_size(&self, handle: TextureHandle) -> Size {
        self.textures
            .get(&handle.0)
            .map(|texture| Size::new(texture.width as f32, texture.height as f32))
            .unwrap_or(Size::ZERO)
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        unsafe {
            ffi::DrawRectangle(
                rect.x as c_int,
                rect.y as c_int,
                rect.width as c_int,
                rect.height as c_int,
                to_ffi_color(color),
            );
        }
    }

    fn draw_border(&mut self, rect: Rect, widths: EdgeInsets, color: Color) {
        let c = to_ffi_color(color);
        let side_height = (rect.height - widths.top - widths.bottom).max(0.0);
        unsafe {
            if widths.top > 0.0 {
                ffi::DrawRectangle(rect.x as c_int, rect.y as c_int, rect.width as c_int, widths.top.ceil() as c_int, c);
            }
            if widths.bottom > 0.0 {
                ffi::DrawRectangle(
                    rect.x as c_int,
                    (rect.bottom() - widths.bottom) as c_int,
                    rect.width as c_int,
                    widths.bottom.ceil() as c_int,
                    c,
                );
            }
            if widths.left > 0.0 {
                ffi::DrawRectangle(
                    rect.x as c_int,
                    (rect.y + widths.top) as c_int,
                    widths.left.ceil() as c_int,
                    side_height as c_int,
                    c,
                );
            }
            if widths.right > 0.0 {
                ffi::DrawRectangle(
                    (rect.right() - widths.right) as c_int,
                    (rect.y + widths.top) as c_int,
                    widths.right.ceil() as c_int,
                    side_height as c_int,
                    c,
                );
            }
        }
    }

    fn draw_text(&mut self, text: &str, origin: Point, font_size: f32, color: Color) {
        let c_text = cstring(text);
        unsafe {
            ffi::DrawText(
                c_text.as_ptr(),
                origin.x as c_int,
                origin.y as c_int,
                font_size.round() as c_int,
                to_ffi_color(color),
            );
        }
    }

    fn draw_texture(&mut self, handle: TextureHandle, rect: Rect) {
        let Some(texture) = self.textures.get(&handle.0).copied() else {
            tracing::warn!(handle = handle.0, "draw_texture called with an unknown handle");
            return;
        };
        let source = ffi::Rectangle {
            x: 0.0,
            y: 0.0,
            width: texture.width as f32,
            height: texture.height as f32,
        };
        let dest = ffi::Rectangle {
            x: rect.x,
            y: rect.y,
            width: rect.width,
            height: rect.height,
        };
        let tint = ffi::Color {
            r: 255,
            g: 255,
            b: 255,
            a: 255,
        };
        unsafe {
            ffi::DrawTexturePro(texture, source, dest, ffi::Vector2 { x: 0.0, y: 0.0 }, 0.0, tint);
        }
    }

    fn push_scissor(&mut self, rect: Rect) {
        unsafe {
            ffi::BeginScissorMode(rect.x as c_int, rect.y as c_int, rect.width as c_int, rect.height as c_int);
        }
    }

    fn pop_scissor(&mut self) {
        unsafe { ffi::EndScissorMode() }
    }

    fn begin_frame(&mut self) {
        unsafe { ffi::BeginDrawing() }
    }

    fn end_frame(&mut self) {
        unsafe { ffi::EndDrawing() }
    }
}
