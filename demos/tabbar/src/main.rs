//! A content area with a bottom tab bar, laid out by a registered
//! custom-component hook rather than the ordinary flow rules.
//!
//! Mirrors `custom_tabbar.c`'s division of labor: the hook reads the
//! placeholder's `position`/`orientation` custom properties and
//! distributes the tab bar's own children along the chosen axis, leaving
//! everything else (the content area above it) to ordinary layout.

mod document;

use krb_model::RenderContext;
use krb_raylib::RaylibBackend;
use krb_runtime::{Runtime, RuntimeConfig};
use krb_types::Rect;

use document::{TABBAR_HEIGHT, TABBAR_Y, WINDOW_WIDTH};

/// Lays out a `TabBar` instance's children evenly along `orientation`,
/// the way `layout_tabbar_children` in the reference implementation
/// divides its content rect among however many buttons it was given.
/// Runs once, before the first layout pass (spec for custom-component
/// hooks), so it works off the tab bar's own declared size rather than a
/// parent render rect that doesn't exist yet.
fn layout_tabbar(ctx: &mut RenderContext, instance: krb_model::ComponentInstance) {
    let position = ctx
        .get(instance.placeholder)
        .and_then(|p| p.custom_properties.get("position").cloned())
        .unwrap_or_else(|| "bottom".to_string());
    let orientation = ctx
        .get(instance.placeholder)
        .and_then(|p| p.custom_properties.get("orientation").cloned())
        .unwrap_or_else(|| "row".to_string());

    tracing::info!(position = %position, orientation = %orientation, "laying out tab bar");

    let children = ctx.get(instance.root).map(|r| r.children.clone()).unwrap_or_default();
    if children.is_empty() {
        return;
    }
    let count = children.len() as f32;

    // Only the row+bottom combination this demo's document declares is
    // fully worked out; a real host supporting every combination would
    // need the other position's own absolute offset too.
    let _ = position;
    for (index, &child) in children.iter().enumerate() {
        let rect = if orientation == "row" {
            let button_width = f32::from(WINDOW_WIDTH) / count;
            Rect::new(index as f32 * button_width, TABBAR_Y, button_width, TABBAR_HEIGHT)
        } else {
            let button_height = TABBAR_HEIGHT / count;
            Rect::new(0.0, TABBAR_Y + index as f32 * button_height, TABBAR_HEIGHT, button_height)
        };
        if let Some(button) = ctx.get_mut(child) {
            button.render_preset = true;
            button.render_rect = rect;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    krb_log::init();

    let bytes = document::document_bytes();
    let doc = krb_format::parse(&bytes)?;

    let preview = krb_build::build(&doc)?;
    let backend = RaylibBackend::open(
        preview.window.width,
        preview.window.height,
        &preview.window.title,
        preview.window.resizable,
    );

    let mut runtime = Runtime::new(doc, RuntimeConfig::default(), backend)?;
    runtime.register_component("TabBar", layout_tabbar);
    runtime.run()?;
    Ok(())
}
