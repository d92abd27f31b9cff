//! Opens a window with one button; clicking it prints to stdout.
//!
//! Mirrors the reference renderer's button example: a static layout, a
//! named click handler resolved by string rather than function pointer,
//! and a main loop that polls input, steps the frame, and draws.

mod document;

use krb_raylib::RaylibBackend;
use krb_runtime::{Runtime, RuntimeConfig};

fn handle_button_click() {
    println!("------------------------------------");
    println!(">>> Button clicked! <<<");
    println!("------------------------------------");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    krb_log::init();

    let bytes = document::document_bytes();
    let doc = krb_format::parse(&bytes)?;

    // The window has to exist before a `Runtime` can be built against it,
    // but the title/size/resizable flag only come out of the App
    // element's properties after the build pipeline runs — so run it
    // once here just to read those back, then let `Runtime::new` run it
    // again for real.
    let preview = krb_build::build(&doc)?;
    let backend = RaylibBackend::open(
        preview.window.width,
        preview.window.height,
        &preview.window.title,
        preview.window.resizable,
    );

    let mut runtime = Runtime::new(doc, RuntimeConfig::default(), backend)?;
    runtime.register_handler("handleButtonClick", handle_button_click);
    runtime.run()?;
    Ok(())
}
