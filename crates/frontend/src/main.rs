mod app;
mod forms;
mod layout;
mod pages;

use app::App;
use tracing_subscriber::prelude::*;
use tracing_web::MakeWebConsoleWriter;

fn main() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(MakeWebConsoleWriter::new());
    tracing_subscriber::registry().with(fmt_layer).init();

    // Dependencies that still log through the `log` facade
    wasm_logger::init(wasm_logger::Config::default());

    yew::Renderer::<App>::new().render();
}
