mod components;

use components::page::Page;

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Rendering {}", shared::SITE_NAME);
    yew::Renderer::<Page>::new().render();
}
