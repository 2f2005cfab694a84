use dioxus::launch;
use dioxus::prelude::*;
use dioxus_logger::tracing::Level;
use shared_types::{Experiment, Trace};

use explorer_ui::TraceExplorer;

fn main() {
    // Initialize logging for WASM
    wasm_logger::init(wasm_logger::Config::default());
    dioxus_logger::init(Level::INFO).ok();

    launch(App);
}

fn sample_experiments() -> Vec<Experiment> {
    vec![
        Experiment::new(
            "boot-sequence",
            vec![
                Trace::new("trace-kernel", "/traces/boot/kernel"),
                Trace::new("trace-ust", "/traces/boot/ust"),
            ],
        ),
        Experiment::new(
            "network-stress",
            vec![Trace::new("trace-net", "/traces/net/kernel")],
        ),
    ]
}

#[component]
fn App() -> Element {
    rsx! {
        div {
            style: "min-height: 100vh; background-color: #111827; color: white; padding: 1rem;",
            TraceExplorer { experiments: sample_experiments() }
        }
    }
}
