use dioxus::prelude::*;
use shared_types::Trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRow {
    pub key: String,
    pub label: String,
}

pub fn trace_rows(traces: &[Trace]) -> Vec<TraceRow> {
    traces
        .iter()
        .map(|trace| TraceRow {
            key: trace.uuid.clone(),
            label: format!(" > {}", trace.name),
        })
        .collect()
}

#[component]
pub fn TracePaths(traces: Vec<Trace>) -> Element {
    let rows = trace_rows(&traces);

    rsx! {
        div {
            class: "trace-element-path-container",
            for row in rows {
                div {
                    key: "{row.key}",
                    class: "trace-element-path child-element",
                    id: "{row.key}",
                    "{row.label}"
                }
            }
        }
    }
}
