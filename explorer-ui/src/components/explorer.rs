//! Experiment list panel hosting one `MenuItemTrace` per experiment.

use std::collections::HashMap;

use dioxus::prelude::*;
use dioxus_logger::tracing::{debug, info};
use shared_types::Experiment;

use super::menu_item::{MenuItemTrace, DEFAULT_CONTAINER_CLASS};
use crate::signals::{ExplorerSignal, SignalHub, SignalKind};

/// Store a committed rename. Returns false for an index that no longer exists.
pub fn apply_rename(experiments: &mut [Experiment], name: &str, index: usize) -> bool {
    match experiments.get_mut(index) {
        Some(experiment) => {
            experiment.name = name.to_string();
            true
        }
        None => false,
    }
}

/// Name to show in the panel header: a live preview if one is in flight.
pub fn display_name<'a>(
    experiment: &'a Experiment,
    previews: &'a HashMap<String, String>,
) -> &'a str {
    previews
        .get(&experiment.uuid)
        .map(String::as_str)
        .unwrap_or(&experiment.name)
}

#[component]
pub fn TraceExplorer(experiments: Vec<Experiment>) -> Element {
    let mut experiments = use_signal(|| experiments.clone());
    let mut selected = use_signal(|| None::<String>);
    let previews = use_signal(HashMap::<String, String>::new);
    let signals = use_hook(SignalHub::local);

    let subscription = use_hook({
        let signals = signals.clone();
        move || {
            signals.subscribe(SignalKind::TabChanged, move |signal| {
                if let ExplorerSignal::TabChanged(tab) = signal {
                    let mut previews = previews;
                    previews
                        .write()
                        .insert(tab.experiment_uuid.clone(), tab.name.clone());
                }
            })
        }
    });

    {
        let signals = signals.clone();
        use_drop(move || {
            signals.unsubscribe(subscription);
        });
    }

    let on_tab_name_change = use_callback(move |(name, index): (String, usize)| {
        let renamed = {
            let mut list = experiments.write();
            let uuid = list.get(index).map(|e| e.uuid.clone());
            apply_rename(&mut list, &name, index).then_some(uuid).flatten()
        };
        match renamed {
            Some(uuid) => {
                let mut previews = previews;
                previews.write().remove(&uuid);
                info!("Experiment {} renamed to {:?}", index, name);
            }
            None => debug!("Ignoring rename for stale index {}", index),
        }
    });

    let on_click = {
        let signals = signals.clone();
        use_callback(move |(_e, experiment_uuid): (MouseEvent, String)| {
            selected.set(Some(experiment_uuid.clone()));
            signals.fire_experiment_selected(experiment_uuid);
        })
    };

    let on_context_menu = use_callback(move |(e, experiment_uuid): (MouseEvent, String)| {
        e.prevent_default();
        info!("Context menu requested for experiment {}", experiment_uuid);
    });

    let list = experiments.read().clone();
    let header = selected
        .read()
        .as_ref()
        .and_then(|uuid| list.iter().find(|e| &e.uuid == uuid))
        .map(|e| display_name(e, &previews.read()).to_string())
        .unwrap_or_else(|| "No experiment selected".to_string());

    rsx! {
        div {
            class: "trace-explorer-opened-traces",
            h3 { class: "trace-explorer-header", "{header}" }
            for (index, experiment) in list.into_iter().enumerate() {
                MenuItemTrace {
                    key: "{experiment.uuid}",
                    index,
                    experiment_name: experiment.name.clone(),
                    experiment_uuid: experiment.uuid.clone(),
                    traces: experiment.traces.clone(),
                    container_class_name: DEFAULT_CONTAINER_CLASS.to_string(),
                    signals: signals.clone(),
                    on_tab_name_change,
                    on_click,
                    on_context_menu,
                }
            }
        }
    }
}
