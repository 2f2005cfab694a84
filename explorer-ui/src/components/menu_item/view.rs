use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_logger::tracing::warn;
use dioxus_web::WebEventExt;
use shared_types::Trace;

use super::editor::{NameEditor, RenameCommit, MAX_NAME_LEN};
use super::traces::TracePaths;
use crate::interop::{BrowserDocument, OutsideClickGuard, RootSlot};
use crate::signals::SignalHub;

pub const DEFAULT_CONTAINER_CLASS: &str = "menu-item-trace";

/// DOM id of an entry, for parent-side lookups such as scroll-to-item.
pub fn menu_item_element_id(container_class_name: &str, index: usize) -> String {
    format!("{}-{}", container_class_name, index)
}

/// Apply a keystroke, then broadcast once the editor borrow is released so
/// subscribers are free to read it.
pub(crate) fn broadcast_keystroke(
    mut editor: Signal<NameEditor>,
    value: &str,
    experiment_uuid: &str,
    signals: &SignalHub,
) {
    let preview = editor.write().type_text(value);
    if let Some(name) = preview {
        signals.fire_tab_changed(name, experiment_uuid);
    }
}

pub(crate) fn commit_on_enter(
    mut editor: Signal<NameEditor>,
    index: usize,
    on_commit: impl FnOnce(String, usize),
) {
    let commit = editor.write().confirm(index);
    if let Some(RenameCommit { name, index }) = commit {
        on_commit(name, index);
    }
}

pub(crate) fn outside_dismissal(mut editor: Signal<NameEditor>) -> impl FnMut() + 'static {
    move || {
        if editor.peek().is_editing() {
            editor.write().dismiss();
        }
    }
}

/// One experiment entry of the trace explorer list.
///
/// Selection and context-menu semantics belong to the parent; this component
/// only forwards the raw events together with the experiment id.
#[component]
pub fn MenuItemTrace(
    index: usize,
    experiment_name: String,
    experiment_uuid: String,
    traces: Vec<Trace>,
    container_class_name: String,
    signals: SignalHub,
    on_tab_name_change: Callback<(String, usize)>,
    on_click: Callback<(MouseEvent, String)>,
    on_context_menu: Callback<(MouseEvent, String)>,
) -> Element {
    let mut editor = use_signal(|| NameEditor::new(experiment_name.clone()));
    let root: RootSlot<web_sys::Element> = use_hook(|| Rc::new(RefCell::new(None)));
    let listener = use_hook(|| Rc::new(RefCell::new(None::<OutsideClickGuard<BrowserDocument>>)));

    // The document only exists on the client, so attach after render.
    {
        let root = root.clone();
        let listener = listener.clone();
        use_effect(move || {
            if listener.borrow().is_some() {
                return;
            }
            let guard = BrowserDocument::current().and_then(|document| {
                OutsideClickGuard::attach(document, root.clone(), outside_dismissal(editor))
            });
            match guard {
                Ok(guard) => *listener.borrow_mut() = Some(guard),
                Err(e) => warn!("Outside-click dismissal unavailable: {}", e),
            }
        });
    }

    {
        let listener = listener.clone();
        use_drop(move || {
            listener.borrow_mut().take();
        });
    }

    let element_id = menu_item_element_id(&container_class_name, index);
    let click_uuid = experiment_uuid.clone();
    let context_uuid = experiment_uuid.clone();
    let input_uuid = experiment_uuid.clone();
    let input_signals = signals.clone();
    let mounted_root = root.clone();
    let editing = editor.read().is_editing();
    let current_name = editor.read().current_name().to_string();

    rsx! {
        div {
            class: "{container_class_name}",
            id: "{element_id}",
            "data-id": "{index}",
            onmounted: move |e: MountedEvent| {
                *mounted_root.borrow_mut() = e.data().try_as_web_event();
            },
            onclick: move |e| on_click.call((e, click_uuid.clone())),
            oncontextmenu: move |e| on_context_menu.call((e, context_uuid.clone())),

            div {
                class: "trace-element-container",
                div {
                    class: "trace-element-info",
                    h4 {
                        class: "trace-element-name",
                        if editing {
                            input {
                                name: "tab-name",
                                class: "theia-input",
                                maxlength: "{MAX_NAME_LEN}",
                                value: "{current_name}",
                                oninput: move |e| {
                                    broadcast_keystroke(editor, &e.value(), &input_uuid, &input_signals);
                                },
                                onclick: move |e| e.stop_propagation(),
                                onkeydown: move |e| {
                                    if e.key() == Key::Enter {
                                        commit_on_enter(editor, index, |name, index| {
                                            on_tab_name_change.call((name, index));
                                        });
                                    }
                                },
                            }
                        } else {
                            "{current_name}"
                        }
                        div {
                            class: "edit-trace-name",
                            onclick: move |e| {
                                e.stop_propagation();
                                editor.write().activate();
                            },
                            EditGlyph {}
                        }
                    }
                    TracePaths { traces: traces.clone() }
                }
            }
        }
    }
}

#[component]
fn EditGlyph() -> Element {
    rsx! {
        svg {
            width: "16px",
            height: "16px",
            view_box: "0 0 512 512",
            g {
                path {
                    fill: "#020202",
                    d: "M422.953,176.019c0.549-0.48,1.09-0.975,1.612-1.498l21.772-21.772c12.883-12.883,12.883-33.771,0-46.654l-40.434-40.434c-12.883-12.883-33.771-12.883-46.653,0l-21.772,21.772c-0.523,0.523-1.018,1.064-1.498,1.613L422.953,176.019z",
                }
                polygon {
                    fill: "#020202",
                    points: "114.317,397.684 157.317,440.684 106.658,448.342 56,456 63.658,405.341 71.316,354.683",
                }
                polygon {
                    fill: "#020202",
                    points: "349.143,125.535 118.982,355.694 106.541,343.253 336.701,113.094 324.26,100.653 81.659,343.253 168.747,430.341 411.348,187.74",
                }
            }
        }
    }
}
