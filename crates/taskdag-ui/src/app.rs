//! Root component
//!
//! Owns the task snapshot and the dependency editor. The graph and the
//! dependency selector both read the snapshot; the selector replaces it after
//! a successful add. The editor outlives any one selector, so switching the
//! edited task while a request is in flight keeps the in-flight guard.

use leptos::prelude::*;
use leptos::task::spawn_local;
use taskdag_core::dependency::{DependencyEditor, TaskBackend, option_label};
use taskdag_core::{TaskId, TaskNode};

use crate::api::HttpBackend;
use crate::components::dependency_selector::parse_selection;
use crate::components::{DependencySelector, GraphView};

#[component]
pub fn App() -> impl IntoView {
    let backend = HttpBackend::default();
    let tasks = RwSignal::new(Vec::<TaskNode>::new());
    let load_error = RwSignal::new(None::<String>);
    let editing = RwSignal::new(None::<TaskId>);
    let editor = RwSignal::new(DependencyEditor::new());

    {
        let backend = backend.clone();
        spawn_local(async move {
            match backend.list_tasks().await {
                Ok(snapshot) => {
                    web_sys::console::log_1(&format!("loaded {} tasks", snapshot.len()).into());
                    tasks.set(snapshot);
                }
                Err(err) => {
                    web_sys::console::error_1(&err.to_string().into());
                    load_error.set(Some(err.to_string()));
                }
            }
        });
    }

    let on_pick = move |event| editing.set(parse_selection(&event_target_value(&event)));

    let selector = move || {
        editing.get().map(|task_id| {
            view! {
                <DependencySelector task_id=task_id tasks=tasks editor=editor backend=backend.clone() />
            }
        })
    };

    view! {
        <main style="max-width: 880px; margin: 0 auto; padding: 16px; font-family: sans-serif; display: flex; flex-direction: column; gap: 16px;">
            <h1 style="margin: 0;">"Task Dependencies"</h1>
            {move || load_error.get().map(|err| view! {
                <p style="color: #dc2626;">{format!("Failed to load tasks: {err}")}</p>
            })}
            <GraphView tasks=tasks />
            <label style="font-size: 14px;">
                "Edit task: "
                <select on:change=on_pick>
                    <option value="">"Select a task..."</option>
                    <For
                        each=move || tasks.get()
                        key=|task| (task.id, task.title.clone())
                        children=|task| view! {
                            <option value=task.id.to_string()>{option_label(&task)}</option>
                        }
                    />
                </select>
            </label>
            {selector}
        </main>
    }
}
