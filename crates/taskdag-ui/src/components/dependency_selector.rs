//! "Add Dependency" form for one task
//!
//! Offers every other task as a blocker. The service may refuse the edge and
//! report the cycle it would close; that message is shown inline and the
//! graph keeps its current snapshot.
//!
//! The editor signal is passed in by the parent: a selector is rebuilt each
//! time the edited task changes, and the in-flight guard must survive that.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use taskdag_core::dependency::{
    DependencyEditor, Feedback, candidate_targets, option_label, run_submission,
};
use taskdag_core::{TaskId, TaskNode};

use crate::api::HttpBackend;

/// How long the success message stays visible
pub const SUCCESS_CLEAR_MS: u32 = 3_000;

#[component]
pub fn DependencySelector(
    task_id: TaskId,
    tasks: RwSignal<Vec<TaskNode>>,
    editor: RwSignal<DependencyEditor>,
    #[prop(optional)] backend: HttpBackend,
) -> impl IntoView {
    let selected = RwSignal::new(None::<TaskId>);

    let options = move || {
        tasks.with(|tasks| {
            candidate_targets(tasks, task_id)
                .into_iter()
                .map(|task| (task.id.to_string(), option_label(task)))
                .collect::<Vec<_>>()
        })
    };

    let on_change = move |event| selected.set(parse_selection(&event_target_value(&event)));

    let on_add = move |_| {
        let choice = selected.get_untracked();
        let Some(depends_on) = editor
            .try_update(|editor| start_request(editor, task_id, choice))
            .flatten()
        else {
            return;
        };

        let backend = backend.clone();
        let current = tasks.get_untracked();
        spawn_local(async move {
            let outcome = run_submission(&backend, task_id, depends_on, &current).await;
            if outcome.refreshed {
                tasks.set(outcome.tasks);
            }
            let succeeded = outcome.feedback.is_success();
            editor.update(|editor| editor.finish(outcome.feedback));

            if succeeded {
                selected.set(None);
                Timeout::new(SUCCESS_CLEAR_MS, move || {
                    editor.update(|editor| {
                        if editor.feedback().is_some_and(Feedback::is_success) {
                            editor.clear_feedback();
                        }
                    });
                })
                .forget();
            }
        });
    };

    let loading = move || editor.with(DependencyEditor::is_pending);
    let disabled = move || loading() || selected.with(Option::is_none);
    let feedback = move || editor.with(|editor| editor.feedback().cloned());
    let selected_value = move || selected.get().map(|id| id.to_string()).unwrap_or_default();

    view! {
        <div class="dependency-selector" style="border: 1px solid #e5e7eb; border-radius: 8px; padding: 12px;">
            <h3 style="margin: 0 0 8px 0;">"Add Dependency (Blocking Task)"</h3>
            <div style="display: flex; gap: 8px;">
                <select
                    style="flex: 1; padding: 6px; border: 1px solid #d1d5db; border-radius: 4px;"
                    prop:value=selected_value
                    on:change=on_change
                    disabled=loading
                >
                    <option value="">"Select a task..."</option>
                    <For
                        each=options
                        key=|(value, label)| (value.clone(), label.clone())
                        children=|(value, label)| view! { <option value=value>{label}</option> }
                    />
                </select>
                <button
                    class="btn btn-add"
                    style="background-color: #3b82f6; color: white; padding: 6px 16px; border: none; border-radius: 4px; cursor: pointer;"
                    on:click=on_add
                    disabled=disabled
                >
                    {move || button_label(loading())}
                </button>
            </div>
            {move || feedback().map(|feedback| {
                let color = if feedback.is_success() { "#059669" } else { "#dc2626" };
                view! {
                    <p style=format!("margin: 8px 0 0 0; font-size: 14px; color: {color};")>
                        {feedback.message().to_string()}
                    </p>
                }
            })}
        </div>
    }
}

/// Marks the request in flight and returns the blocker to send
///
/// `None` when nothing is selected, a request is already pending (possibly
/// started from an earlier selector), or the pair is refused locally.
pub fn start_request(
    editor: &mut DependencyEditor,
    task_id: TaskId,
    selected: Option<TaskId>,
) -> Option<TaskId> {
    let depends_on = selected?;
    editor.begin(task_id, depends_on).ok()?;
    Some(depends_on)
}

/// Select value to task id; the placeholder and garbage map to `None`
#[must_use]
pub fn parse_selection(value: &str) -> Option<TaskId> {
    value.trim().parse::<i64>().ok().map(TaskId::new)
}

#[must_use]
pub const fn button_label(loading: bool) -> &'static str {
    if loading { "Adding..." } else { "Add" }
}
