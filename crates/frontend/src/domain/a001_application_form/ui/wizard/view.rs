use super::model::STEP_TITLES;
use super::view_model::ApplicationFormViewModel;
use crate::shared::theme::ThemeToggle;
use contracts::domain::a001_application_form::{AutosaveScheduler, FieldDef, FieldRepository};
use contracts::shared::form_settings::WizardSettings;
use leptos::prelude::*;

/// Builds the view model, starts autosave and the unload guard.
#[component]
pub fn ApplicationFormPage(settings: WizardSettings) -> impl IntoView {
    match ApplicationFormViewModel::new(&settings) {
        Ok(vm) => {
            vm.start_autosave(AutosaveScheduler::from_settings(&settings));
            vm.install_unload_guard();
            view! { <ApplicationForm vm=vm /> }.into_any()
        }
        Err(e) => {
            log::error!("Form setup failed: {}", e);
            view! { <div class="error">{format!("Form setup failed: {}", e)}</div> }.into_any()
        }
    }
}

#[component]
pub fn ApplicationForm(vm: ApplicationFormViewModel) -> impl IntoView {
    let total = STEP_TITLES.len();

    view! {
        <div class="wizard-container">
            <div class="wizard-header">
                <h2>{"Application"}</h2>
                <ThemeToggle />
            </div>

            <div class="progress">
                <div
                    id="progress-bar"
                    class="progress-fill"
                    style=move || format!("width: {}%;", vm.form.with(|f| f.progress_percent()))
                ></div>
            </div>

            <div class="step-buttons">
                {move || {
                    vm.form
                        .with(|f| f.step_buttons())
                        .into_iter()
                        .map(|b| {
                            let step = b.step;
                            view! {
                                <button
                                    type="button"
                                    class=format!("step-btn {}", b.status.as_class())
                                    data-step=step.to_string()
                                    on:click=move |_| vm.click_step(step)
                                >
                                    {b.label}
                                </button>
                            }
                        })
                        .collect_view()
                }}
            </div>

            <div class=move || {
                if vm.form.with(|f| f.lock_message().is_some()) { "lock-message show" } else { "lock-message" }
            }>
                {move || vm.form.with(|f| f.lock_message().unwrap_or_default().to_string())}
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error">{e}</div> })}

            <form
                id="multiStepForm"
                novalidate=true
                on:submit=move |ev| {
                    ev.prevent_default();
                    vm.submit();
                }
            >
                {(1..=total)
                    .map(|step| view! { <StepPanel vm=vm step=step /> })
                    .collect_view()}
            </form>

            <div class="draft-actions">
                <button type="button" id="saveDraft" class="btn" on:click=move |_| vm.save_draft()>
                    {"Save draft"}
                </button>
                <button type="button" id="loadDraft" class="btn" on:click=move |_| vm.load_draft()>
                    {"Load draft"}
                </button>
                <span id="lastSaved" class="last-saved">
                    {move || vm.form.with(|f| f.last_saved_label().unwrap_or_default().to_string())}
                </span>
            </div>
        </div>
    }
}

#[component]
fn StepPanel(vm: ApplicationFormViewModel, step: usize) -> impl IntoView {
    let total = STEP_TITLES.len();
    let title = STEP_TITLES.get(step - 1).copied().unwrap_or_default();
    let fields: Vec<FieldDef> = vm.form.with_untracked(|f| {
        f.fields().iter().filter(|d| d.step == Some(step)).cloned().collect()
    });

    view! {
        <div class=move || {
            if vm.form.with(|f| f.current_step()) == step { "form-step active" } else { "form-step" }
        }>
            <h3>{title}</h3>

            {fields.into_iter().map(|field| view! { <FieldInput vm=vm field=field /> }).collect_view()}

            {(step == total).then(|| view! { <Summary vm=vm /> })}

            <div class="step-actions">
                {(step > 1).then(|| view! {
                    <button type="button" class="btn prevBtn" on:click=move |_| vm.previous()>
                        {"Back"}
                    </button>
                })}
                {if step < total {
                    view! {
                        <button
                            type="button"
                            id=format!("nextBtn{}", step)
                            class="btn btn-primary"
                            on:click=move |_| vm.next()
                        >
                            {"Next"}
                        </button>
                    }
                    .into_any()
                } else {
                    view! {
                        <button type="submit" class="btn btn-primary">
                            {"Submit"}
                        </button>
                    }
                    .into_any()
                }}
            </div>
        </div>
    }
}

#[component]
fn FieldInput(vm: ApplicationFormViewModel, field: FieldDef) -> impl IntoView {
    let name = StoredValue::new(field.name.clone());

    view! {
        <div class="form-group">
            <label for=field.name.clone()>{field.label.clone()}</label>
            <input
                type=field.constraints.kind.as_str()
                id=field.name.clone()
                name=field.name.clone()
                required=field.constraints.is_required()
                prop:value=move || {
                    vm.form.with(|f| f.fields().value(&name.get_value()).unwrap_or_default().to_string())
                }
                on:input=move |ev| vm.on_input(&name.get_value(), &event_target_value(&ev))
            />
            <span class="error-message">
                {move || vm.form.with(|f| f.error_for(&name.get_value()).unwrap_or_default().to_string())}
            </span>
        </div>
    }
}

/// `name: value` list of every field, shown on the last step
#[component]
fn Summary(vm: ApplicationFormViewModel) -> impl IntoView {
    view! {
        <div id="summary" class="summary">
            {move || {
                vm.form
                    .with(|f| f.summary().map(|entries| entries.to_vec()))
                    .map(|entries| {
                        view! {
                            <ul>
                                {entries
                                    .into_iter()
                                    .map(|e| view! {
                                        <li>
                                            <strong>{format!("{}:", e.name)}</strong>
                                            {format!(" {}", e.value)}
                                        </li>
                                    })
                                    .collect_view()}
                            </ul>
                        }
                    })
            }}
        </div>
    }
}
