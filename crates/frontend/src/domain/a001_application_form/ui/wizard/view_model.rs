use super::model;
use crate::shared::storage::BrowserStorage;
use contracts::domain::a001_application_form::{
    AutosaveScheduler, FormError, MultiStepForm, NextOutcome, StepClick,
};
use contracts::shared::form_settings::WizardSettings;
use gloo_timers::callback::{Interval, Timeout};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;

/// ViewModel for the multi-step application form
#[derive(Clone, Copy)]
pub struct ApplicationFormViewModel {
    pub form: RwSignal<MultiStepForm<BrowserStorage>>,
    pub error: RwSignal<Option<String>>,
    lock_timeout: StoredValue<Option<Timeout>, LocalStorage>,
    lock_notice_ms: u32,
}

impl ApplicationFormViewModel {
    pub fn new(settings: &WizardSettings) -> Result<Self, FormError> {
        let form = model::build_form(settings)?;
        Ok(Self {
            form: RwSignal::new(form),
            error: RwSignal::new(None),
            lock_timeout: StoredValue::new_local(None),
            lock_notice_ms: settings.notice.lock_notice_ms,
        })
    }

    pub fn on_input(&self, name: &str, value: &str) {
        self.form.update(|f| {
            f.on_input(name, value);
        });
    }

    pub fn click_step(&self, step: usize) {
        let click = self.form.try_update(|f| f.click_step(step));
        if let Some(StepClick::Locked { generation, .. }) = click {
            self.schedule_lock_dismiss(generation);
        }
    }

    pub fn next(&self) {
        if let Some(NextOutcome::Blocked { first_invalid }) = self.form.try_update(|f| f.validate_and_next()) {
            focus_field(first_invalid);
        }
    }

    pub fn previous(&self) {
        self.form.update(|f| {
            f.previous();
        });
    }

    pub fn save_draft(&self) {
        let now = chrono::Local::now().time();
        match self.form.try_update(|f| f.save_draft(now)) {
            Some(Ok(())) => self.error.set(None),
            Some(Err(e)) => {
                log::error!("Failed to save draft: {}", e);
                self.error.set(Some(format!("Failed to save draft: {}", e)));
            }
            None => {}
        }
    }

    pub fn load_draft(&self) {
        if self.form.try_update(|f| f.load_draft()) == Some(false) {
            log::info!("No saved draft to load");
        }
    }

    pub fn submit(&self) {
        match self.form.try_update(|f| f.submit()) {
            Some(Ok(message)) => {
                self.error.set(None);
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(message);
                }
            }
            Some(Err(e)) => {
                log::error!("Failed to finalize form: {}", e);
                self.error.set(Some(format!("Failed to finalize form: {}", e)));
            }
            None => {}
        }
    }

    /// Hide the lock notice after the configured delay. A newer notice
    /// replaces the pending timer; dropping a `Timeout` cancels it.
    fn schedule_lock_dismiss(&self, generation: u64) {
        let form = self.form;
        let timeout = Timeout::new(self.lock_notice_ms, move || {
            form.try_update(|f| f.dismiss_lock_notice(generation));
        });
        self.lock_timeout.set_value(Some(timeout));
    }

    /// Save dirty drafts on a fixed interval for the rest of the page session.
    pub fn start_autosave(&self, scheduler: AutosaveScheduler) {
        let form = self.form;
        let error = self.error;
        Interval::new(scheduler.interval_ms(), move || {
            if !form.try_with_untracked(|f| f.is_dirty()).unwrap_or(false) {
                return;
            }
            let now = chrono::Local::now().time();
            if let Some(Err(e)) = form.try_update(|f| scheduler.tick(f, now)) {
                log::error!("Autosave failed: {}", e);
                let _ = error.try_set(Some(format!("Autosave failed: {}", e)));
            }
        })
        .forget();
    }

    /// Ask the browser to confirm leaving the page while edits are unsaved.
    pub fn install_unload_guard(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };

        let form = self.form;
        let closure = Closure::wrap(Box::new(move |event: web_sys::BeforeUnloadEvent| {
            if form.try_with_untracked(|f| f.should_confirm_unload()).unwrap_or(false) {
                event.prevent_default();
                event.set_return_value("");
            }
        }) as Box<dyn FnMut(_)>);

        if let Err(e) =
            window.add_event_listener_with_callback("beforeunload", closure.as_ref().unchecked_ref())
        {
            log::error!("Failed to install unload guard: {:?}", e);
        }
        closure.forget(); // Keep the closure alive
    }
}

/// Move focus to the field with id `name` once the error slots are rendered.
fn focus_field(name: String) {
    spawn_local(async move {
        TimeoutFuture::new(0).await;
        let element = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(&name))
            .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok());
        match element {
            Some(el) => {
                let _ = el.focus();
            }
            None => log::warn!("No element to focus for field '{}'", name),
        }
    });
}
