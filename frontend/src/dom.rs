//! `web-sys` backed [`View`] and the listeners for the two forms.

use std::rc::Rc;

use tracing::error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlInputElement};

use crate::api::{FinanceApi, HttpApi};
use crate::config::AppConfig;
use crate::controller::{Controller, PageState};
use crate::error::{AppError, ViewError};
use crate::models::{Record, RecordKind, UserData};
use crate::money;
use crate::view::{self, FormInput, View};

const INVALID_CLASS: &str = "is-danger";
const LOADING_CLASS: &str = "is-loading";
const HISTORY_BODY_SELECTOR: &str = "#history tbody";
const USER_NAME_ID: &str = "userName";
const USER_IMAGE_ID: &str = "userImage";
const BALANCE_ID: &str = "balance";
const PAGE_ERROR_ID: &str = "pageError";

pub struct DomView {
    document: Document,
    mount_id: String,
}

impl DomView {
    pub fn new(document: Document, config: &AppConfig) -> Self {
        Self {
            document,
            mount_id: config.mount_id.clone(),
        }
    }

    fn element(&self, id: &str) -> Result<Element, ViewError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| ViewError::MissingElement(id.to_string()))
    }

    fn input(&self, id: &str) -> Result<HtmlInputElement, ViewError> {
        self.element(id)?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| ViewError::Js(format!("`{}` is not an input", id)))
    }
}

impl View for DomView {
    fn render_home(&self, html: &str) -> Result<(), ViewError> {
        self.element(&self.mount_id)?.set_inner_html(html);
        Ok(())
    }

    fn render_user_data(&self, user: &UserData) -> Result<(), ViewError> {
        self.element(USER_NAME_ID)?
            .set_text_content(Some(user.username.as_str()));
        self.element(USER_IMAGE_ID)?
            .set_attribute("src", &user.profile_pic)
            .map_err(js_error)
    }

    fn append_record(&self, record: &Record) -> Result<(), ViewError> {
        let tbody = self
            .document
            .query_selector(HISTORY_BODY_SELECTOR)
            .map_err(js_error)?
            .ok_or_else(|| ViewError::MissingElement(HISTORY_BODY_SELECTOR.to_string()))?;

        let row = self.document.create_element("tr").map_err(js_error)?;
        row.set_inner_html(&view::record_row_html(record));
        row.set_attribute("data-record-id", &record.id.to_string())
            .map_err(js_error)?;
        row.set_attribute("data-user-id", &record.user_id)
            .map_err(js_error)?;

        tbody
            .insert_before(&row, tbody.first_child().as_ref())
            .map_err(js_error)?;
        Ok(())
    }

    fn render_balance(&self, balance: f64) -> Result<(), ViewError> {
        // Older fragments have no balance slot.
        if let Some(element) = self.document.get_element_by_id(BALANCE_ID) {
            element.set_text_content(Some(money::format_record_amount(balance).as_str()));
        }
        Ok(())
    }

    fn read_form(&self, kind: RecordKind) -> Result<FormInput, ViewError> {
        Ok(FormInput {
            amount: self.input(&kind.amount_id())?.value(),
            description: self.input(&kind.description_id())?.value(),
        })
    }

    fn set_amount(&self, kind: RecordKind, value: &str) -> Result<(), ViewError> {
        self.input(&kind.amount_id())?.set_value(value);
        Ok(())
    }

    fn reset_form(&self, kind: RecordKind) -> Result<(), ViewError> {
        self.input(&kind.amount_id())?.set_value(money::ZERO_AMOUNT);
        self.input(&kind.description_id())?.set_value("");
        Ok(())
    }

    fn set_field_invalid(&self, kind: RecordKind, invalid: bool) -> Result<(), ViewError> {
        let classes = self.element(&kind.amount_id())?.class_list();
        if invalid {
            classes.add_1(INVALID_CLASS).map_err(js_error)
        } else {
            classes.remove_1(INVALID_CLASS).map_err(js_error)
        }
    }

    fn set_busy(&self, kind: RecordKind, busy: bool) -> Result<(), ViewError> {
        let button = self.element(&kind.button_id())?;
        if busy {
            button.set_attribute("disabled", "").map_err(js_error)?;
            button.class_list().add_1(LOADING_CLASS).map_err(js_error)
        } else {
            button.remove_attribute("disabled").map_err(js_error)?;
            button.class_list().remove_1(LOADING_CLASS).map_err(js_error)
        }
    }

    fn show_error(&self, kind: Option<RecordKind>, message: &str) -> Result<(), ViewError> {
        let id = kind.map_or_else(|| PAGE_ERROR_ID.to_string(), RecordKind::error_id);
        match self.document.get_element_by_id(&id) {
            Some(element) => element.set_text_content(Some(message)),
            None => web_sys::console::error_1(&JsValue::from_str(message)),
        }
        if let Some(kind) = kind {
            self.set_field_invalid(kind, true)?;
        }
        Ok(())
    }
}

/// Loads the page and, once logged in, wires the gain and expense forms.
pub async fn start(config: AppConfig) -> Result<PageState, AppError> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| ViewError::MissingElement("document".to_string()))?;

    let view = DomView::new(document.clone(), &config);
    let controller = Rc::new(Controller::new(HttpApi::new(config), view));

    let state = controller.load_home_view().await?;
    if state == PageState::Logged {
        bind_forms(&controller, &document)?;
    }
    Ok(state)
}

fn bind_forms<A>(
    controller: &Rc<Controller<A, DomView>>,
    document: &Document,
) -> Result<(), ViewError>
where
    A: FinanceApi + 'static,
{
    for kind in RecordKind::ALL {
        let amount_id = kind.amount_id();
        let amount = document
            .get_element_by_id(&amount_id)
            .ok_or(ViewError::MissingElement(amount_id))?;
        let on_input = {
            let controller = Rc::clone(controller);
            Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                let Some(input) = event
                    .target()
                    .and_then(|target| target.dyn_into::<HtmlInputElement>().ok())
                else {
                    return;
                };
                if let Err(err) = controller.on_amount_input(kind, &input.value()) {
                    error!(%kind, %err, "could not format amount");
                }
            })
        };
        amount
            .add_event_listener_with_callback("input", on_input.as_ref().unchecked_ref())
            .map_err(js_error)?;
        on_input.forget();

        let button_id = kind.button_id();
        let button = document
            .get_element_by_id(&button_id)
            .ok_or(ViewError::MissingElement(button_id))?;
        let on_click = {
            let controller = Rc::clone(controller);
            Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                let controller = Rc::clone(&controller);
                spawn_local(async move {
                    if let Err(err) = controller.submit(kind).await {
                        error!(%kind, %err, "submit failed");
                    }
                });
            })
        };
        button
            .add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
            .map_err(js_error)?;
        on_click.forget();
    }
    Ok(())
}

fn js_error(value: JsValue) -> ViewError {
    ViewError::Js(format!("{:?}", value))
}
