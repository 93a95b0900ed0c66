//! Page bootstrap and form handling, independent of the real document.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use tracing::{debug, error, info, warn};

use crate::api::FinanceApi;
use crate::error::AppError;
use crate::models::{Record, RecordKind};
use crate::money;
use crate::view::View;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageState {
    Logged,
    NotLogged,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    Registered(Record),
    /// Amount was zero or unreadable; the field is flagged invalid.
    Rejected,
    /// A registration for the same form is still in flight.
    Busy,
}

pub struct Controller<A, V> {
    api: A,
    view: V,
    balance: Cell<f64>,
    pending: RefCell<HashSet<RecordKind>>,
}

impl<A: FinanceApi, V: View> Controller<A, V> {
    pub fn new(api: A, view: V) -> Self {
        Self {
            api,
            view,
            balance: Cell::new(0.0),
            pending: RefCell::new(HashSet::new()),
        }
    }

    pub async fn load_home_view(&self) -> Result<PageState, AppError> {
        let content = self.api.home_content().await?;
        self.view.render_home(&content.html)?;

        if content.is_authenticated {
            self.load_logged_view().await?;
            info!("session authenticated, dashboard loaded");
            Ok(PageState::Logged)
        } else {
            self.load_not_logged_view();
            Ok(PageState::NotLogged)
        }
    }

    /// The fragment already carries the login screen.
    fn load_not_logged_view(&self) {
        info!("no session, showing public content");
    }

    /// A failed fetch is reported on the page without stopping the other one.
    pub async fn load_logged_view(&self) -> Result<(), AppError> {
        let (user, history) = futures::join!(self.api.user_data(), self.api.history());

        match user {
            Ok(user) => {
                if let Err(err) = self.view.render_user_data(&user) {
                    error!(%err, "could not render user data");
                    self.view
                        .show_error(None, &format!("Não foi possível exibir o perfil: {}", err))?;
                }
            }
            Err(err) => {
                error!(%err, "could not load user data");
                self.view
                    .show_error(None, &format!("Não foi possível carregar o perfil: {}", err))?;
            }
        }

        match history {
            Ok(history) => {
                self.balance.set(money::balance(&history.history));
                match self.view.render_history(&history) {
                    Ok(()) => debug!(records = history.history.len(), "history rendered"),
                    Err(err) => {
                        error!(%err, "could not render history");
                        self.view.show_error(
                            None,
                            &format!("Não foi possível exibir o histórico: {}", err),
                        )?;
                    }
                }
            }
            Err(err) => {
                error!(%err, "could not load history");
                self.view
                    .show_error(None, &format!("Não foi possível carregar o histórico: {}", err))?;
            }
        }

        self.view.render_balance(self.balance.get())?;
        Ok(())
    }

    pub fn on_amount_input(&self, kind: RecordKind, raw: &str) -> Result<(), AppError> {
        self.view.set_field_invalid(kind, false)?;
        self.view.set_amount(kind, &money::format_money_input(raw))?;
        Ok(())
    }

    pub async fn submit(&self, kind: RecordKind) -> Result<SubmitOutcome, AppError> {
        if self.pending.borrow().contains(&kind) {
            debug!(%kind, "registration already in flight");
            return Ok(SubmitOutcome::Busy);
        }

        let form = self.view.read_form(kind)?;
        let amount = match money::brl_string_to_float(&form.amount) {
            Some(amount) if amount != 0.0 => amount,
            _ => {
                warn!(%kind, amount = %form.amount, "rejected registration without amount");
                self.view.set_field_invalid(kind, true)?;
                return Ok(SubmitOutcome::Rejected);
            }
        };

        self.view.set_field_invalid(kind, false)?;
        self.view.reset_form(kind)?;

        self.view.set_busy(kind, true)?;
        self.pending.borrow_mut().insert(kind);
        let result = self.api.register(kind, amount, &form.description).await;
        self.pending.borrow_mut().remove(&kind);
        self.view.set_busy(kind, false)?;

        match result {
            Ok(response) => {
                let record = response.record;
                self.view.append_record(&record)?;
                self.balance.set(self.balance.get() + record.amount);
                self.view.render_balance(self.balance.get())?;
                info!(%kind, id = record.id, "record registered");
                Ok(SubmitOutcome::Registered(record))
            }
            Err(err) => {
                error!(%kind, %err, "registration failed");
                self.view
                    .show_error(Some(kind), &format!("Não foi possível registrar: {}", err))?;
                Err(err.into())
            }
        }
    }
}
