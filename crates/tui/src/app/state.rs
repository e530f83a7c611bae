use std::time::Instant;

use api_types::{
    category::Category,
    transaction::{MonthlyBalance, Transaction},
    wallet::Wallet,
};
use chrono_tz::Tz;
use finance_client::{
    ClientError, ListController, Resource, SessionState,
    dashboard::{ChartData, Panel},
    debounce::Debouncer,
    forms::{
        CategoryForm, DeleteConfirmation, LoginForm, Modal, Mutation, RegisterForm, Submitted,
        TransactionForm, WalletForm,
    },
    list::FetchTicket,
    resource::{Categories, Transactions, Wallets},
    routes::Route,
};
use uuid::Uuid;

use crate::{
    app::fields::{FieldKind, FilterDraft, FormFields, SearchDraft, TransactionFilterDraft},
    ui::keymap::AppAction,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug)]
pub struct LoginState {
    pub mode: AuthMode,
    pub login: LoginForm,
    pub register: RegisterForm,
    pub focus: usize,
    pub message: Option<String>,
}

impl Default for LoginState {
    fn default() -> Self {
        Self {
            mode: AuthMode::Login,
            login: LoginForm::default(),
            register: RegisterForm::default(),
            focus: 0,
            message: None,
        }
    }
}

impl LoginState {
    pub const LOGIN_LABELS: [&'static str; 2] = ["Email", "Mật khẩu"];
    pub const REGISTER_LABELS: [&'static str; 5] = [
        "Họ tên",
        "Email",
        "Ngày sinh",
        "Mật khẩu",
        "Nhập lại mật khẩu",
    ];

    pub fn labels(&self) -> &'static [&'static str] {
        match self.mode {
            AuthMode::Login => &Self::LOGIN_LABELS,
            AuthMode::Register => &Self::REGISTER_LABELS,
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.focus = 0;
        self.message = None;
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % self.labels().len();
    }

    pub fn prev_field(&mut self) {
        let count = self.labels().len();
        self.focus = (self.focus + count - 1) % count;
    }

    pub fn is_secret(&self, index: usize) -> bool {
        match self.mode {
            AuthMode::Login => index == 1,
            AuthMode::Register => index >= 3,
        }
    }

    pub fn value(&self, index: usize) -> &str {
        match (self.mode, index) {
            (AuthMode::Login, 0) => &self.login.email,
            (AuthMode::Login, _) => &self.login.password,
            (AuthMode::Register, 0) => &self.register.name,
            (AuthMode::Register, 1) => &self.register.email,
            (AuthMode::Register, 2) => &self.register.birth_date,
            (AuthMode::Register, 3) => &self.register.password,
            (AuthMode::Register, _) => &self.register.confirm_password,
        }
    }

    pub fn active_field_mut(&mut self) -> &mut String {
        match (self.mode, self.focus) {
            (AuthMode::Login, 0) => &mut self.login.email,
            (AuthMode::Login, _) => &mut self.login.password,
            (AuthMode::Register, 0) => &mut self.register.name,
            (AuthMode::Register, 1) => &mut self.register.email,
            (AuthMode::Register, 2) => &mut self.register.birth_date,
            (AuthMode::Register, 3) => &mut self.register.password,
            (AuthMode::Register, _) => &mut self.register.confirm_password,
        }
    }

    /// Forgets typed secrets once they have been used.
    pub fn clear_secrets(&mut self) {
        self.login.password.clear();
        self.register.password.clear();
        self.register.confirm_password.clear();
    }
}

#[derive(Debug)]
pub struct DashboardState {
    pub summary: Panel<MonthlyBalance>,
    pub recent: Panel<Vec<Transaction>>,
    pub charts: Panel<ChartData>,
    seq: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            summary: Panel::Loading,
            recent: Panel::Loading,
            charts: Panel::Loading,
            seq: 0,
        }
    }
}

impl DashboardState {
    /// Puts every panel back to loading and returns the sequence the
    /// next load must carry. Panels from earlier loads are ignored.
    pub fn reset(&mut self) -> u64 {
        self.seq += 1;
        self.summary = Panel::Loading;
        self.recent = Panel::Loading;
        self.charts = Panel::Loading;
        self.seq
    }

    pub fn set_summary(&mut self, seq: u64, panel: Panel<MonthlyBalance>) {
        if self.accepts(seq, "summary") {
            self.summary = panel;
        }
    }

    pub fn set_recent(&mut self, seq: u64, panel: Panel<Vec<Transaction>>) {
        if self.accepts(seq, "recent") {
            self.recent = panel;
        }
    }

    pub fn set_charts(&mut self, seq: u64, panel: Panel<ChartData>) {
        if self.accepts(seq, "charts") {
            self.charts = panel;
        }
    }

    fn accepts(&self, seq: u64, panel: &str) -> bool {
        if seq != self.seq {
            tracing::debug!(panel, seq, current = self.seq, "dropping stale dashboard panel");
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    pub shown_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Filter,
}

/// Side effect requested by a key press on a list screen.
#[derive(Debug)]
pub enum Command<R: Resource> {
    None,
    Fetch(FetchTicket<R::Filters>),
    /// The transaction modal needs wallets and categories.
    LoadOptions,
    Save(Mutation<R>),
    Delete(Uuid),
}

/// A paged list with its filter bar, add/edit modal and delete dialog.
#[derive(Debug)]
pub struct ListScreen<R: Resource, F: FormFields, D> {
    pub list: ListController<R>,
    pub draft: D,
    pub filter_field: usize,
    pub focus: Focus,
    pub debounce: Debouncer<R::Filters>,
    pub modal: Option<Modal<F>>,
    pub modal_field: usize,
    pub delete: Option<DeleteConfirmation<R>>,
    pub deleting: bool,
}

pub type TransactionsScreen = ListScreen<Transactions, TransactionForm, TransactionFilterDraft>;
pub type WalletsScreen = ListScreen<Wallets, WalletForm, SearchDraft>;
pub type CategoriesScreen = ListScreen<Categories, CategoryForm, SearchDraft>;

impl<R, F, D> ListScreen<R, F, D>
where
    R: Resource,
    F: FormFields<Resource = R>,
    D: FilterDraft<Filters = R::Filters>,
{
    pub fn new(page_size: Option<u32>) -> Self {
        Self {
            list: page_size.map_or_else(ListController::new, ListController::with_page_size),
            draft: D::default(),
            filter_field: 0,
            focus: Focus::List,
            debounce: Debouncer::default(),
            modal: None,
            modal_field: 0,
            delete: None,
            deleting: false,
        }
    }

    /// Back to a blank screen: no items, filters or open dialogs. Requests
    /// issued before the reset are stale from here on.
    pub fn reset(&mut self) {
        self.list.reset();
        self.draft = D::default();
        self.filter_field = 0;
        self.focus = Focus::List;
        self.debounce.cancel();
        self.modal = None;
        self.modal_field = 0;
        self.delete = None;
        self.deleting = false;
    }

    /// True while keys go to a text input rather than to navigation.
    pub fn is_editing(&self) -> bool {
        self.focus == Focus::Filter || self.modal.is_some() || self.delete.is_some()
    }

    pub fn handle_key(&mut self, action: AppAction, tz: Tz, now: Instant) -> Command<R> {
        if self.delete.is_some() {
            return self.delete_key(action);
        }
        if self.modal.is_some() {
            return self.modal_key(action);
        }
        match self.focus {
            Focus::Filter => self.filter_key(action, now),
            Focus::List => self.list_key(action, tz),
        }
    }

    /// Filters whose debounce window has elapsed.
    pub fn poll_filters(&mut self, now: Instant) -> Option<FetchTicket<R::Filters>> {
        let filters = self.debounce.poll(now)?;
        self.list.set_filters(filters)
    }

    pub fn set_options(&mut self, wallets: &[Wallet], categories: &[Category]) {
        if let Some(modal) = self.modal.as_mut() {
            modal.form_mut().set_options(wallets, categories);
        }
    }

    /// Settles the modal after its mutation returned. A reload is issued
    /// when the mutation was saved.
    pub fn saved(&mut self, result: Result<(), ClientError>) -> Option<FetchTicket<R::Filters>> {
        let modal = self.modal.as_mut()?;
        match modal.finish(result) {
            Submitted::Saved => {
                self.modal = None;
                Some(self.list.reload())
            }
            Submitted::Invalid | Submitted::Failed => None,
        }
    }

    pub fn deleted(&mut self, result: Result<(), ClientError>) -> Option<FetchTicket<R::Filters>> {
        self.deleting = false;
        let confirm = self.delete.as_mut()?;
        match confirm.finish(result) {
            Ok(()) => {
                self.delete = None;
                Some(self.list.reload())
            }
            Err(_) => None,
        }
    }

    fn list_key(&mut self, action: AppAction, tz: Tz) -> Command<R> {
        match action {
            AppAction::Up | AppAction::Input('k') => {
                self.list.select_prev();
                Command::None
            }
            AppAction::Down | AppAction::Input('j') => {
                self.list.select_next();
                Command::None
            }
            AppAction::Right | AppAction::Input('n') => {
                self.list.next_page().map_or(Command::None, Command::Fetch)
            }
            AppAction::Left | AppAction::Input('p') => {
                self.list.prev_page().map_or(Command::None, Command::Fetch)
            }
            AppAction::Input('s') => Command::Fetch(self.list.cycle_page_size()),
            AppAction::Input('/') => {
                self.focus = Focus::Filter;
                self.filter_field = 0;
                Command::None
            }
            AppAction::Input('x') => {
                self.draft = D::default();
                self.debounce.cancel();
                self.list
                    .set_filters(self.draft.to_filters())
                    .map_or(Command::None, Command::Fetch)
            }
            AppAction::Input('a') => self.open_modal(Modal::add(F::blank(tz))),
            AppAction::Submit | AppAction::Input('e') => {
                let Some(item) = self.list.selected_item() else {
                    return Command::None;
                };
                let modal = Modal::edit(R::id(item), F::seeded(item, tz));
                self.open_modal(modal)
            }
            AppAction::Input('d') => {
                if let Some(item) = self.list.selected_item() {
                    self.delete = Some(DeleteConfirmation::new(item));
                }
                Command::None
            }
            _ => Command::None,
        }
    }

    fn open_modal(&mut self, modal: Modal<F>) -> Command<R> {
        self.modal = Some(modal);
        self.modal_field = 0;
        if F::NEEDS_OPTIONS {
            Command::LoadOptions
        } else {
            Command::None
        }
    }

    fn filter_key(&mut self, action: AppAction, now: Instant) -> Command<R> {
        let count = D::LABELS.len();
        match action {
            AppAction::Cancel => self.focus = Focus::List,
            AppAction::Submit => {
                self.focus = Focus::List;
                return self
                    .debounce
                    .flush()
                    .and_then(|filters| self.list.set_filters(filters))
                    .map_or(Command::None, Command::Fetch);
            }
            AppAction::NextField | AppAction::Down => {
                self.filter_field = (self.filter_field + 1) % count;
            }
            AppAction::PrevField | AppAction::Up => {
                self.filter_field = (self.filter_field + count - 1) % count;
            }
            AppAction::Backspace => {
                if let Some(field) = self.draft.field_mut(self.filter_field) {
                    field.pop();
                    self.debounce.push(self.draft.to_filters(), now);
                }
            }
            AppAction::Input(ch) => {
                if let Some(field) = self.draft.field_mut(self.filter_field) {
                    field.push(ch);
                    self.debounce.push(self.draft.to_filters(), now);
                }
            }
            _ => {}
        }
        Command::None
    }

    fn modal_key(&mut self, action: AppAction) -> Command<R> {
        let field = self.modal_field;
        let count = F::LABELS.len();
        let Some(modal) = self.modal.as_mut() else {
            return Command::None;
        };
        match action {
            AppAction::Cancel => {
                if !modal.is_submitting() {
                    self.modal = None;
                }
            }
            AppAction::NextField => self.modal_field = (field + 1) % count,
            AppAction::PrevField => self.modal_field = (field + count - 1) % count,
            AppAction::Up | AppAction::Down => {
                if let Some(picker) = modal.form_mut().picker_mut(field) {
                    picker.move_cursor(action == AppAction::Down);
                }
            }
            AppAction::Backspace => match F::kind(field) {
                FieldKind::Text => {
                    if let Some(text) = modal.form_mut().text_mut(field) {
                        text.pop();
                    }
                }
                FieldKind::Picker => {
                    if let Some(picker) = modal.form_mut().picker_mut(field) {
                        picker.pop_char();
                    }
                }
                FieldKind::Toggle => {}
            },
            AppAction::Input(ch) => match F::kind(field) {
                FieldKind::Text => {
                    if let Some(text) = modal.form_mut().text_mut(field) {
                        text.push(ch);
                    }
                }
                FieldKind::Picker => {
                    if let Some(picker) = modal.form_mut().picker_mut(field) {
                        picker.push_char(ch);
                    }
                }
                FieldKind::Toggle => {
                    if ch == ' ' {
                        modal.form_mut().toggle(field);
                    }
                }
            },
            AppAction::Submit => {
                if let Some(picker) = modal.form_mut().picker_mut(field)
                    && !picker.query().is_empty()
                {
                    picker.choose();
                    return Command::None;
                }
                return modal.prepare().map_or(Command::None, Command::Save);
            }
            _ => {}
        }
        Command::None
    }

    fn delete_key(&mut self, action: AppAction) -> Command<R> {
        let Some(confirm) = self.delete.as_mut() else {
            return Command::None;
        };
        match action {
            AppAction::Cancel => {
                if !self.deleting {
                    self.delete = None;
                }
            }
            AppAction::Input(' ') => confirm.toggle(),
            AppAction::Submit if !self.deleting => {
                if let Ok(id) = confirm.prepare() {
                    self.deleting = true;
                    return Command::Delete(id);
                }
            }
            _ => {}
        }
        Command::None
    }
}

#[derive(Debug)]
pub struct AppState {
    pub route: Route,
    pub session: SessionState,
    pub login: LoginState,
    pub dashboard: DashboardState,
    pub transactions: TransactionsScreen,
    pub wallets: WalletsScreen,
    pub categories: CategoriesScreen,
    pub toast: Option<ToastState>,
    pub base_url: String,
    pub tz: Tz,
    generation: u64,
}

impl AppState {
    pub fn new(base_url: String, tz: Tz, page_size: Option<u32>) -> Self {
        Self {
            route: Route::Login,
            session: SessionState {
                authenticated: false,
                loading: true,
            },
            login: LoginState::default(),
            dashboard: DashboardState::default(),
            transactions: ListScreen::new(page_size),
            wallets: ListScreen::new(page_size),
            categories: ListScreen::new(page_size),
            toast: None,
            base_url,
            tz,
            generation: 0,
        }
    }

    pub fn is_editing(&self) -> bool {
        match self.route {
            Route::Login => true,
            Route::Dashboard => false,
            Route::Transactions => self.transactions.is_editing(),
            Route::Wallets => self.wallets.is_editing(),
            Route::Categories => self.categories.is_editing(),
        }
    }

    pub fn show_toast(&mut self, message: impl Into<String>, level: ToastLevel) {
        self.toast = Some(ToastState {
            message: message.into(),
            level,
            shown_at: Instant::now(),
        });
    }

    /// Session generation that background results are tagged with.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Drops everything fetched under the previous session and starts a
    /// new generation, so requests still in flight land nowhere.
    pub fn clear_data(&mut self) {
        self.generation += 1;
        self.dashboard.reset();
        self.transactions.reset();
        self.wallets.reset();
        self.categories.reset();
    }
}
