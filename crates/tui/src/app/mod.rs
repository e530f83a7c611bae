mod fields;
mod state;
mod tasks;

pub use fields::{FieldKind, FilterDraft, FormFields, kind_label};
pub use state::{
    AppState, AuthMode, Command, DashboardState, Focus, ListScreen, ToastLevel, ToastState,
};

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use finance_client::{
    ApiClient, ClientError, FileTokenStore, SessionState, SessionStore, TokenStore,
    list::FetchTicket,
    resource::{Categories, Transactions, Wallets},
    routes::{Guard, Route, guard},
};
use tokio::sync::{mpsc, watch};

use crate::{
    config::AppConfig,
    error::{AppError, Result},
    ui::{
        self,
        keymap::{AppAction, map_key},
    },
};

use tasks::{Message, Outbox, Receiver, Routed, Sender, Target};

const TICK_RATE: Duration = Duration::from_millis(200);
const TOAST_TTL: Duration = Duration::from_secs(3);

pub struct App {
    client: ApiClient,
    session: SessionStore,
    session_rx: watch::Receiver<SessionState>,
    tx: Sender,
    rx: Receiver,
    pub state: AppState,
    should_quit: bool,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let tz = config.tz()?;
        let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(&config.session_path));
        let client = ApiClient::new(&config.base_url, tokens.clone())?;
        let session = SessionStore::new(tokens);
        let session_rx = session.subscribe();
        let (tx, rx) = mpsc::unbounded_channel();

        Ok(Self {
            client,
            session,
            session_rx,
            tx,
            rx,
            state: AppState::new(config.base_url, tz, config.page_size),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut terminal = ui::setup_terminal()?;

        let restored = self.session.init();
        self.state.session = restored;
        self.session_rx.mark_unchanged();
        self.navigate(if restored.authenticated {
            Route::Dashboard
        } else {
            Route::Login
        });

        let result = self.event_loop(&mut terminal).await;
        ui::restore_terminal(&mut terminal)?;
        result
    }

    async fn event_loop(&mut self, terminal: &mut ui::Terminal) -> Result<()> {
        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.state))
                .map_err(|err| AppError::Terminal(err.to_string()))?;

            if event::poll(TICK_RATE)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key).await?;
                    }
                    _ => {}
                }
            }

            self.tick(Instant::now());
        }

        Ok(())
    }

    fn tick(&mut self, now: Instant) {
        while let Ok((generation, message)) = self.rx.try_recv() {
            if generation != self.state.generation() {
                tracing::debug!(generation, "dropping result from an earlier session");
                continue;
            }
            self.apply(message);
        }
        self.sync_session();

        if let Some(ticket) = self.state.transactions.poll_filters(now) {
            self.fetch::<Transactions>(ticket);
        }
        if let Some(ticket) = self.state.wallets.poll_filters(now) {
            self.fetch::<Wallets>(ticket);
        }
        if let Some(ticket) = self.state.categories.poll_filters(now) {
            self.fetch::<Categories>(ticket);
        }

        if self
            .state
            .toast
            .as_ref()
            .is_some_and(|toast| now.duration_since(toast.shown_at) >= TOAST_TTL)
        {
            self.state.toast = None;
        }
    }

    /// Mirrors the session flag and kicks protected screens back to login.
    fn sync_session(&mut self) {
        if !self.session_rx.has_changed().unwrap_or(false) {
            return;
        }
        let session = *self.session_rx.borrow_and_update();
        self.state.session = session;
        if let Guard::Redirect(target) = guard(self.state.route, session) {
            self.state.route = target;
        }
    }

    fn navigate(&mut self, route: Route) {
        match guard(route, self.state.session) {
            Guard::Pending => {}
            Guard::Redirect(target) => {
                tracing::debug!(from = route.path(), to = target.path(), "redirect");
                self.state.route = target;
            }
            Guard::Allow(route) => {
                tracing::debug!(path = route.path(), "navigate");
                self.state.route = route;
                self.load(route);
            }
        }
    }

    fn load(&mut self, route: Route) {
        match route {
            Route::Login => {}
            Route::Dashboard => {
                let seq = self.state.dashboard.reset();
                tasks::spawn_dashboard(&self.client, &self.outbox(), self.state.tz, seq);
            }
            Route::Transactions => {
                let ticket = self.state.transactions.list.reload();
                self.fetch::<Transactions>(ticket);
            }
            Route::Wallets => {
                let ticket = self.state.wallets.list.reload();
                self.fetch::<Wallets>(ticket);
            }
            Route::Categories => {
                let ticket = self.state.categories.list.reload();
                self.fetch::<Categories>(ticket);
            }
        }
    }

    fn fetch<R: Routed>(&self, ticket: FetchTicket<R::Filters>) {
        tasks::spawn_list::<R>(&self.client, &self.outbox(), ticket);
    }

    fn outbox(&self) -> Outbox {
        Outbox::new(self.tx.clone(), self.state.generation())
    }

    fn logout(&mut self) {
        self.session.logout();
        self.state.clear_data();
        self.sync_session();
        self.state.route = Route::Login;
    }

    /// A 401 anywhere means the stored token is no longer accepted.
    fn check_auth<T>(&mut self, result: &std::result::Result<T, ClientError>) {
        if matches!(result, Err(err) if err.is_unauthorized()) {
            tracing::info!("token rejected, logging out");
            self.logout();
            self.state
                .show_toast("Phiên đăng nhập đã hết hạn", ToastLevel::Error);
        }
    }

    fn apply(&mut self, message: Message) {
        match message {
            Message::TransactionsListed(ticket, result) => {
                self.check_auth(&result);
                self.state.transactions.list.apply(ticket, result);
            }
            Message::WalletsListed(ticket, result) => {
                self.check_auth(&result);
                self.state.wallets.list.apply(ticket, result);
            }
            Message::CategoriesListed(ticket, result) => {
                self.check_auth(&result);
                self.state.categories.list.apply(ticket, result);
            }
            Message::Summary(seq, panel) => self.state.dashboard.set_summary(seq, panel),
            Message::Recent(seq, panel) => self.state.dashboard.set_recent(seq, panel),
            Message::Charts(seq, panel) => self.state.dashboard.set_charts(seq, panel),
            Message::Options(result) => {
                self.check_auth(&result);
                match result {
                    Ok((wallets, categories)) => {
                        self.state.transactions.set_options(&wallets, &categories);
                    }
                    Err(err) => {
                        tracing::warn!("picker options failed: {err}");
                        self.state
                            .show_toast("Không thể tải ví và danh mục", ToastLevel::Error);
                    }
                }
            }
            Message::Saved(target, result) => {
                self.check_auth(&result);
                self.saved(target, result);
            }
            Message::Deleted(target, result) => {
                self.check_auth(&result);
                self.deleted(target, result);
            }
        }
    }

    fn saved(&mut self, target: Target, result: std::result::Result<(), ClientError>) {
        match target {
            Target::Transactions => {
                let ticket = self.state.transactions.saved(result);
                self.reload_after::<Transactions>(ticket, "Đã lưu");
            }
            Target::Wallets => {
                let ticket = self.state.wallets.saved(result);
                self.reload_after::<Wallets>(ticket, "Đã lưu");
            }
            Target::Categories => {
                let ticket = self.state.categories.saved(result);
                self.reload_after::<Categories>(ticket, "Đã lưu");
            }
        }
    }

    fn deleted(&mut self, target: Target, result: std::result::Result<(), ClientError>) {
        match target {
            Target::Transactions => {
                let ticket = self.state.transactions.deleted(result);
                self.reload_after::<Transactions>(ticket, "Đã xoá");
            }
            Target::Wallets => {
                let ticket = self.state.wallets.deleted(result);
                self.reload_after::<Wallets>(ticket, "Đã xoá");
            }
            Target::Categories => {
                let ticket = self.state.categories.deleted(result);
                self.reload_after::<Categories>(ticket, "Đã xoá");
            }
        }
    }

    fn reload_after<R: Routed>(&mut self, ticket: Option<FetchTicket<R::Filters>>, message: &str) {
        if let Some(ticket) = ticket {
            self.fetch::<R>(ticket);
            self.state.show_toast(message, ToastLevel::Success);
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let action = map_key(key);
        if action == AppAction::ForceQuit {
            self.should_quit = true;
            return Ok(());
        }

        match self.state.route {
            Route::Login => self.handle_login_key(action).await,
            route => {
                self.handle_shell_key(route, action);
                Ok(())
            }
        }
    }

    async fn handle_login_key(&mut self, action: AppAction) -> Result<()> {
        let login = &mut self.state.login;
        match action {
            AppAction::Cancel => login.toggle_mode(),
            AppAction::NextField | AppAction::Down => login.next_field(),
            AppAction::PrevField | AppAction::Up => login.prev_field(),
            AppAction::Backspace => {
                login.active_field_mut().pop();
            }
            AppAction::Input(ch) => login.active_field_mut().push(ch),
            AppAction::Submit => self.submit_auth().await,
            _ => {}
        }
        Ok(())
    }

    async fn submit_auth(&mut self) {
        let login = &self.state.login;
        let outcome = match login.mode {
            AuthMode::Login => match login.login.validate() {
                Ok(()) => self
                    .session
                    .login(&self.client, &login.login.email, &login.login.password)
                    .await
                    .map_err(|err| err.to_string()),
                Err(err) => Err(err.to_string()),
            },
            AuthMode::Register => match login.register.validate() {
                Ok(request) => self
                    .session
                    .register(&self.client, &request)
                    .await
                    .map_err(|err| err.to_string()),
                Err(err) => Err(err.to_string()),
            },
        };

        match outcome {
            Ok(()) => {
                self.state.login.message = None;
                self.state.login.clear_secrets();
                self.sync_session();
                self.navigate(Route::Dashboard);
            }
            Err(message) => self.state.login.message = Some(message),
        }
    }

    fn handle_shell_key(&mut self, route: Route, action: AppAction) {
        if !self.state.is_editing()
            && let AppAction::Input(ch) = action
        {
            match ch {
                'q' => {
                    self.should_quit = true;
                    return;
                }
                'h' => return self.navigate(Route::Dashboard),
                't' => return self.navigate(Route::Transactions),
                'w' => return self.navigate(Route::Wallets),
                'c' => return self.navigate(Route::Categories),
                'r' => return self.load(route),
                'L' => {
                    self.logout();
                    self.state.show_toast("Đã đăng xuất", ToastLevel::Info);
                    return;
                }
                _ => {}
            }
        }

        let tz = self.state.tz;
        let now = Instant::now();
        match route {
            Route::Login | Route::Dashboard => {}
            Route::Transactions => {
                let command = self.state.transactions.handle_key(action, tz, now);
                self.run_command(command);
            }
            Route::Wallets => {
                let command = self.state.wallets.handle_key(action, tz, now);
                self.run_command(command);
            }
            Route::Categories => {
                let command = self.state.categories.handle_key(action, tz, now);
                self.run_command(command);
            }
        }
    }

    fn run_command<R: Routed>(&self, command: Command<R>) {
        match command {
            Command::None => {}
            Command::Fetch(ticket) => self.fetch::<R>(ticket),
            Command::LoadOptions => tasks::spawn_options(&self.client, &self.outbox()),
            Command::Save(mutation) => tasks::spawn_save(&self.client, &self.outbox(), mutation),
            Command::Delete(id) => tasks::spawn_delete::<R>(&self.client, &self.outbox(), id),
        }
    }
}
