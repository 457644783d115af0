//! Main application UI.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use eframe::egui::{self, Align, Layout, RichText};
use egui_phosphor::regular::{CALENDAR_BLANK, CALENDAR_PLUS, FILE_TEXT, HEART, HOUSE, SIGN_OUT};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::account::{FormError, LoginForm, SignupForm};
use crate::backend::{BackendError, PaymentReceipt, PortalBackend, Session};
use crate::booking::{BookingWizard, Destination};
use crate::config::AppConfig;
use crate::export;
use crate::models::{AppointmentBook, AppointmentTab, HealthTips, MedicalRecords, RecordSection, StatusFilter};
use crate::notify::{Notification, NotificationSink};

use super::components::colors;
use super::toasts::Toasts;
use super::{
    appointments_panel, booking_panel, health_tips_panel, home, login_screen, records_panel, signup_screen, welcome,
};

/// Brand shown in the portal header.
pub const BRAND: &str = "MediCare";

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Login,
    Signup,
    Portal(Page),
}

/// Page inside the signed-in portal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Appointments,
    BookAppointment,
    Records,
    HealthTips,
}

impl Page {
    /// Pages listed in the side navigation.
    pub const NAV: [Page; 4] = [Page::Home, Page::Appointments, Page::Records, Page::HealthTips];

    /// Get the display name for the page.
    pub fn name(&self) -> &'static str {
        match self {
            Page::Home => "Dashboard",
            Page::Appointments => "Appointments",
            Page::BookAppointment => "Book Appointment",
            Page::Records => "Medical Records",
            Page::HealthTips => "Health Tips",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Page::Home => HOUSE,
            Page::Appointments => CALENDAR_BLANK,
            Page::BookAppointment => CALENDAR_PLUS,
            Page::Records => FILE_TEXT,
            Page::HealthTips => HEART,
        }
    }
}

/// Tab on the health tips page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TipTab {
    #[default]
    All,
    Categories,
    Saved,
}

/// Messages from async tasks to UI.
pub enum UiMessage {
    LoginFinished(Result<Session, BackendError>),
    SignupFinished(Result<(), BackendError>),
    PaymentFinished {
        ticket: u64,
        result: Result<PaymentReceipt, BackendError>,
    },
}

/// Log level for UI messages.
#[derive(Clone, Copy, Debug)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Log entry for display in the UI.
#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub message: String,
    pub level: LogLevel,
}

/// Main application state.
pub struct App {
    // Runtime and backend
    pub rt: tokio::runtime::Runtime,
    backend: Arc<dyn PortalBackend>,

    // Message channel for async communication
    pub tx: mpsc::UnboundedSender<UiMessage>,
    pub rx: mpsc::UnboundedReceiver<UiMessage>,

    // Navigation
    pub screen: Screen,
    pub session: Option<Session>,

    // Account forms
    pub login_form: LoginForm,
    pub login_pending: bool,
    pub signup_form: SignupForm,
    pub signup_pending: bool,

    // Booking flow, present only while the booking page is open
    pub wizard: Option<BookingWizard>,

    // Portal data
    pub appointments: AppointmentBook,
    pub records: MedicalRecords,
    pub tips: HealthTips,

    // Search/filter state
    pub appointment_search: String,
    pub appointment_status: StatusFilter,
    pub appointment_tab: AppointmentTab,
    pub record_section: RecordSection,
    pub tip_search: String,
    pub tip_tab: TipTab,

    // Notifications and log messages
    pub toasts: Toasts,
    pub log_messages: Vec<LogEntry>,

    // Configuration
    pub config: AppConfig,
    pub config_path: PathBuf,

    // Dialogs
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

impl App {
    pub fn new(
        config: AppConfig,
        config_path: PathBuf,
        rt: tokio::runtime::Runtime,
        backend: Arc<dyn PortalBackend>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let toasts = Toasts::new(Duration::from_secs_f32(config.ui.toast_seconds));

        Self {
            rt,
            backend,
            tx,
            rx,
            screen: Screen::Welcome,
            session: None,
            login_form: LoginForm::default(),
            login_pending: false,
            signup_form: SignupForm::default(),
            signup_pending: false,
            wizard: None,
            appointments: AppointmentBook::sample(),
            records: MedicalRecords::sample(),
            tips: HealthTips::sample(),
            appointment_search: String::new(),
            appointment_status: StatusFilter::default(),
            appointment_tab: AppointmentTab::default(),
            record_section: RecordSection::default(),
            tip_search: String::new(),
            tip_tab: TipTab::default(),
            toasts,
            log_messages: Vec::new(),
            config,
            config_path,
            error_message: None,
            success_message: None,
        }
    }

    /// Start directly on the portal home as the demo patient.
    pub fn skip_login(&mut self) {
        let session = Session {
            username: self.config.auth.demo_username.clone(),
            display_name: self.config.hospital.patient_name.clone(),
        };
        self.log_info(format!("Signed in as {} (login skipped)", session.username));
        self.session = Some(session);
        self.screen = Screen::Portal(Page::Home);
    }

    /// Log a message to the UI log.
    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.log_messages.push(LogEntry {
            timestamp: Local::now(),
            message: message.into(),
            level,
        });

        // Keep only last 100 messages
        if self.log_messages.len() > 100 {
            self.log_messages.remove(0);
        }
    }

    /// Log an info message.
    pub fn log_info(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    /// Log a success message.
    pub fn log_success(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Success, message);
    }

    /// Log a warning message.
    pub fn log_warning(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Warning, message);
    }

    /// Log an error message.
    pub fn log_error(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Name used in greetings.
    pub fn patient_name(&self) -> &str {
        self.session
            .as_ref()
            .map(|s| s.display_name.as_str())
            .unwrap_or(&self.config.hospital.patient_name)
    }

    /// Switch portal page.
    ///
    /// Leaving the booking page discards the wizard along with any pending
    /// payment; entering it starts a fresh one.
    pub fn navigate(&mut self, page: Page) {
        if page != Page::BookAppointment && self.wizard.take().is_some() {
            info!("Booking flow abandoned");
            self.log_warning("Booking cancelled");
        }
        if page == Page::BookAppointment && self.wizard.is_none() {
            let today = Local::now().date_naive();
            self.wizard = Some(BookingWizard::new(
                today,
                self.config.booking.fee(),
                self.config.hospital.location.clone(),
            ));
            self.log_info("Started booking an appointment");
        }
        self.screen = Screen::Portal(page);
    }

    /// Submit the login form.
    pub fn submit_login(&mut self) {
        if self.login_pending {
            return;
        }

        let (username, password) = match self.login_form.validate() {
            Ok(credentials) => credentials,
            Err(e) => {
                self.toasts
                    .notify(Notification::destructive("Login failed", e.to_string()));
                return;
            }
        };

        self.login_pending = true;
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = backend.login(&username, &password).await;
            let _ = tx.send(UiMessage::LoginFinished(result));
        });
    }

    /// Submit the signup form.
    pub fn submit_signup(&mut self) {
        if self.signup_pending {
            return;
        }

        let account = match self.signup_form.submit() {
            Ok(account) => account,
            Err(FormError::PasswordMismatch) => {
                self.toasts.notify(Notification::destructive(
                    "Passwords don't match",
                    "Please make sure your passwords match.",
                ));
                return;
            }
            Err(e) => {
                self.toasts
                    .notify(Notification::destructive("Missing information", e.to_string()));
                return;
            }
        };

        self.signup_pending = true;
        self.log_info(format!("Creating account for {}", account.username));
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = backend.create_account(&account).await;
            let _ = tx.send(UiMessage::SignupFinished(result));
        });
    }

    /// Validate the payment stage and hand the charge to the backend.
    pub fn submit_payment(&mut self) {
        let today = Local::now().date_naive();
        let Some(wizard) = self.wizard.as_mut() else {
            return;
        };

        let request = match wizard.begin_submit(today) {
            Ok(request) => request,
            Err(e) => {
                self.toasts
                    .notify(Notification::destructive("Cannot process payment", e.to_string()));
                return;
            }
        };

        self.log_info(format!(
            "Processing {} payment of {}",
            request.method.label(),
            request.fee
        ));
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();

        self.rt.spawn(async move {
            let result = backend.process_payment(&request).await;
            let _ = tx.send(UiMessage::PaymentFinished {
                ticket: request.ticket,
                result,
            });
        });
    }

    /// Leave the booking flow from the confirmation stage.
    pub fn finish_booking(&mut self) {
        let Some(wizard) = self.wizard.as_mut() else {
            return;
        };

        match wizard.finish() {
            Ok((confirmed, destination)) => {
                self.wizard = None;
                let row = self.appointments.add_confirmed(&confirmed);
                self.log_success(format!("Appointment {} booked (#{row})", confirmed.id));
                match destination {
                    Destination::DashboardHome => self.screen = Screen::Portal(Page::Home),
                }
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
            }
        }
    }

    /// Sign out and return to the welcome screen.
    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Logged out {}", session.username);
        }
        self.wizard = None;
        if !self.login_form.remember_me {
            self.login_form = LoginForm::default();
        }
        self.toasts.notify(Notification::success(
            "Logged out successfully",
            "You have been logged out of your account.",
        ));
        self.log_info("Logged out");
        self.screen = Screen::Welcome;
    }

    /// Export medical records to Excel.
    pub fn export_records(&mut self, section: RecordSection) {
        let filename = export::generate_export_filename(export::export_prefix(section));
        let Some(path) = export::show_save_dialog(&filename) else {
            debug!("Export cancelled");
            return;
        };

        match export::export_medical_records_to_excel(&self.records, section, &path) {
            Ok(()) => {
                self.success_message = Some(format!("Exported to: {}", path.display()));
                self.log_success(format!("Exported {}: {}", section.label(), path.display()));
            }
            Err(e) => {
                error!("Export failed: {}", e);
                self.error_message = Some(format!("Export failed: {}", e));
                self.log_error(format!("Export failed: {}", e));
            }
        }
    }

    /// Whether any async operation is in flight.
    fn is_busy(&self) -> bool {
        self.login_pending || self.signup_pending || self.wizard.as_ref().is_some_and(|w| w.is_busy())
    }

    /// Poll async operation results.
    fn poll_async_results(&mut self) {
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                UiMessage::LoginFinished(result) => {
                    self.login_pending = false;
                    self.login_form.clear_password();
                    match result {
                        Ok(session) => {
                            self.toasts
                                .notify(Notification::success("Login successful", "Welcome back to MediCare!"));
                            self.log_success(format!("Signed in as {}", session.username));
                            self.session = Some(session);
                            self.screen = Screen::Portal(Page::Home);
                        }
                        Err(e) => {
                            warn!("Login failed: {}", e);
                            let description = match e {
                                BackendError::InvalidCredentials => {
                                    "Invalid username or password. Please try again or create an account.".to_string()
                                }
                                other => other.to_string(),
                            };
                            self.toasts
                                .notify(Notification::destructive("Login failed", description));
                        }
                    }
                }
                UiMessage::SignupFinished(result) => {
                    self.signup_pending = false;
                    match result {
                        Ok(()) => {
                            let username = self.signup_form.credentials.username.trim().to_string();
                            self.toasts.notify(Notification::success(
                                "Account created successfully!",
                                "You can now log in with your credentials.",
                            ));
                            self.log_success(format!("Account created for {}", username));
                            self.signup_form = SignupForm::default();
                            self.login_form.username = username;
                            self.screen = Screen::Login;
                        }
                        Err(e) => {
                            self.toasts
                                .notify(Notification::destructive("Account creation failed", e.to_string()));
                            self.log_error(format!("Account creation failed: {}", e));
                        }
                    }
                }
                UiMessage::PaymentFinished { ticket, result } => {
                    let Some(wizard) = self.wizard.as_mut() else {
                        debug!("Ignoring payment result for closed booking (ticket {ticket})");
                        continue;
                    };

                    let outcome = wizard
                        .complete_submit(ticket, result, &mut self.toasts)
                        .map(|confirmed| confirmed.id.to_string());
                    match outcome {
                        Ok(id) => self.log_success(format!("Payment received, appointment {id} confirmed")),
                        Err(e) => self.log_error(format!("Payment not applied: {e}")),
                    }
                }
            }
        }
    }

    /// Render the side navigation.
    fn show_side_nav(&mut self, ctx: &egui::Context, current: Page) {
        egui::SidePanel::left("side_nav")
            .resizable(false)
            .exact_width(200.0)
            .show(ctx, |ui| {
                ui.add_space(15.0);
                ui.label(RichText::new(BRAND).size(22.0).strong().color(colors::PRIMARY));
                ui.add_space(20.0);

                for page in Page::NAV {
                    let selected = current == page;
                    let text = RichText::new(format!("{} {}", page.icon(), page.name())).size(15.0);
                    if ui.selectable_label(selected, text).clicked() && !selected {
                        self.navigate(page);
                    }
                    ui.add_space(4.0);
                }

                ui.with_layout(Layout::bottom_up(Align::Min), |ui| {
                    ui.add_space(15.0);
                    if ui.button(format!("{SIGN_OUT} Logout")).clicked() {
                        self.logout();
                    }
                });
            });
    }

    /// Render modal dialogs (error, success).
    fn show_dialogs(&mut self, ctx: &egui::Context) {
        // Error dialog
        if let Some(ref error) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::ERROR, error);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }

        // Success dialog
        if let Some(ref msg) = self.success_message.clone() {
            egui::Window::new("Success")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.colored_label(colors::SUCCESS, msg);
                    ui.add_space(10.0);
                    if ui.button("OK").clicked() {
                        self.success_message = None;
                    }
                });
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Poll async results
        self.poll_async_results();

        // Request repaint during async operations
        if self.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        // Modal dialogs (error, success)
        self.show_dialogs(ctx);

        match self.screen {
            Screen::Welcome => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    if let Some(next) = welcome::show(self, ui) {
                        self.screen = next;
                    }
                });
            }
            Screen::Login => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    if let Some(next) = login_screen::show(self, ui) {
                        self.screen = next;
                    }
                });
            }
            Screen::Signup => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    if let Some(next) = signup_screen::show(self, ui) {
                        self.screen = next;
                    }
                });
            }
            Screen::Portal(page) => {
                self.show_side_nav(ctx, page);

                egui::CentralPanel::default().show(ctx, |ui| {
                    egui::ScrollArea::vertical().id_salt("portal_scroll").show(ui, |ui| match page {
                        Page::Home => {
                            if let Some(next) = home::show(self, ui) {
                                self.navigate(next);
                            }
                        }
                        Page::Appointments => {
                            if appointments_panel::show(self, ui) {
                                self.navigate(Page::Home);
                            }
                        }
                        Page::BookAppointment => {
                            if booking_panel::show(self, ui) {
                                self.navigate(Page::Home);
                            }
                        }
                        Page::Records => {
                            if records_panel::show(self, ui) {
                                self.navigate(Page::Home);
                            }
                        }
                        Page::HealthTips => {
                            if health_tips_panel::show(self, ui) {
                                self.navigate(Page::Home);
                            }
                        }
                    });
                });
            }
        }

        // Notifications on top of everything
        self.toasts.show(ctx);
    }
}
