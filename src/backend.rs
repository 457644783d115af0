//! Simulated portal backend.
//!
//! The portal has no server. Login, account creation, and payment are served
//! by a [`PortalBackend`] implementation; [`SimulatedBackend`] waits a fixed
//! delay and then resolves according to its [`Outcome`] policy, so both the
//! success and failure branches can be driven deterministically.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use rand::Rng;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::booking::{Fee, PaymentMethod, PaymentRequest};
use crate::config::AppConfig;

/// Errors produced by backend operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Payment declined: {0}")]
    PaymentDeclined(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Authenticated patient session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub username: String,
    pub display_name: String,
}

/// Data submitted when creating an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub username: String,
    pub full_name: String,
    pub email: String,
}

/// Proof of a completed payment.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentReceipt {
    pub ticket: u64,
    pub amount: Fee,
    pub method: PaymentMethod,
    pub paid_at: DateTime<Local>,
}

/// Remote operations the portal depends on.
#[async_trait]
pub trait PortalBackend: Send + Sync {
    /// Authenticate a patient.
    async fn login(&self, username: &str, password: &str) -> Result<Session, BackendError>;

    /// Register a new patient account.
    async fn create_account(&self, account: &NewAccount) -> Result<(), BackendError>;

    /// Charge the booking fee.
    async fn process_payment(&self, request: &PaymentRequest) -> Result<PaymentReceipt, BackendError>;
}

/// How a simulated operation resolves once its delay has elapsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Every operation succeeds.
    Succeed,
    /// Every operation fails with the given reason.
    Fail(String),
    /// Each operation fails independently with the given probability.
    FailureRate(f64),
}

impl Outcome {
    /// Roll the outcome. Returns the failure reason, if any.
    fn roll(&self) -> Option<String> {
        match self {
            Outcome::Succeed => None,
            Outcome::Fail(reason) => Some(reason.clone()),
            Outcome::FailureRate(rate) => {
                let rate = rate.clamp(0.0, 1.0);
                rand::thread_rng()
                    .gen_bool(rate)
                    .then(|| "Simulated failure".to_string())
            }
        }
    }
}

/// Artificial latency per operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delays {
    pub login: Duration,
    pub signup: Duration,
    pub payment: Duration,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            login: Duration::from_millis(1500),
            signup: Duration::from_secs(2),
            payment: Duration::from_secs(2),
        }
    }
}

impl Delays {
    /// No latency at all.
    pub fn none() -> Self {
        Self {
            login: Duration::ZERO,
            signup: Duration::ZERO,
            payment: Duration::ZERO,
        }
    }
}

/// In-process backend that fabricates results after a delay.
#[derive(Debug, Clone)]
pub struct SimulatedBackend {
    delays: Delays,
    outcome: Outcome,
    demo_username: String,
    demo_password: String,
    demo_display_name: String,
}

impl SimulatedBackend {
    pub fn new(delays: Delays, outcome: Outcome) -> Self {
        Self {
            delays,
            outcome,
            demo_username: "demo".to_string(),
            demo_password: "password".to_string(),
            demo_display_name: "John".to_string(),
        }
    }

    /// Build a backend from the `[backend]` and `[auth]` config sections.
    pub fn from_config(config: &AppConfig) -> Self {
        let delays = Delays {
            login: Duration::from_millis(config.backend.login_delay_ms),
            signup: Duration::from_millis(config.backend.signup_delay_ms),
            payment: Duration::from_millis(config.backend.payment_delay_ms),
        };
        let outcome = if config.backend.failure_rate > 0.0 {
            Outcome::FailureRate(config.backend.failure_rate)
        } else {
            Outcome::Succeed
        };

        Self::new(delays, outcome).with_demo_account(
            &config.auth.demo_username,
            &config.auth.demo_password,
            &config.hospital.patient_name,
        )
    }

    /// Replace the credentials accepted by [`PortalBackend::login`].
    pub fn with_demo_account(mut self, username: &str, password: &str, display_name: &str) -> Self {
        self.demo_username = username.to_string();
        self.demo_password = password.to_string();
        self.demo_display_name = display_name.to_string();
        self
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }
}

#[async_trait]
impl PortalBackend for SimulatedBackend {
    async fn login(&self, username: &str, password: &str) -> Result<Session, BackendError> {
        debug!("Simulating login for {username}");
        tokio::time::sleep(self.delays.login).await;

        if let Some(reason) = self.outcome.roll() {
            warn!("Login unavailable: {reason}");
            return Err(BackendError::Unavailable(reason));
        }

        if username != self.demo_username || password != self.demo_password {
            info!("Login rejected for {username}");
            return Err(BackendError::InvalidCredentials);
        }

        info!("Login accepted for {username}");
        Ok(Session {
            username: username.to_string(),
            display_name: self.demo_display_name.clone(),
        })
    }

    async fn create_account(&self, account: &NewAccount) -> Result<(), BackendError> {
        debug!("Simulating account creation for {}", account.username);
        tokio::time::sleep(self.delays.signup).await;

        if let Some(reason) = self.outcome.roll() {
            warn!("Account creation failed: {reason}");
            return Err(BackendError::Unavailable(reason));
        }

        info!("Account created for {}", account.username);
        Ok(())
    }

    async fn process_payment(&self, request: &PaymentRequest) -> Result<PaymentReceipt, BackendError> {
        debug!(
            "Simulating {} payment of {} (ticket {})",
            request.method.label(),
            request.fee,
            request.ticket
        );
        tokio::time::sleep(self.delays.payment).await;

        if let Some(reason) = self.outcome.roll() {
            warn!("Payment for ticket {} declined: {reason}", request.ticket);
            return Err(BackendError::PaymentDeclined(reason));
        }

        info!("Payment for ticket {} succeeded", request.ticket);
        Ok(PaymentReceipt {
            ticket: request.ticket,
            amount: request.fee.clone(),
            method: request.method,
            paid_at: Local::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> PaymentRequest {
        PaymentRequest {
            ticket: 42,
            method: PaymentMethod::MobileMoney,
            fee: Fee::new(10_000, "MK"),
            payer: "0991234567".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_accepts_demo_credentials() {
        let backend = SimulatedBackend::new(Delays::none(), Outcome::Succeed);
        let session = backend.login("demo", "password").await.unwrap();
        assert_eq!(session.username, "demo");
        assert_eq!(session.display_name, "John");
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let backend = SimulatedBackend::new(Delays::none(), Outcome::Succeed);
        let err = backend.login("demo", "nope").await.unwrap_err();
        assert_eq!(err, BackendError::InvalidCredentials);
    }

    #[tokio::test]
    async fn test_custom_demo_account() {
        let backend =
            SimulatedBackend::new(Delays::none(), Outcome::Succeed).with_demo_account("amy", "s3cret", "Amy");
        assert!(backend.login("demo", "password").await.is_err());
        assert_eq!(backend.login("amy", "s3cret").await.unwrap().display_name, "Amy");
    }

    #[tokio::test]
    async fn test_forced_failure_declines_payment() {
        let backend = SimulatedBackend::new(Delays::none(), Outcome::Fail("card blocked".to_string()));
        let err = backend.process_payment(&request()).await.unwrap_err();
        assert_eq!(err, BackendError::PaymentDeclined("card blocked".to_string()));
    }

    #[tokio::test]
    async fn test_failure_rate_bounds() {
        let always = SimulatedBackend::new(Delays::none(), Outcome::FailureRate(1.0));
        let never = SimulatedBackend::new(Delays::none(), Outcome::FailureRate(0.0));

        for _ in 0..20 {
            assert!(always.process_payment(&request()).await.is_err());
            assert!(never.process_payment(&request()).await.is_ok());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_payment_waits_for_delay() {
        let backend = SimulatedBackend::new(Delays::default(), Outcome::Succeed);
        let start = tokio::time::Instant::now();

        let receipt = backend.process_payment(&request()).await.unwrap();

        assert!(start.elapsed() >= Duration::from_secs(2));
        assert_eq!(receipt.ticket, 42);
        assert_eq!(receipt.amount, Fee::new(10_000, "MK"));
    }

    #[test]
    fn test_from_config_uses_failure_rate() {
        let mut config = AppConfig::default();
        let backend = SimulatedBackend::from_config(&config);
        assert_eq!(backend.outcome(), &Outcome::Succeed);

        config.backend.failure_rate = 0.25;
        let backend = SimulatedBackend::from_config(&config);
        assert_eq!(backend.outcome(), &Outcome::FailureRate(0.25));
    }
}
