#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod facts;
pub mod progress_service;
pub mod trigger;

pub use progress_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, FactError, ToggleError};
pub use facts::{FALLBACK_FACT, FactConfig, FactSource, HttpFactSource};
pub use progress_service::{LOADING_MESSAGE, Modal, ProgressService};
pub use trigger::{CompletionTrigger, FetchTicket, TriggerState};
