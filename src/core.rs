//! Core domain types and the provider contract for podalert
//!
//! This module defines the alert event handed to notification providers, the
//! read-only application context they format against, and the trait every
//! provider implements.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DeliveryError;

/// A pod crash or restart detected in the cluster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Event {
    /// Name of the affected pod
    pub pod_name: String,
    /// Name of the container that crashed
    pub container_name: String,
    /// Namespace of the pod
    pub namespace: String,
    /// Termination or waiting reason (e.g., "OOMKilled", "CrashLoopBackOff")
    pub reason: String,
    /// Newline-joined Kubernetes events related to the pod
    pub events: String,
    /// Container logs captured at the time of the crash
    pub logs: String,
}

/// Application-wide settings shared by every provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AppContext {
    /// Cluster name shown in every formatted alert
    pub cluster_name: String,
}

impl AppContext {
    pub fn new(cluster_name: impl Into<String>) -> Self {
        Self {
            cluster_name: cluster_name.into(),
        }
    }
}

// =============================================================================
// Provider Trait
// =============================================================================

/// A notification channel that alerts can be delivered to.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Human-readable provider name, used for logging and selection.
    fn name(&self) -> &'static str;

    /// Formats a structured event and delivers it.
    ///
    /// # Returns
    /// * `Ok(())` once the provider accepted the message
    /// * `Err` with the delivery failure, unmodified
    async fn send_event(&self, event: &Event) -> Result<(), DeliveryError>;

    /// Delivers a plain text message, e.g. a startup announcement.
    async fn send_message(&self, message: &str) -> Result<(), DeliveryError>;
}
