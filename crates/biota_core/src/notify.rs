//! Outgoing notification sinks.
//!
//! The engine never talks to a concrete event bus. Everything that wants to
//! publish takes a `&mut dyn NotificationSink`.

use biota_data::Notification;
use std::sync::mpsc::Sender;

pub trait NotificationSink {
    fn emit(&mut self, notification: Notification);
}

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl NotificationSink for NullSink {
    fn emit(&mut self, _notification: Notification) {}
}

/// Records notifications in emission order.
impl NotificationSink for Vec<Notification> {
    fn emit(&mut self, notification: Notification) {
        self.push(notification);
    }
}

/// Forwards to another thread. A hung-up receiver is logged, never fatal.
impl NotificationSink for Sender<Notification> {
    fn emit(&mut self, notification: Notification) {
        if self.send(notification).is_err() {
            tracing::warn!("Notification receiver disconnected, dropping event");
        }
    }
}

impl<S: NotificationSink + ?Sized> NotificationSink for &mut S {
    fn emit(&mut self, notification: Notification) {
        (**self).emit(notification);
    }
}

/// Logs every notification through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn emit(&mut self, notification: Notification) {
        match &notification {
            Notification::Reproduction {
                child_generation, ..
            } => {
                tracing::debug!(generation = child_generation, "Offspring genome created");
            }
            Notification::Mutation(event) => {
                tracing::debug!(
                    trait_kind = %event.trait_kind,
                    allele = ?event.allele,
                    kind = ?event.kind,
                    magnitude = event.magnitude,
                    generation = event.generation,
                    "Genome mutated"
                );
            }
            Notification::CascadeEffect(effect) => {
                tracing::info!(
                    source = %effect.source_type,
                    target = %effect.target_type,
                    magnitude = effect.magnitude,
                    reason = ?effect.reason,
                    cause = %effect.cause,
                    depth = effect.depth,
                    "Cascade effect"
                );
            }
        }
    }
}

/// Sends each notification to two sinks.
#[derive(Debug, Default, Clone)]
pub struct Tee<A, B> {
    pub first: A,
    pub second: B,
}

impl<A, B> Tee<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: NotificationSink, B: NotificationSink> NotificationSink for Tee<A, B> {
    fn emit(&mut self, notification: Notification) {
        self.first.emit(notification.clone());
        self.second.emit(notification);
    }
}
