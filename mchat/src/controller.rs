//! Per-turn state machine for the support chat session.

use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use futures_core::Stream;
use tokio::sync::watch;

use mflows::{EmergencyDetector, FlowError, SupportResponder};

use crate::{
    CONNECTIVITY_FAILURE_TEXT, ChatError, ChatTurnHooks, NoopChatTurnHooks, REASSURANCE_TEXT,
    Transcript, TranscriptSnapshot, TurnId, TurnOutcome, TurnStage, UserProfile, greeting_text,
};

pub type TranscriptStream = Pin<Box<dyn Stream<Item = TranscriptSnapshot> + Send>>;

/// Owns the session transcript and drives each turn through
/// classify-then-respond dispatch.
///
/// A turn walks: append user message, show the typing placeholder, classify
/// the input, then either append the fixed reassurance reply (crisis) or ask
/// the responder for an empathetic one. The two crisis paths intentionally
/// differ in voice: the classification path appends fixed text, while the
/// responder's own tool path lets the model compose a reply led by the
/// helpline block.
///
/// Turns are serialized behind an async lock, and the placeholder is tagged
/// with its turn id, so rapid double-submission cannot interleave placeholder
/// bookkeeping. The emergency flag is recomputed from scratch on every turn;
/// it never accumulates.
pub struct ChatController {
    user: UserProfile,
    detector: Arc<dyn EmergencyDetector>,
    responder: Arc<dyn SupportResponder>,
    hooks: Arc<dyn ChatTurnHooks>,
    transcript: Mutex<Transcript>,
    turn_lock: tokio::sync::Mutex<()>,
    next_turn: AtomicU64,
    updates: watch::Sender<TranscriptSnapshot>,
}

impl ChatController {
    pub fn new(
        user: UserProfile,
        detector: Arc<dyn EmergencyDetector>,
        responder: Arc<dyn SupportResponder>,
    ) -> Self {
        let transcript = Transcript::seeded_with_greeting(greeting_text(&user.name));
        let (updates, _) = watch::channel(transcript.snapshot());

        Self {
            user,
            detector,
            responder,
            hooks: Arc::new(NoopChatTurnHooks),
            transcript: Mutex::new(transcript),
            turn_lock: tokio::sync::Mutex::new(()),
            next_turn: AtomicU64::new(0),
            updates,
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn ChatTurnHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn snapshot(&self) -> TranscriptSnapshot {
        self.lock_transcript().snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<TranscriptSnapshot> {
        self.updates.subscribe()
    }

    /// Async stream of snapshots: the current state first, then one item per
    /// subsequent change.
    pub fn updates(&self) -> TranscriptStream {
        let mut receiver = self.updates.subscribe();
        Box::pin(async_stream::stream! {
            loop {
                let snapshot = receiver.borrow_and_update().clone();
                yield snapshot;
                if receiver.changed().await.is_err() {
                    break;
                }
            }
        })
    }

    /// Runs one full turn. Returns an error only for rejected input; upstream
    /// failures are absorbed into the transcript as the fixed connectivity
    /// message.
    pub async fn send_message(&self, text: &str) -> Result<(), ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::validation("message must not be empty"));
        }

        let _turn_guard = self.turn_lock.lock().await;
        let turn = TurnId(self.next_turn.fetch_add(1, Ordering::Relaxed) + 1);
        let started = Instant::now();
        self.hooks.on_turn_start(turn);

        self.mutate(|transcript| {
            transcript.append_user(text);
            transcript.insert_placeholder(turn);
        });

        match self.detector.classify(text).await {
            Ok(classification) if classification.emergency_detected => {
                self.hooks.on_classification(turn, true);
                self.mutate(|transcript| {
                    transcript.set_emergency_flag(true);
                    transcript.remove_placeholder(turn);
                    transcript.append_assistant(REASSURANCE_TEXT);
                });
                self.hooks.on_turn_complete(
                    turn,
                    TurnOutcome::EmergencyReassurance,
                    started.elapsed(),
                );
            }
            Ok(_) => {
                self.hooks.on_classification(turn, false);
                self.mutate(|transcript| transcript.set_emergency_flag(false));

                match self.responder.respond(text, Some(&self.user.id)).await {
                    Ok(reply) => {
                        self.mutate(|transcript| {
                            transcript.remove_placeholder(turn);
                            transcript.append_assistant(reply.response);
                        });
                        self.hooks
                            .on_turn_complete(turn, TurnOutcome::Answered, started.elapsed());
                    }
                    Err(error) => self.fail_turn(turn, TurnStage::Response, error, started),
                }
            }
            Err(error) => self.fail_turn(turn, TurnStage::Classification, error, started),
        }

        Ok(())
    }

    /// Upstream failure path: swap the placeholder for the fixed connectivity
    /// message and leave the emergency flag exactly as the previous turn set
    /// it.
    fn fail_turn(&self, turn: TurnId, stage: TurnStage, error: FlowError, started: Instant) {
        tracing::error!(
            turn = %turn,
            stage = ?stage,
            error_kind = ?error.kind,
            error = %error,
            "turn failed upstream"
        );

        self.mutate(|transcript| {
            transcript.remove_placeholder(turn);
            transcript.append_assistant(CONNECTIVITY_FAILURE_TEXT);
        });
        self.hooks
            .on_turn_failure(turn, stage, &error, started.elapsed());
    }

    fn mutate(&self, apply: impl FnOnce(&mut Transcript)) {
        let snapshot = {
            let mut transcript = self.lock_transcript();
            apply(&mut transcript);
            transcript.snapshot()
        };

        self.updates.send_replace(snapshot);
    }

    // Transcript mutations cannot panic mid-update, so a poisoned lock still
    // holds a consistent transcript.
    fn lock_transcript(&self) -> std::sync::MutexGuard<'_, Transcript> {
        self.transcript
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
