//! Chat controller: the only owner and mutator of a [`Session`]

use neuronest_core::{Section, Session, Tab, Turn};
use neuronest_providers::ApiGateway;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Result of one gateway call, tagged with the conversation it belongs to
#[derive(Debug)]
struct Settlement {
    generation: u64,
    turn: Turn,
}

/// Drives a single conversation.
///
/// `submit` must be called from within a tokio runtime: the gateway call is
/// spawned onto it. Results come back over a channel and are applied by
/// [`poll`](Self::poll) or [`settle`](Self::settle), one state transition per
/// call. At most one call is in flight at any time.
pub struct ChatController {
    session: Session,
    gateway: ApiGateway,
    /// Bumped on every new conversation; settlements from older generations are dropped
    generation: u64,
    settle_tx: mpsc::UnboundedSender<Settlement>,
    settle_rx: mpsc::UnboundedReceiver<Settlement>,
    shutdown: CancellationToken,
}

impl ChatController {
    pub fn new(gateway: ApiGateway) -> Self {
        let (settle_tx, settle_rx) = mpsc::unbounded_channel();
        Self {
            session: Session::new(),
            gateway,
            generation: 0,
            settle_tx,
            settle_rx,
            shutdown: CancellationToken::new(),
        }
    }

    /// Read-only view of the session
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn model(&self) -> &str {
        self.gateway.model()
    }

    pub fn is_loading(&self) -> bool {
        self.session.is_loading()
    }

    pub fn input(&self) -> &str {
        self.session.input()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        *self.session.input_mut() = text.into();
    }

    pub fn push_char(&mut self, ch: char) {
        self.session.input_mut().push(ch);
    }

    pub fn pop_char(&mut self) {
        self.session.input_mut().pop();
    }

    /// Submit whatever is in the input buffer
    pub fn submit_input(&mut self) -> bool {
        let text = self.session.input().to_string();
        self.submit(text)
    }

    /// Append a user turn and issue the gateway call.
    ///
    /// Returns `false` without touching any state when `text` is blank or a
    /// request is already in flight. Otherwise the user turn is appended, the
    /// input buffer cleared and the request gate set before the call is
    /// spawned.
    pub fn submit(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text.trim().is_empty() {
            debug!("Ignoring blank submit");
            return false;
        }
        if self.session.is_loading() {
            debug!("Request already in flight, ignoring submit");
            return false;
        }

        self.session.push_turn(Turn::user(text));
        self.session.input_mut().clear();
        self.session.set_loading(true);
        self.dispatch();
        true
    }

    fn dispatch(&self) {
        let turns = self.session.turns().to_vec();
        let gateway = self.gateway.clone();
        let settle_tx = self.settle_tx.clone();
        let shutdown = self.shutdown.clone();
        let generation = self.generation;

        info!(
            "Dispatching conversation of {} turns (generation {})",
            turns.len(),
            generation
        );

        tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    debug!("Controller dropped, abandoning generation {} request", generation);
                }
                turn = gateway.complete(&turns) => {
                    let _ = settle_tx.send(Settlement { generation, turn });
                }
            }
        });
    }

    /// Apply every settlement that has already arrived. Never blocks.
    ///
    /// Returns the number of settlements consumed.
    pub fn poll(&mut self) -> usize {
        let mut consumed = 0;
        while let Ok(settlement) = self.settle_rx.try_recv() {
            self.apply(settlement);
            consumed += 1;
        }
        consumed
    }

    /// Wait for the in-flight call to settle and apply it.
    ///
    /// Returns the appended turn, or `None` when nothing was in flight or the
    /// result belonged to a previous conversation.
    pub async fn settle(&mut self) -> Option<Turn> {
        if !self.session.is_loading() {
            return None;
        }
        let settlement = self.settle_rx.recv().await?;
        self.apply(settlement)
    }

    fn apply(&mut self, settlement: Settlement) -> Option<Turn> {
        self.session.set_loading(false);
        if settlement.generation != self.generation {
            debug!(
                "Discarding stale response from generation {} (current {})",
                settlement.generation, self.generation
            );
            return None;
        }
        self.session.push_turn(settlement.turn.clone());
        Some(settlement.turn)
    }

    /// Clear the conversation and reset the topic tab.
    ///
    /// A call still in flight keeps the request gate set until it settles,
    /// but its result is discarded.
    pub fn new_conversation(&mut self) {
        self.session.clear();
        self.generation += 1;
        info!("Started new conversation (generation {})", self.generation);
    }

    /// Switch sidebar section; New Chat also starts a new conversation
    pub fn select_section(&mut self, section: Section) {
        self.session.set_section(section);
        if section == Section::NewChat {
            self.new_conversation();
        }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.session.set_tab(tab);
    }

    pub fn next_tab(&mut self) {
        self.select_tab(self.session.tab().next());
    }

    pub fn previous_tab(&mut self) {
        self.select_tab(self.session.tab().previous());
    }
}

impl Drop for ChatController {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}
