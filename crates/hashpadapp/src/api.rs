//! # API Facade
//!
//! [`HashpadApi`] is the single entry point a front-end drives. It owns every
//! collaborator (address, both stores, the surface, config), the current
//! [`SessionContext`], and the two debounce timers, and turns UI events into
//! calls on the command layer.
//!
//! ## Events
//!
//! | Event | Effect |
//! |-------|--------|
//! | [`HashpadApi::load`] | resolve and render the current address |
//! | [`HashpadApi::on_edit`] | capture caret, arm the save timer |
//! | [`HashpadApi::on_selection_change`] | arm the caret timer |
//! | [`HashpadApi::tick`] | fire whichever timers came due |
//! | [`HashpadApi::flush`] | run a pending save (and caret capture) right away |
//! | [`HashpadApi::new_document`] | drop pending work, start a fresh document |
//! | [`HashpadApi::on_address_change`] | reload when the address moved under us |
//! | [`HashpadApi::export`] | package the current document as a file |
//!
//! ## Time
//!
//! The facade never reads a clock. Every timed event takes `now`, a monotonic
//! offset supplied by the caller: an event loop passes elapsed time, the CLI
//! passes zero and flushes, and tests step time by hand.
//!
//! ## What the API Does NOT Do
//!
//! - **Persistence logic**: that belongs in `commands/*.rs`
//! - **Terminal or DOM I/O**: front-ends render [`SessionContext`] and friends
//! - **Fail**: events return plain values; storage and decode problems are
//!   recovered below this layer
//!
//! ## Generic Over Collaborators
//!
//! `HashpadApi<A, D, S, U>` is generic over the address, durable store, session
//! store and surface:
//! - CLI: `HashpadApi<FileAddress, FileStore, FileStore, TreeSurface>`
//! - Testing: `HashpadApi<MemoryAddress, MemoryStore, MemoryStore, TreeSurface>`

use crate::address::Address;
use crate::commands::{self, export::ExportedFile, Workspace};
use crate::config::HashpadConfig;
use crate::debounce::Debouncer;
use crate::session::{Phase, SessionContext};
use crate::store::KeyValueStore;
use crate::surface::EditableSurface;
use std::time::Duration;

/// Which timers fired during a [`HashpadApi::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Fired {
    pub caret: bool,
    pub save: bool,
}

impl Fired {
    pub fn any(&self) -> bool {
        self.caret || self.save
    }
}

pub struct HashpadApi<A, D, S, U>
where
    A: Address,
    D: KeyValueStore,
    S: KeyValueStore,
    U: EditableSurface,
{
    address: A,
    durable: D,
    session_store: S,
    surface: U,
    config: HashpadConfig,
    session: SessionContext,
    save_timer: Debouncer,
    caret_timer: Debouncer,
}

impl<A, D, S, U> HashpadApi<A, D, S, U>
where
    A: Address,
    D: KeyValueStore,
    S: KeyValueStore,
    U: EditableSurface,
{
    /// Assemble the facade. Nothing is loaded until [`HashpadApi::load`].
    pub fn new(address: A, durable: D, session_store: S, surface: U, config: HashpadConfig) -> Self {
        let save_timer = Debouncer::new(config.save_debounce());
        let caret_timer = Debouncer::new(config.caret_debounce());
        Self {
            address,
            durable,
            session_store,
            surface,
            config,
            session: SessionContext::loading(),
            save_timer,
            caret_timer,
        }
    }

    fn workspace(&mut self) -> Workspace<'_> {
        Workspace {
            address: &mut self.address,
            durable: &self.durable,
            session: &self.session_store,
            surface: &mut self.surface,
            config: &self.config,
        }
    }

    fn take_session(&mut self) -> SessionContext {
        std::mem::replace(&mut self.session, SessionContext::loading())
    }

    pub fn load(&mut self) -> &SessionContext {
        self.save_timer.cancel();
        self.caret_timer.cancel();
        self.session = commands::load::run(&mut self.workspace());
        &self.session
    }

    /// The content changed. Remembers the caret and (re)schedules a save.
    pub fn on_edit(&mut self, now: Duration) {
        let session = self.take_session();
        commands::caret::capture(&mut self.workspace(), &session);
        self.session = session.with_phase(Phase::Editing);
        self.save_timer.arm(now);
    }

    pub fn on_selection_change(&mut self, now: Duration) {
        self.caret_timer.arm(now);
    }

    /// Fire due timers. The caret is captured before a save publishes.
    pub fn tick(&mut self, now: Duration) -> Fired {
        let mut fired = Fired::default();
        if self.caret_timer.fire(now) {
            self.capture_caret();
            fired.caret = true;
        }
        if self.save_timer.fire(now) {
            self.save_now();
            fired.save = true;
        }
        fired
    }

    /// Run pending work immediately. Returns whether a save was pending.
    pub fn flush(&mut self) -> bool {
        if self.caret_timer.cancel() {
            self.capture_caret();
        }
        if self.save_timer.cancel() {
            self.save_now();
            true
        } else {
            false
        }
    }

    /// Publish the surface now, regardless of timers.
    pub fn save_now(&mut self) -> &SessionContext {
        self.save_timer.cancel();
        let session = self.take_session();
        self.session = commands::save::run(&mut self.workspace(), session);
        &self.session
    }

    pub fn new_document(&mut self) -> &SessionContext {
        self.save_timer.cancel();
        self.caret_timer.cancel();
        self.session = commands::create::run(&mut self.workspace());
        &self.session
    }

    /// The address changed from outside (history navigation, a pasted link).
    ///
    /// Reloads unless the new fragment is the one this session published.
    /// Returns whether a reload happened.
    pub fn on_address_change(&mut self) -> bool {
        let current = self.address.fragment();
        if current == self.session.fragment {
            return false;
        }
        tracing::debug!("address changed externally, reloading");
        self.load();
        true
    }

    pub fn export(&self) -> ExportedFile {
        commands::export::run(&self.surface.state(), &self.title())
    }

    /// Title for what is on the surface right now.
    pub fn title(&self) -> String {
        crate::document::derive_title(&self.surface.content(), &self.config.default_title)
    }

    /// The shareable address of the current document.
    pub fn current_address(&self) -> String {
        self.config.address_for(&self.address.fragment())
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn has_pending_save(&self) -> bool {
        self.save_timer.is_armed()
    }

    /// Earliest pending deadline, for event loops that sleep between ticks.
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.save_timer.deadline(), self.caret_timer.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn config(&self) -> &HashpadConfig {
        &self.config
    }

    pub fn address(&self) -> &A {
        &self.address
    }

    pub fn address_mut(&mut self) -> &mut A {
        &mut self.address
    }

    pub fn durable(&self) -> &D {
        &self.durable
    }

    pub fn session_store(&self) -> &S {
        &self.session_store
    }

    pub fn surface(&self) -> &U {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut U {
        &mut self.surface
    }

    /// Hand the collaborators back, e.g. to persist a file-backed address.
    pub fn into_parts(self) -> (A, D, S, U) {
        (self.address, self.durable, self.session_store, self.surface)
    }

    fn capture_caret(&mut self) {
        let session = self.take_session();
        commands::caret::capture(&mut self.workspace(), &session);
        self.session = session;
    }
}
