//! Guard installation lifecycle.
//!
//! An installation polls until the page is ready, then wires:
//!
//! ```text
//! ResizeObserver ──▶ zones: RwSignal<UploadZones>
//!                        │
//!                        ▼
//!                    locked: Memo<bool> ──▶ effect ──▶ NavigationToggler
//!
//! MutationObserver (upload tab class) ──▶ TabTracker ──▶ attach / detach
//! ```
//!
//! Only one installation is live at a time. Installing again, or
//! uninstalling, bumps a generation counter that stops a pending poll.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo_timers::future::TimeoutFuture;
use leptos::*;
use upload_guard::{
    GuardConfig, GuardResult, NavigationToggler, ObserverAction, Readiness, ReadinessGate,
    TabTracker, UploadZones,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::Document;

use crate::dom::{self, DomSurface};
use crate::observers::{HeightCallback, TabObserver, ZoneObservers};

type Toggler = NavigationToggler<DomSurface>;

thread_local! {
    static INSTALLATION: RefCell<Option<Installation>> = const { RefCell::new(None) };
    static GENERATION: Cell<u64> = const { Cell::new(0) };
}

/// Reactive nodes of one installation. They have no owner, so they are
/// disposed explicitly.
struct ReactiveState {
    zones: RwSignal<UploadZones>,
    locked: Memo<bool>,
    effect: Effect<()>,
}

impl ReactiveState {
    fn dispose(self) {
        self.effect.dispose();
        self.locked.dispose();
        self.zones.dispose();
    }
}

/// A wired guard.
struct Installation {
    reactive: ReactiveState,
    toggler: Rc<RefCell<Toggler>>,
    zone_observers: Rc<ZoneObservers>,
    tab_observer: TabObserver,
}

/// Start guarding the page described by `config`, replacing any previous
/// installation.
pub fn install(config: GuardConfig) -> GuardResult<()> {
    config.validate()?;
    uninstall();

    let generation = current_generation();
    log::info!(
        "🛡️ Waiting for {} element(s) before guarding {} upload zone(s)",
        config.required_selectors().len(),
        config.upload_zones.len()
    );
    spawn_local(wait_and_wire(config, generation));
    Ok(())
}

/// Stop guarding: cancel polling, disconnect observers and unlock
/// navigation. Returns whether a wired installation was removed.
pub fn uninstall() -> bool {
    next_generation();

    let installation = INSTALLATION.with(|slot| slot.borrow_mut().take());
    match installation {
        Some(installation) => {
            installation.teardown();
            log::info!("🛡️ Upload guard removed");
            true
        }
        None => false,
    }
}

/// Whether navigation is locked right now.
pub fn is_navigation_locked() -> bool {
    INSTALLATION.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|installation| installation.toggler.borrow().is_disabled())
            .unwrap_or(false)
    })
}

/// Number of upload zones currently holding files.
pub fn active_upload_zones() -> usize {
    INSTALLATION.with(|slot| {
        slot.borrow()
            .as_ref()
            .map(|installation| {
                installation
                    .reactive
                    .zones
                    .with_untracked(UploadZones::active_count)
            })
            .unwrap_or(0)
    })
}

fn current_generation() -> u64 {
    GENERATION.with(Cell::get)
}

fn next_generation() -> u64 {
    GENERATION.with(|g| {
        let next = g.get() + 1;
        g.set(next);
        next
    })
}

async fn wait_and_wire(config: GuardConfig, generation: u64) {
    let document = gloo_utils::document();
    let mut gate = ReadinessGate::new(config.required_selectors(), config.max_poll_attempts);

    loop {
        if current_generation() != generation {
            log::debug!("Superseded before the page was ready, polling stopped");
            return;
        }

        match gate.check(|selector| dom::exists(&document, selector)) {
            Readiness::Ready => break,
            Readiness::Pending { .. } => TimeoutFuture::new(config.poll_interval_ms).await,
            exhausted => {
                if let Some(e) = exhausted.into_error() {
                    log::error!("❌ Upload guard not installed: {}", e);
                }
                return;
            }
        }
    }

    match wire(&document, &config) {
        Ok(installation) => {
            INSTALLATION.with(|slot| *slot.borrow_mut() = Some(installation));
            log::info!("✅ Upload guard active after {} check(s)", gate.attempts());
        }
        Err(e) => log::error!("❌ Upload guard not installed: {}", e),
    }
}

fn wire(document: &Document, config: &GuardConfig) -> GuardResult<Installation> {
    let zones = create_rw_signal(UploadZones::new(config.upload_zones.len()));
    let locked = create_memo(move |_| zones.with(UploadZones::any_active));

    let surface = DomSurface::new(document.clone(), config.disabled_tab_class.clone());
    let toggler = Rc::new(RefCell::new(NavigationToggler::new(
        config.controls.clone(),
        surface,
    )));

    let weak_toggler: Weak<RefCell<Toggler>> = Rc::downgrade(&toggler);
    let effect = create_effect(move |_| {
        let locked = locked.get();
        let Some(toggler) = weak_toggler.upgrade() else {
            return;
        };
        let result = toggler.borrow_mut().sync(locked);
        match result {
            Ok(true) if locked => log::info!("🔒 Navigation locked while uploads are in progress"),
            Ok(true) => log::info!("🔓 Navigation unlocked"),
            Ok(false) => {}
            Err(e) => log::warn!("⚠️ Navigation only partly updated: {}", e),
        }
    });

    let reactive = ReactiveState {
        zones,
        locked,
        effect,
    };

    match wire_observers(document, config, zones) {
        Ok((zone_observers, tab_observer)) => Ok(Installation {
            reactive,
            toggler,
            zone_observers,
            tab_observer,
        }),
        Err(e) => {
            reactive.dispose();
            Err(e)
        }
    }
}

fn wire_observers(
    document: &Document,
    config: &GuardConfig,
    zones: RwSignal<UploadZones>,
) -> GuardResult<(Rc<ZoneObservers>, TabObserver)> {
    let on_height: HeightCallback = Rc::new(move |index: usize, height: f64| {
        zones.try_update(|zones| {
            if zones.record_height(index, height) {
                log::debug!("Upload zone {} active: {}", index, zones.is_active(index));
            }
        });
    });
    let zone_observers = Rc::new(ZoneObservers::new(&config.upload_list_selectors(), on_height)?);

    let tab = dom::query(document, &config.upload_tab)?;
    let mut tracker = TabTracker::new(config.selected_tab_class.clone());
    if tracker.on_class_change(&tab.class_name()) == ObserverAction::Attach {
        zone_observers.attach(document);
    }

    let tab_observer = {
        let zone_observers = Rc::clone(&zone_observers);
        let document = document.clone();
        TabObserver::new(&tab, move |class_attr| {
            match tracker.on_class_change(&class_attr) {
                ObserverAction::Attach => {
                    log::debug!("Upload tab shown, tracking uploads");
                    zone_observers.attach(&document);
                }
                // observing an already observed list is a no-op; this picks
                // up lists the page replaced
                ObserverAction::Refresh => zone_observers.attach(&document),
                ObserverAction::Detach => {
                    log::debug!("Upload tab hidden, upload tracking paused");
                    zone_observers.detach();
                }
                ObserverAction::Keep => {}
            }
        })?
    };

    Ok((zone_observers, tab_observer))
}

impl Installation {
    fn teardown(self) {
        let Installation {
            reactive,
            toggler,
            zone_observers,
            tab_observer,
        } = self;

        drop(tab_observer);
        zone_observers.detach();

        if let Err(e) = toggler.borrow_mut().enable() {
            log::warn!("⚠️ Navigation only partly restored: {}", e);
        }

        reactive.dispose();
    }
}
