//! `HTMLAudioElement` engine adapter

use crate::{EngineAdapter, EngineEvent, PlayRejection, PlayRequestId};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use tapedeck_core::Track;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlAudioElement;

/// Engine events waiting to be fed to the player
///
/// DOM listeners and promise callbacks push here; the owner drains the queue
/// whenever the waker fires or after each command.
#[derive(Clone, Default)]
pub struct Inbox {
    queue: Rc<RefCell<VecDeque<EngineEvent>>>,
    waker: Rc<RefCell<Option<Rc<dyn Fn()>>>>,
}

impl Inbox {
    /// Queue an event and wake the owner
    pub fn push(&self, event: EngineEvent) {
        self.queue.borrow_mut().push_back(event);

        let waker = self.waker.borrow().clone();
        if let Some(wake) = waker {
            wake();
        }
    }

    /// Oldest queued event
    pub fn pop(&self) -> Option<EngineEvent> {
        self.queue.borrow_mut().pop_front()
    }

    /// Callback run after every push
    pub fn set_waker(&self, waker: impl Fn() + 'static) {
        *self.waker.borrow_mut() = Some(Rc::new(waker));
    }
}

/// Values kept alive until the promise they were handed to settles
///
/// Settled entries are freed on the next `track`.
struct UntilSettled<T> {
    entries: Vec<(Rc<Cell<bool>>, T)>,
}

impl<T> UntilSettled<T> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Drop settled entries, then keep what `make` builds until its flag is set
    fn track(&mut self, make: impl FnOnce(Rc<Cell<bool>>) -> T) {
        self.entries.retain(|(settled, _)| !settled.get());

        let settled = Rc::new(Cell::new(false));
        let value = make(Rc::clone(&settled));
        self.entries.push((settled, value));
    }
}

type PlayCallbacks = (Closure<dyn FnMut(JsValue)>, Closure<dyn FnMut(JsValue)>);

/// Engine adapter over a browser audio element
pub struct HtmlAudioEngine {
    element: HtmlAudioElement,
    inbox: Inbox,
    listeners: Vec<(&'static str, Closure<dyn FnMut()>)>,
    // `play()` promise handlers, one pair per request
    play_callbacks: UntilSettled<PlayCallbacks>,
}

impl HtmlAudioEngine {
    /// Attach to `element`, reporting its events into `inbox`
    pub fn new(element: HtmlAudioElement, inbox: Inbox) -> Result<Self, JsValue> {
        let mut engine = Self {
            element,
            inbox,
            listeners: Vec::new(),
            play_callbacks: UntilSettled::new(),
        };

        let el = engine.element.clone();
        let inbox = engine.inbox.clone();
        engine.listen("loadedmetadata", move || {
            inbox.push(EngineEvent::LoadedMetadata {
                duration_secs: el.duration(),
            });
        })?;

        let el = engine.element.clone();
        let inbox = engine.inbox.clone();
        engine.listen("timeupdate", move || {
            inbox.push(EngineEvent::PositionChanged {
                position_secs: el.current_time(),
            });
        })?;

        let inbox = engine.inbox.clone();
        engine.listen("ended", move || inbox.push(EngineEvent::Ended))?;

        // Browsers fire `pause` right before `ended`; only report real pauses
        let el = engine.element.clone();
        let inbox = engine.inbox.clone();
        engine.listen("pause", move || {
            if !el.ended() {
                inbox.push(EngineEvent::Paused);
            }
        })?;

        Ok(engine)
    }

    fn listen(
        &mut self,
        name: &'static str,
        handler: impl FnMut() + 'static,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut()>::new(handler);
        self.element
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
        self.listeners.push((name, closure));
        Ok(())
    }
}

impl Drop for HtmlAudioEngine {
    fn drop(&mut self) {
        for (name, closure) in &self.listeners {
            self.element
                .remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
                .ok();
        }
    }
}

impl EngineAdapter for HtmlAudioEngine {
    fn load(&mut self, track: &Track) {
        self.element.set_src(track.source.as_str());
    }

    fn play(&mut self, request: PlayRequestId) {
        let promise = match self.element.play() {
            Ok(promise) => promise,
            Err(error) => {
                self.inbox.push(EngineEvent::PlayResolved {
                    request,
                    outcome: Err(rejection_from(&error)),
                });
                return;
            }
        };

        let inbox = self.inbox.clone();
        self.play_callbacks.track(|settled| {
            let resolved = inbox.clone();
            let rejected = inbox;
            let settled_on_reject = Rc::clone(&settled);

            let on_resolve = Closure::<dyn FnMut(JsValue)>::once(move |_: JsValue| {
                settled.set(true);
                resolved.push(EngineEvent::PlayResolved {
                    request,
                    outcome: Ok(()),
                });
            });
            let on_reject = Closure::<dyn FnMut(JsValue)>::once(move |error: JsValue| {
                settled_on_reject.set(true);
                rejected.push(EngineEvent::PlayResolved {
                    request,
                    outcome: Err(rejection_from(&error)),
                });
            });

            promise.then2(&on_resolve, &on_reject);
            (on_resolve, on_reject)
        });
    }

    fn pause(&mut self) {
        if let Err(error) = self.element.pause() {
            warn!(?error, "audio element refused to pause");
        }
    }

    fn seek_to(&mut self, position_secs: f64) {
        self.element.set_current_time(position_secs);
    }

    fn set_volume(&mut self, volume: f32) {
        self.element.set_volume(f64::from(volume));
    }

    fn current_position(&self) -> f64 {
        self.element.current_time()
    }

    fn duration(&self) -> Option<f64> {
        let duration = self.element.duration();
        duration.is_finite().then_some(duration)
    }
}

/// Map a `play()` rejection (a `DOMException`) to [`PlayRejection`]
fn rejection_from(error: &JsValue) -> PlayRejection {
    let name = js_sys::Reflect::get(error, &JsValue::from_str("name"))
        .ok()
        .and_then(|name| name.as_string())
        .unwrap_or_default();
    let message = js_sys::Reflect::get(error, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{error:?}"));

    match name.as_str() {
        "NotAllowedError" => PlayRejection::AutoplayBlocked,
        "NotSupportedError" => PlayRejection::SourceUnavailable(message),
        _ => PlayRejection::Other(message),
    }
}
