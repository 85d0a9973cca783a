//! Browser glue: wires a `FlowerGame` to `<audio>` cues, `setTimeout`, keyboard
//! and pointer events, and the DOM presenter.
//!
//! The running game lives in a `thread_local!` slot. Every event callback
//! borrows it synchronously, applies one change, then refreshes the presenter.
use std::cell::{Cell, RefCell};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, HtmlInputElement, window};

use crate::config::GameConfig;
use crate::game::FlowerGame;
use crate::playback::Tick;

mod audio;
mod dom;
mod timers;

pub use audio::WebAudio;
pub use dom::Presenter;
pub use timers::WebTimers;

pub(crate) use dom::Action;

type WebGame = FlowerGame<WebAudio, WebTimers>;

struct App {
    game: WebGame,
    ui: Presenter,
}

impl App {
    fn refresh(&mut self) {
        let events = self.game.drain_events();
        self.ui.render(&self.game.view(), &events);
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    static KEYS_BOUND: Cell<bool> = const { Cell::new(false) };
}

fn with_app<R>(f: impl FnOnce(&mut App) -> R) -> Option<R> {
    APP.with(|cell| cell.borrow_mut().as_mut().map(f))
}

pub(crate) fn on_timer(tick: Tick) {
    with_app(|app| {
        if app.game.on_tick(tick) {
            app.refresh();
        }
    });
}

/// Mount the game UI and wait for the player to press Start.
pub fn launch(config: GameConfig) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    shutdown();

    let audio = WebAudio::load(config.variant.flowers())?;
    let timers = WebTimers::new(win.clone());
    let game = FlowerGame::new(config, audio, timers);
    let (ui, clickable, slider) = Presenter::mount(&doc, game.variant(), game.volume().value())?;

    for (el, action) in clickable {
        bind_click(&el, action)?;
    }
    bind_volume(&slider)?;
    bind_keys(&win)?;

    APP.with(|cell| cell.replace(Some(App { game, ui })));
    with_app(App::refresh);
    log::info!("flower game mounted");
    Ok(())
}

/// Tear down the running game, if any, and remove its markup.
pub fn shutdown() {
    let old = APP.with(|cell| cell.borrow_mut().take());
    if let Some(mut app) = old {
        app.game.teardown();
        app.ui.unmount();
    }
}

pub(crate) fn dispatch(action: Action) {
    with_app(|app| {
        match action {
            Action::Start => app.game.start(),
            Action::Command(cmd) => app.game.apply(cmd),
        }
        app.refresh();
    });
}

pub fn set_volume(value: u8) {
    with_app(|app| {
        app.game.set_volume(value);
        app.refresh();
    });
}

fn bind_click(el: &Element, action: Action) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
        // Drop focus so Enter doesn't re-click the button.
        if let Some(btn) = evt.current_target().and_then(|t| t.dyn_into::<HtmlElement>().ok()) {
            if let Err(err) = btn.blur() {
                log::debug!("blur failed: {:?}", err);
            }
        }
        dispatch(action);
    }) as Box<dyn FnMut(_)>);
    el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn bind_volume(slider: &HtmlInputElement) -> Result<(), JsValue> {
    let input = slider.clone();
    let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
        match input.value().parse::<u8>() {
            Ok(v) => set_volume(v),
            Err(err) => log::warn!("bad slider value {:?}: {err}", input.value()),
        }
    }) as Box<dyn FnMut(_)>);
    slider.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

// The window listener outlives remounts; bind it once and route through APP.
fn bind_keys(win: &web_sys::Window) -> Result<(), JsValue> {
    if KEYS_BOUND.with(|b| b.replace(true)) {
        return Ok(());
    }
    let closure = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        with_app(|app| {
            if let Some(cmd) = app.game.handle_key(&evt.key()) {
                if cmd.suppresses_default() {
                    evt.prevent_default();
                }
                app.refresh();
            }
        });
    }) as Box<dyn FnMut(_)>);
    win.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
