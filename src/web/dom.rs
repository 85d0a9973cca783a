//! Minimal DOM presenter. Builds the game elements once and refreshes them from `GameView`.
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlButtonElement, HtmlInputElement};

use crate::flower::{Flower, Variant};
use crate::game::{GameEvent, GameView};
use crate::keys::Command;

pub const ROOT_ID: &str = "fs-root";

/// Which action a button triggers.
#[derive(Clone, Copy)]
pub enum Action {
    Start,
    Command(Command),
}

pub struct Presenter {
    root: Element,
    overlay: Element,
    pattern: Element,
    replay: HtmlButtonElement,
    slots: Element,
    flowers: Vec<(Flower, HtmlButtonElement)>,
    count: Element,
    volume_label: Element,
    feedback: Element,
    doc: Document,
}

fn child(doc: &Document, parent: &Element, tag: &str, class: &str) -> Result<Element, JsValue> {
    let el = doc.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    parent.append_child(&el)?;
    Ok(el)
}

fn button(doc: &Document, parent: &Element, class: &str, label: &str, hint: &str) -> Result<HtmlButtonElement, JsValue> {
    let btn: HtmlButtonElement = child(doc, parent, "button", class)?.dyn_into()?;
    btn.set_text_content(Some(label));
    let key = child(doc, &btn, "span", "key-hint")?;
    key.set_text_content(Some(hint));
    Ok(btn)
}

impl Presenter {
    /// Create (or recreate) the game markup under `<body>`. Returns the presenter and
    /// the clickable elements with the action each should trigger.
    pub fn mount(doc: &Document, variant: Variant, volume: u8) -> Result<(Self, Vec<(Element, Action)>, HtmlInputElement), JsValue> {
        if let Some(old) = doc.get_element_by_id(ROOT_ID) {
            old.remove();
        }
        let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
        let root = doc.create_element("div")?;
        root.set_id(ROOT_ID);
        root.set_class_name("game-container");
        body.append_child(&root)?;

        let mut clickable = Vec::new();

        let overlay = child(doc, &root, "div", "overlay")?;
        let modal = child(doc, &overlay, "div", "start-modal")?;
        let start: Element = child(doc, &modal, "button", "start-btn")?;
        start.set_text_content(Some("Start Game"));
        child(doc, &modal, "p", "")?.set_text_content(Some("(This game requires audio!)"));
        clickable.push((start, Action::Start));

        let header = child(doc, &root, "div", "game-header")?;
        child(doc, &header, "span", "volume-label")?.set_text_content(Some("🔊"));
        let slider: HtmlInputElement = child(doc, &header, "input", "")?.dyn_into()?;
        slider.set_type("range");
        slider.set_min("0");
        slider.set_max("10");
        slider.set_step("1");
        slider.set_value(&volume.to_string());
        let volume_label = child(doc, &header, "span", "")?;
        let count = child(doc, &header, "span", "completed")?;

        let display = child(doc, &root, "div", "pattern-display-container")?;
        let bird = child(doc, &display, "div", "bird-bubble")?;
        let pattern = child(doc, &bird, "div", "pattern")?;
        let replay = button(doc, &bird, "replay-btn", "🔊 Play Pattern", "R")?;
        clickable.push((replay.clone().into(), Action::Command(Command::Replay)));
        let user = child(doc, &display, "div", "user-bubble")?;
        let slots = child(doc, &user, "div", "pattern-boxes")?;
        let feedback = child(doc, &display, "div", "feedback")?;

        let controls = child(doc, &root, "div", "controls")?;
        let row = child(doc, &controls, "div", "flower-buttons")?;
        let mut flowers = Vec::new();
        for &flower in variant.flowers() {
            let class = format!("flower-btn flower-{}", flower.index());
            let btn: HtmlButtonElement = child(doc, &row, "button", &class)?.dyn_into()?;
            child(doc, &btn, "div", "flower-icon")?.set_text_content(Some(flower.glyph()));
            child(doc, &btn, "div", "key-hint")?.set_text_content(Some(&flower.key().to_ascii_uppercase().to_string()));
            clickable.push((btn.clone().into(), Action::Command(Command::Press(flower))));
            flowers.push((flower, btn));
        }

        let actions = child(doc, &controls, "div", "action-buttons")?;
        let clear = button(doc, &actions, "clear-btn", "Clear All", "Del")?;
        let undo = button(doc, &actions, "undo-btn", "Undo", "⌫")?;
        let send = button(doc, &actions, "send-btn", "Send", "Enter")?;
        clickable.push((clear.into(), Action::Command(Command::ClearAll)));
        clickable.push((undo.into(), Action::Command(Command::Undo)));
        clickable.push((send.into(), Action::Command(Command::Submit)));

        let presenter = Self {
            root,
            overlay,
            pattern,
            replay,
            slots,
            flowers,
            count,
            volume_label,
            feedback,
            doc: doc.clone(),
        };
        Ok((presenter, clickable, slider))
    }

    pub fn render(&self, view: &GameView, events: &[GameEvent]) {
        if view.started {
            self.overlay.set_attribute("style", "display:none").ok();
        }
        let masked = if view.started { "❓".repeat(view.target_len) } else { "❓".to_string() };
        self.pattern.set_text_content(Some(&masked));
        // Label text node is the first child; the key hint span follows it.
        if let Some(label) = self.replay.first_child() {
            label.set_text_content(Some(if view.playing { "🔊 Playing..." } else { "🔊 Play Pattern" }));
        }

        self.slots.set_inner_html("");
        let empty = [None];
        let slots: &[Option<Flower>] = if view.started { &view.slots } else { &empty };
        for slot in slots {
            let class = if slot.is_some() { "pattern-box filled" } else { "pattern-box empty" };
            if let Ok(el) = child(&self.doc, &self.slots, "div", class) {
                el.set_text_content(slot.map(|f| f.glyph()));
            }
        }

        for (flower, btn) in &self.flowers {
            let unlocked = view.flowers.iter().any(|f| f.flower == *flower && f.unlocked);
            let mut class = format!("flower-btn flower-{}", flower.index());
            if !unlocked {
                class.push_str(" flower-locked");
            }
            btn.set_class_name(&class);
            btn.set_disabled(!unlocked);
        }

        self.count.set_text_content(Some(&format!("🌱 {}", view.completed)));
        self.volume_label.set_text_content(Some(&view.volume.to_string()));

        if let Some(last) = events.last() {
            let text = match last {
                GameEvent::Correct => "✔".to_string(),
                GameEvent::Incorrect => "✘ try again".to_string(),
                GameEvent::Unlocked(f) => format!("new flower {}", f.glyph()),
                GameEvent::RangeWidened(r) => format!("patterns of {}-{}", r.min, r.max),
            };
            self.feedback.set_text_content(Some(&text));
        }
    }

    pub fn unmount(&self) {
        self.root.remove();
    }
}
