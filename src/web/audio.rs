//! Browser audio: one preloaded `<audio>` element per flower.
use js_sys::Promise;
use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

use crate::error::AudioError;
use crate::flower::Flower;
use crate::playback::CuePlayer;

pub struct WebAudio {
    cues: Vec<(Flower, HtmlAudioElement)>,
    // Shared by every play() promise; autoplay restrictions reject asynchronously.
    on_reject: Closure<dyn FnMut(JsValue)>,
}

impl WebAudio {
    pub fn load(flowers: &[Flower]) -> Result<Self, JsValue> {
        let mut cues = Vec::with_capacity(flowers.len());
        for &flower in flowers {
            let el = HtmlAudioElement::new_with_src(&flower.cue_url())?;
            el.set_preload("auto");
            cues.push((flower, el));
        }
        let on_reject = Closure::wrap(Box::new(|err: JsValue| {
            log::warn!("audio play rejected: {:?}", err);
        }) as Box<dyn FnMut(JsValue)>);
        Ok(Self { cues, on_reject })
    }

    fn cue(&self, flower: Flower) -> Option<&HtmlAudioElement> {
        self.cues.iter().find(|(f, _)| *f == flower).map(|(_, el)| el)
    }
}

impl CuePlayer for WebAudio {
    fn play(&mut self, flower: Flower) -> Result<(), AudioError> {
        let el = self.cue(flower).ok_or(AudioError::MissingCue(flower))?;
        el.set_current_time(0.0);
        let promise: Promise = el
            .play()
            .map_err(|err| AudioError::Rejected(format!("{err:?}")))?;
        // The returned chained promise is not needed.
        let _ = promise.catch(&self.on_reject);
        Ok(())
    }

    fn stop_all(&mut self) {
        for (flower, el) in &self.cues {
            if let Err(err) = el.pause() {
                log::warn!("pausing {:?} failed: {:?}", flower, err);
            }
            el.set_current_time(0.0);
        }
    }

    fn set_gain(&mut self, gain: f64) {
        for (_, el) in &self.cues {
            el.set_volume(gain);
        }
    }
}
