//! Microphone capture via WebAudio.
//!
//! The analyser node is connected for analysis only; the mic stream never
//! reaches the speakers. Permission is requested lazily on the first mic
//! toggle since `getUserMedia` needs a user gesture in most browsers.

use morph_core::audio::{split_bands, AudioBands};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

pub struct MicCapture {
    ctx: web::AudioContext,
    analyser: web::AnalyserNode,
    buf: Vec<u8>,
    listening: bool,
}

impl MicCapture {
    /// Request microphone access and build the analyser chain. Fails when
    /// the user denies permission or no input device exists.
    pub async fn init() -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        let devices = window.navigator().media_devices().map_err(js_err)?;
        let constraints = web::MediaStreamConstraints::new();
        constraints.set_audio(&JsValue::TRUE);
        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(js_err)?;
        let stream: web::MediaStream = JsFuture::from(promise).await.map_err(js_err)?.into();

        let ctx = web::AudioContext::new().map_err(js_err)?;
        let analyser = ctx.create_analyser().map_err(js_err)?;
        analyser.set_fft_size(256);
        let source = ctx.create_media_stream_source(&stream).map_err(js_err)?;
        source.connect_with_audio_node(&analyser).map_err(js_err)?;

        let bins = analyser.frequency_bin_count() as usize;
        log::info!("[audio] microphone capture running, {bins} bins");
        Ok(Self {
            ctx,
            analyser,
            buf: vec![0; bins],
            listening: true,
        })
    }

    /// Suspend or resume the context. Failures log and leave the listening
    /// flag untouched so the UI stays truthful.
    pub fn toggle(&mut self) {
        let result = if self.listening {
            self.ctx.suspend()
        } else {
            self.ctx.resume()
        };
        match result {
            Ok(_) => {
                self.listening = !self.listening;
                log::info!(
                    "[audio] microphone {}",
                    if self.listening { "resumed" } else { "suspended" }
                );
            }
            Err(e) => log::error!("[audio] toggle failed: {e:?}"),
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// One spectrum snapshot reduced to band levels. Silence while suspended.
    pub fn sample(&mut self) -> AudioBands {
        if !self.listening {
            return AudioBands::default();
        }
        self.analyser.get_byte_frequency_data(&mut self.buf);
        split_bands(&self.buf)
    }
}

fn js_err(v: JsValue) -> anyhow::Error {
    anyhow::anyhow!("{v:?}")
}
